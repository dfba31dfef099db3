//! # reproai-core
//!
//! Core types, identifier resolution, and error types for reproai.
//!
//! This crate provides the foundational types shared across all reproai crates:
//! - Entity structs for every record the pipeline produces (paper, repository,
//!   artifacts, usage insights, classification, evidence score, report)
//! - Ordinal and categorical enums (reproducibility class, artifact kind,
//!   evidence dimension, data source)
//! - Identifier parsing and canonicalization for paper and repository inputs
//! - The cross-cutting error taxonomy

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

pub use errors::ReproError;
pub use ids::{PaperId, RepoId, resolve_inputs};
