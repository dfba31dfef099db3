//! # reproai-evidence
//!
//! Pure functions over fetched metadata:
//! - [`extract`] finds datasets, models and checkpoints mentioned in the
//!   paper text and repository summary.
//! - [`score`] turns repository, citation and artifact signals into the
//!   weighted real-world-evidence score.
//!
//! Neither module performs I/O.

pub mod extract;
pub mod score;

pub use extract::extract_artifacts;
pub use score::{EvidenceSignals, log_norm, score_evidence};
