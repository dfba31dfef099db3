//! # reproai-report
//!
//! Turns the outputs of one run into a [`Report`](reproai_core::entities::Report)
//! and writes it as pretty JSON plus a static HTML view.

mod assemble;
mod error;
pub mod html;
mod write;

pub use assemble::{OutputPaths, ReportInputs, assemble, file_stem};
pub use error::ReportError;
pub use html::render_html;
pub use write::write_report;
