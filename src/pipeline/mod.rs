//! The end-to-end analysis pipeline.
//!
//! # Flow
//!
//! ```text
//! AudioSource → normalize → {recognize, extract} → derive → score → report
//! ```
//!
//! Each stage degrades to a documented default on failure; `analyze` always
//! returns a complete, bounded [`AnalysisReport`].

pub mod report;
pub mod runner;

pub use report::AnalysisReport;
pub use runner::AnalysisPipeline;
