//! Configuration module for the speech analyzer.
//!
//! Provides `AnalyzerConfig` (top-level settings), sub-configs for each
//! subsystem, `AppPaths` for cross-platform data directories, and TOML
//! persistence via `AnalyzerConfig::load` / `AnalyzerConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AnalysisConfig, AnalyzerConfig, RecognizerConfig, TranscoderConfig};
