//! Acoustic analysis — features, metrics and scores.
//!
//! ```text
//! CanonicalWaveform ─▶ AcousticFeatures ─┐
//!                                        ├─▶ DerivedMetrics ─▶ ScoreResult
//! transcript ────────────────────────────┘
//! ```
//!
//! Everything in this module is pure computation: no I/O, no shared state,
//! deterministic for a given input.

pub mod features;
pub mod metrics;
pub mod score;

pub use features::{AcousticFeatures, FeatureError, SpeechInterval};
pub use metrics::DerivedMetrics;
pub use score::ScoreResult;
