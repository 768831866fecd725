//! The flat result record returned for every analyzed answer.

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::round2;
use crate::analysis::{DerivedMetrics, ScoreResult};

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// Everything the caller gets back for one recording.
///
/// All numeric fields are rounded to two decimals for presentation; the
/// underlying computation runs at full precision. Every field is always
/// populated — decoding or recognition failures show up as an empty
/// transcript and default metric values, never as a missing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Recognized speech; empty when nothing was recognized or the
    /// recognizer is unavailable.
    pub transcript: String,
    /// Words per minute (≥ 0).
    pub wpm: f64,
    /// Total silence in seconds (within `[0, duration]`).
    pub pause_duration: f64,
    /// Filler phrase occurrences (≥ 0).
    pub filler_words: u32,
    /// Spread of the voiced pitch contour in Hz (≥ 0).
    pub pitch_variance: f64,
    /// Volume steadiness; typically ≤ 1, may be negative.
    pub volume_consistency: f64,
    /// Pace + filler quality, in `[0, 10]`.
    pub fluency_score: f64,
    /// Delivery steadiness, in `[0, 10]`.
    pub confidence_score: f64,
}

impl AnalysisReport {
    /// Assemble the presentation record from full-precision values.
    pub fn assemble(transcript: String, metrics: &DerivedMetrics, scores: &ScoreResult) -> Self {
        Self {
            transcript,
            wpm: round2(metrics.wpm),
            pause_duration: round2(metrics.pause_duration),
            filler_words: metrics.filler_words,
            pitch_variance: round2(metrics.pitch_variance),
            volume_consistency: round2(metrics.volume_consistency),
            fluency_score: round2(scores.fluency_score),
            confidence_score: round2(scores.confidence_score),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
