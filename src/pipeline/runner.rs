//! Pipeline driver — normalize → recognize → extract → derive → score.
//!
//! [`AnalysisPipeline`] wires the stages together and owns the degrade
//! policy: every stage returns an explicit `Result`, and a failure
//! substitutes that stage's documented default instead of aborting the
//! request.
//!
//! ```text
//! AudioSource
//!   └─▶ AudioNormalizer        ── DecodeError ──▶ default report
//!         └─▶ Transcriber      ── TranscribeError ──▶ "" (acoustics continue)
//!         └─▶ AcousticFeatures ── FeatureError ──▶ zeroed (duration kept)
//!               └─▶ DerivedMetrics ─▶ ScoreResult ─▶ AnalysisReport
//! ```
//!
//! The external contract is: `analyze` always returns a complete, bounded
//! report and never fails for audio-content reasons.
//!
//! All stages are synchronous and CPU-bound; callers that serve concurrent
//! requests are expected to run `analyze` on a worker pool. The pipeline
//! itself holds no mutable state, so one instance can be shared freely.

use std::sync::Arc;

use crate::analysis::{AcousticFeatures, DerivedMetrics, ScoreResult};
use crate::audio::{AudioNormalizer, AudioSource};
use crate::config::AnalysisConfig;
use crate::pipeline::report::AnalysisReport;
use crate::stt::Transcriber;

// ---------------------------------------------------------------------------
// AnalysisPipeline
// ---------------------------------------------------------------------------

/// Drives the complete answer-analysis pipeline.
pub struct AnalysisPipeline {
    normalizer: AudioNormalizer,
    transcriber: Arc<dyn Transcriber>,
    analysis: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline from its injected stages.
    ///
    /// # Arguments
    ///
    /// * `normalizer`  — decoder for arbitrary input audio.
    /// * `transcriber` — speech recognizer (e.g. [`crate::stt::VoskTranscriber`]).
    /// * `analysis`    — silence threshold and filler phrase set.
    pub fn new(
        normalizer: AudioNormalizer,
        transcriber: Arc<dyn Transcriber>,
        analysis: AnalysisConfig,
    ) -> Self {
        Self {
            normalizer,
            transcriber,
            analysis,
        }
    }

    /// Analyze one recording.
    ///
    /// Always returns a fully-populated report; content-level failures are
    /// logged and replaced by that stage's default.
    pub fn analyze(&self, source: &AudioSource) -> AnalysisReport {
        // ── 1. Normalize ─────────────────────────────────────────────────
        let waveform = match self.normalizer.normalize(source) {
            Ok(w) => w,
            Err(e) => {
                log::warn!(
                    "decode failed for {} ({e}); returning default report",
                    source.describe()
                );
                return self.finish(String::new(), &AcousticFeatures::empty());
            }
        };

        log::debug!(
            "normalized {}: {:.2}s, canonical = {}",
            source.describe(),
            waveform.duration_secs(),
            waveform.is_canonical()
        );

        // ── 2. Recognize (degrades to empty transcript) ──────────────────
        let transcript = match self.transcriber.transcribe(&waveform) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("recognition skipped ({e}); continuing with acoustics only");
                String::new()
            }
        };

        // ── 3. Extract (degrades to zeroed features, duration kept) ──────
        let features =
            match AcousticFeatures::extract(&waveform, self.analysis.silence_threshold_db) {
                Ok(f) => f,
                Err(e) => {
                    log::warn!("feature extraction failed ({e}); substituting defaults");
                    AcousticFeatures::degraded(waveform.duration_secs())
                }
            };

        // ── 4 + 5. Derive and score ──────────────────────────────────────
        self.finish(transcript, &features)
    }

    /// Run the pure tail stages and assemble the report.
    fn finish(&self, transcript: String, features: &AcousticFeatures) -> AnalysisReport {
        let metrics =
            DerivedMetrics::derive(&transcript, features, &self.analysis.filler_phrases);
        let scores = ScoreResult::compute(&metrics, features.duration);
        AnalysisReport::assemble(transcript, &metrics, &scores)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
