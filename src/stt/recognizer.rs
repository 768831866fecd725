//! Core transcription trait and the Vosk-backed implementation.
//!
//! # Overview
//!
//! [`Transcriber`] is the interface the pipeline uses. It is object-safe
//! and `Send + Sync` so it can be held behind an `Arc<dyn Transcriber>`.
//!
//! [`VoskTranscriber`] is the production implementation: one shared
//! [`SpeechModel`], one fresh recognizer session per invocation. Audio is
//! streamed in fixed 4000-sample chunks; a chunk that finalizes a segment
//! contributes its text, and a final flush after the last chunk yields the
//! trailing segment. The transcript is the space-joined concatenation of
//! all non-empty segments, in order.
//!
//! [`MockTranscriber`] (under `#[cfg(test)]`) returns a pre-configured
//! response so the pipeline can be unit-tested without model files.

use std::sync::Arc;

use thiserror::Error;
use vosk::{CompleteResult, DecodingState, Recognizer};

use crate::audio::waveform::{CanonicalWaveform, SAMPLE_RATE};
use crate::stt::model::SpeechModel;

/// Samples fed to the recognizer per call.
///
/// 4000 samples = 250 ms at 16 kHz; segments finalize on utterance
/// boundaries the engine detects between chunks.
pub const CHUNK_SAMPLES: usize = 4_000;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Reasons a transcription request is skipped.
///
/// Both variants are recovered by the pipeline driver (empty transcript,
/// acoustic analysis continues); neither reaches the analyzer's caller.
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    /// The waveform's recorded spec is not canonical PCM.
    #[error(
        "stream is not canonical PCM: {channels} ch / {sample_rate} Hz / {bits_per_sample} bit"
    )]
    MalformedStream {
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    },

    /// A recognizer session could not be created from the shared model.
    #[error("recognizer session could not be created: {0}")]
    SessionInit(String),
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-to-text.
///
/// # Contract
///
/// - An empty transcript is a valid, non-error result ("no speech
///   recognized" or "recognizer unavailable").
/// - Implementations must not share per-invocation mutable state, so
///   concurrent calls are safe against one shared model.
pub trait Transcriber: Send + Sync {
    /// Transcribe `waveform` and return the text transcript.
    fn transcribe(&self, waveform: &CanonicalWaveform) -> Result<String, TranscribeError>;
}

// Compile-time assertion: Box<dyn Transcriber> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transcriber>) {}
};

// ---------------------------------------------------------------------------
// VoskTranscriber
// ---------------------------------------------------------------------------

/// Production transcriber backed by a shared Vosk model.
#[derive(Debug)]
pub struct VoskTranscriber {
    model: Arc<SpeechModel>,
}

impl VoskTranscriber {
    /// Wrap the shared model handle.
    pub fn new(model: Arc<SpeechModel>) -> Self {
        Self { model }
    }

    /// `true` when the underlying model is loaded (not in disabled mode).
    pub fn is_enabled(&self) -> bool {
        self.model.is_available()
    }
}

impl Transcriber for VoskTranscriber {
    fn transcribe(&self, waveform: &CanonicalWaveform) -> Result<String, TranscribeError> {
        // Disabled mode: deterministic empty transcript, never an error.
        let Some(model) = self.model.vosk() else {
            log::debug!("recognizer disabled; returning empty transcript");
            return Ok(String::new());
        };

        if !waveform.is_canonical() {
            return Err(TranscribeError::MalformedStream {
                channels: waveform.channels(),
                sample_rate: waveform.sample_rate(),
                bits_per_sample: waveform.bits_per_sample(),
            });
        }

        // One independent session per invocation against the shared model.
        let mut recognizer = Recognizer::new(model, SAMPLE_RATE as f32).ok_or_else(|| {
            TranscribeError::SessionInit("vosk recognizer construction failed".into())
        })?;

        let mut segments: Vec<String> = Vec::new();

        for chunk in waveform.samples().chunks(CHUNK_SAMPLES) {
            if matches!(
                recognizer.accept_waveform(chunk),
                DecodingState::Finalized
            ) {
                push_segment(&mut segments, recognizer.result());
            }
        }

        // Final flush yields whatever the last chunks left unfinalized.
        push_segment(&mut segments, recognizer.final_result());

        Ok(join_segments(&segments))
    }
}

/// Append a finalized recognition result's text, if non-empty.
fn push_segment(segments: &mut Vec<String>, result: CompleteResult) {
    if let Some(single) = result.single() {
        let text = single.text.trim();
        if !text.is_empty() {
            segments.push(text.to_string());
        }
    }
}

/// Space-join segments in chronological order.
fn join_segments(segments: &[String]) -> String {
    segments.join(" ")
}

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a pre-configured response.
#[cfg(test)]
pub struct MockTranscriber {
    response: Result<String, TranscribeError>,
}

#[cfg(test)]
impl MockTranscriber {
    /// A mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A mock that always returns `Err(error)`.
    pub fn err(error: TranscribeError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl Transcriber for MockTranscriber {
    fn transcribe(&self, waveform: &CanonicalWaveform) -> Result<String, TranscribeError> {
        // Enforce the canonical-stream contract even in the mock so callers
        // are tested against it.
        if !waveform.is_canonical() {
            return Err(TranscribeError::MalformedStream {
                channels: waveform.channels(),
                sample_rate: waveform.sample_rate(),
                bits_per_sample: waveform.bits_per_sample(),
            });
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- disabled mode ---

    #[test]
    fn disabled_mode_returns_empty_transcript() {
        let t = VoskTranscriber::new(SpeechModel::disabled());
        assert!(!t.is_enabled());

        let waveform = CanonicalWaveform::new(vec![0i16; 16_000]);
        let transcript = t.transcribe(&waveform).expect("must not error");
        assert_eq!(transcript, "");
    }

    #[test]
    fn disabled_mode_is_deterministic_across_inputs() {
        let t = VoskTranscriber::new(SpeechModel::disabled());

        for len in [0usize, 1, 3_999, 4_000, 4_001, 80_000] {
            let waveform = CanonicalWaveform::new(vec![123i16; len]);
            assert_eq!(t.transcribe(&waveform).unwrap(), "", "len = {len}");
        }
    }

    #[test]
    fn disabled_mode_ignores_malformed_streams() {
        // Without a model there is nothing to protect; empty transcript wins.
        let t = VoskTranscriber::new(SpeechModel::disabled());
        let stereo = CanonicalWaveform::with_spec(vec![0i16; 64], 44_100, 2, 16);
        assert_eq!(t.transcribe(&stereo).unwrap(), "");
    }

    // --- MockTranscriber ---

    #[test]
    fn mock_ok_returns_configured_text() {
        let t = MockTranscriber::ok("the quick brown fox");
        let waveform = CanonicalWaveform::new(vec![0i16; 8_000]);
        assert_eq!(t.transcribe(&waveform).unwrap(), "the quick brown fox");
    }

    #[test]
    fn mock_rejects_non_canonical_stream() {
        let t = MockTranscriber::ok("text");
        let stereo = CanonicalWaveform::with_spec(vec![0i16; 64], 16_000, 2, 16);
        let err = t.transcribe(&stereo).unwrap_err();
        assert!(matches!(err, TranscribeError::MalformedStream { .. }));
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let t = MockTranscriber::err(TranscribeError::SessionInit("boom".into()));
        let waveform = CanonicalWaveform::new(vec![0i16; 64]);
        let err = t.transcribe(&waveform).unwrap_err();
        assert!(matches!(err, TranscribeError::SessionInit(_)));
    }

    // --- segment joining ---

    #[test]
    fn join_segments_space_joins_in_order() {
        let segments = vec!["tell me".to_string(), "about yourself".to_string()];
        assert_eq!(join_segments(&segments), "tell me about yourself");
    }

    #[test]
    fn join_segments_empty_is_empty_string() {
        assert_eq!(join_segments(&[]), "");
    }

    // --- object safety ---

    #[test]
    fn box_dyn_transcriber_compiles() {
        let t: Box<dyn Transcriber> = Box::new(MockTranscriber::ok("ok"));
        let waveform = CanonicalWaveform::new(vec![0i16; 64]);
        let _ = t.transcribe(&waveform);
    }

    // --- error display ---

    #[test]
    fn malformed_stream_display_reports_spec() {
        let err = TranscribeError::MalformedStream {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 24,
        };
        let msg = err.to_string();
        assert!(msg.contains('2'), "{msg}");
        assert!(msg.contains("44100"), "{msg}");
        assert!(msg.contains("24"), "{msg}");
    }

    // --- chunk size contract ---

    #[test]
    fn chunk_size_is_quarter_second_at_16k() {
        assert_eq!(CHUNK_SAMPLES, 4_000);
        assert_eq!(CHUNK_SAMPLES * 4, SAMPLE_RATE as usize);
    }
}
