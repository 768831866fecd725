//! Speech-to-text integration.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 Transcriber (trait)                   │
//! │                                                       │
//! │   ┌──────────────┐      ┌─────────────────┐           │
//! │   │ SpeechModel   │ Arc  │ VoskTranscriber │           │
//! │   │ load-once,    │─────▶│ session per     │           │
//! │   │ read-only     │      │ invocation      │           │
//! │   └──────────────┘      └────────┬────────┘           │
//! │                                   ▼                   │
//! │                     4000-sample chunks → segments     │
//! │                     → space-joined transcript         │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use speech_analyzer::audio::CanonicalWaveform;
//! use speech_analyzer::stt::{SpeechModel, Transcriber, VoskTranscriber};
//!
//! // Once, at startup:
//! let model = SpeechModel::load("models/vosk-model-small-en-us-0.15");
//!
//! // Per request:
//! let transcriber = VoskTranscriber::new(model);
//! let waveform = CanonicalWaveform::new(vec![0i16; 16_000]); // 1 s of silence
//! let transcript = transcriber.transcribe(&waveform).unwrap();
//! assert_eq!(transcript, ""); // silence → no segments
//! ```

pub mod model;
pub mod recognizer;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use model::SpeechModel;
pub use recognizer::{Transcriber, TranscribeError, VoskTranscriber, CHUNK_SAMPLES};

// test-only re-export so pipeline tests can import the mock without the
// full module path.
#[cfg(test)]
pub use recognizer::MockTranscriber;
