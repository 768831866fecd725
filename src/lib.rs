//! Speech-delivery analysis for spoken interview answers.
//!
//! Takes a raw recording (WAV, MP3, WebM, …) and produces a transcript plus
//! objective delivery metrics — pace, pauses, filler usage, pitch and volume
//! stability — and two bounded quality scores (fluency, confidence).
//!
//! # Pipeline
//!
//! ```text
//! AudioSource
//!   └─▶ audio::AudioNormalizer      (canonical 16 kHz mono 16-bit PCM)
//!         ├─▶ stt::Transcriber      (transcript; empty on any failure)
//!         └─▶ analysis::AcousticFeatures
//!               └─▶ analysis::DerivedMetrics
//!                     └─▶ analysis::ScoreResult
//!                           └─▶ pipeline::AnalysisReport
//! ```
//!
//! Every stage degrades to a safe default, so `analyze` always returns a
//! complete report — broken containers, a missing recognition model, or a
//! silent clip lower the numbers, they never fail the request.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use speech_analyzer::audio::{AudioNormalizer, AudioSource, FfmpegTranscoder};
//! use speech_analyzer::config::AnalyzerConfig;
//! use speech_analyzer::pipeline::AnalysisPipeline;
//! use speech_analyzer::stt::{SpeechModel, VoskTranscriber};
//!
//! let config = AnalyzerConfig::load().unwrap();
//!
//! // Process-lifetime pieces, created once:
//! let model = SpeechModel::load("models/vosk-model-small-en-us-0.15");
//! let transcoder = Arc::new(FfmpegTranscoder::probe(&config.transcoder.ffmpeg_path).unwrap());
//!
//! let pipeline = AnalysisPipeline::new(
//!     AudioNormalizer::new(transcoder),
//!     Arc::new(VoskTranscriber::new(model)),
//!     config.analysis,
//! );
//!
//! // Per request:
//! let report = pipeline.analyze(&AudioSource::from(std::path::Path::new("answer.webm")));
//! println!("fluency {} / confidence {}", report.fluency_score, report.confidence_score);
//! ```

pub mod analysis;
pub mod audio;
pub mod config;
pub mod pipeline;
pub mod stt;
