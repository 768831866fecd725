//! Audio ingestion — source resolution, decoding and normalization.
//!
//! # Pipeline
//!
//! ```text
//! AudioSource ─▶ AudioNormalizer ─▶ CanonicalWaveform (16 kHz mono 16-bit)
//!                    │
//!                    ├─ native WAV: hound decode → downmix → resample
//!                    └─ other containers: AudioTranscoder (ffmpeg) → validate
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use speech_analyzer::audio::{AudioNormalizer, AudioSource, FfmpegTranscoder};
//!
//! let transcoder = Arc::new(FfmpegTranscoder::probe("ffmpeg").unwrap());
//! let normalizer = AudioNormalizer::new(transcoder);
//!
//! let waveform = normalizer
//!     .normalize(&AudioSource::from(std::path::Path::new("answer.webm")))
//!     .unwrap();
//! println!("{:.2}s of canonical audio", waveform.duration_secs());
//! ```

pub mod normalize;
pub mod resample;
pub mod source;
pub mod transcoder;
pub mod waveform;

pub use normalize::AudioNormalizer;
pub use resample::{downmix_to_mono, resample_to_16k};
pub use source::AudioSource;
pub use transcoder::{AudioTranscoder, DecodeError, DisabledTranscoder, FfmpegTranscoder};
pub use waveform::{CanonicalWaveform, BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
