//! The injected codec-transcoding capability.
//!
//! The pipeline never decodes compressed containers itself: anything that is
//! not plain WAV goes through an [`AudioTranscoder`], an external backend
//! asked to deliver canonical WAV bytes (mono, 16 kHz, 16-bit PCM).
//!
//! [`FfmpegTranscoder`] is the production implementation. The ffmpeg binary
//! location comes from configuration and is probed exactly once, at
//! construction — there is no environment sniffing inside the pipeline. When
//! the probe fails the caller falls back to [`DisabledTranscoder`], which
//! turns every request into [`DecodeError::BackendUnavailable`] so the
//! pipeline degrades to its default result instead of crashing.
//!
//! Byte sources and transcode output are staged through `tempfile`
//! temporaries, which are removed when the handles drop — on success, error
//! and panic paths alike.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::audio::source::AudioSource;

// ---------------------------------------------------------------------------
// DecodeError
// ---------------------------------------------------------------------------

/// All errors that can arise while turning an [`AudioSource`] into a
/// canonical waveform.
///
/// None of these propagate to the analyzer's caller; the pipeline driver
/// converts them into the default-filled report.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The transcoding backend is missing or could not be executed.
    #[error("decoding backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend ran but could not decode the input (unsupported or
    /// corrupt container).
    #[error("transcode failed: {0}")]
    TranscodeFailed(String),

    /// The source itself could not be read (missing file, I/O error).
    #[error("unreadable audio source: {0}")]
    UnreadableSource(String),

    /// The decoded stream's header is unusable (zero channels, zero sample
    /// rate, or an unparseable WAV structure).
    #[error("malformed stream header: {0}")]
    MalformedHeader(String),
}

// ---------------------------------------------------------------------------
// AudioTranscoder trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for the external decoding backend.
///
/// # Contract
///
/// Implementations are asked for **canonical WAV bytes**: mono, 16 000 Hz,
/// 16-bit signed PCM. The normalizer validates the returned header; an
/// implementation that delivers a different layout does not break the
/// pipeline, but recognition is skipped for that request.
pub trait AudioTranscoder: Send + Sync {
    /// Decode `source` and return canonical WAV bytes.
    fn transcode(&self, source: &AudioSource) -> Result<Vec<u8>, DecodeError>;
}

// Compile-time assertion: Box<dyn AudioTranscoder> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioTranscoder>) {}
};

// ---------------------------------------------------------------------------
// FfmpegTranscoder
// ---------------------------------------------------------------------------

/// Production transcoder that shells out to ffmpeg.
///
/// Construct with [`FfmpegTranscoder::probe`], which verifies once that the
/// configured binary actually runs. Each [`transcode`] call is an
/// independent ffmpeg process; nothing is shared between invocations.
///
/// [`transcode`]: AudioTranscoder::transcode
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    /// Verify that `binary` is an executable ffmpeg and wrap it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BackendUnavailable`] when the binary cannot be
    /// spawned or exits non-zero on `-version`.
    pub fn probe(binary: impl Into<PathBuf>) -> Result<Self, DecodeError> {
        let binary = binary.into();

        let output = Command::new(&binary)
            .arg("-version")
            .output()
            .map_err(|e| {
                DecodeError::BackendUnavailable(format!("{}: {e}", binary.display()))
            })?;

        if !output.status.success() {
            return Err(DecodeError::BackendUnavailable(format!(
                "{}: probe exited with {}",
                binary.display(),
                output.status
            )));
        }

        Ok(Self { binary })
    }

    /// Run one ffmpeg pass: `input` → canonical WAV at `output`.
    fn run_ffmpeg(&self, input: &Path, output: &Path) -> Result<(), DecodeError> {
        let result = Command::new(&self.binary)
            .args(["-nostdin", "-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-ac", "1", "-ar", "16000", "-acodec", "pcm_s16le", "-f", "wav"])
            .arg(output)
            .output()
            .map_err(|e| {
                DecodeError::BackendUnavailable(format!("{}: {e}", self.binary.display()))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(DecodeError::TranscodeFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl AudioTranscoder for FfmpegTranscoder {
    fn transcode(&self, source: &AudioSource) -> Result<Vec<u8>, DecodeError> {
        // Byte sources are staged to disk for ffmpeg; the temp handle keeps
        // the file alive for the duration of the call and removes it when
        // this function returns, whatever the outcome.
        let staged_input;
        let input_path: &Path = match source {
            AudioSource::Path(p) => p,
            AudioSource::Bytes(bytes) => {
                let mut tmp = tempfile::NamedTempFile::new().map_err(|e| {
                    DecodeError::UnreadableSource(format!("staging input: {e}"))
                })?;
                tmp.write_all(bytes).map_err(|e| {
                    DecodeError::UnreadableSource(format!("staging input: {e}"))
                })?;
                staged_input = tmp;
                staged_input.path()
            }
        };

        let output = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile()
            .map_err(|e| DecodeError::UnreadableSource(format!("staging output: {e}")))?;

        self.run_ffmpeg(input_path, output.path())?;

        let bytes = std::fs::read(output.path())
            .map_err(|e| DecodeError::UnreadableSource(format!("reading output: {e}")))?;

        log::debug!(
            "transcoded {} → {} canonical WAV bytes",
            source.describe(),
            bytes.len()
        );

        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// DisabledTranscoder
// ---------------------------------------------------------------------------

/// Stand-in used when no decoding backend could be resolved at startup.
///
/// Every request fails with [`DecodeError::BackendUnavailable`], which the
/// pipeline converts into its default result. Native WAV input is still
/// analyzed normally — it never reaches the transcoder.
#[derive(Debug, Clone, Default)]
pub struct DisabledTranscoder;

impl AudioTranscoder for DisabledTranscoder {
    fn transcode(&self, source: &AudioSource) -> Result<Vec<u8>, DecodeError> {
        Err(DecodeError::BackendUnavailable(format!(
            "no decoding backend configured (input: {})",
            source.describe()
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
