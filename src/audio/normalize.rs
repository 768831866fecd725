//! Decoding of arbitrary input audio into the canonical waveform.
//!
//! [`AudioNormalizer`] is the first pipeline stage. Whatever the source
//! container, the output is a [`CanonicalWaveform`]: mono, 16-bit, 16 kHz.
//!
//! Two decode paths:
//!
//! 1. **Native WAV** — input that `hound` can parse (8/16/24/32-bit integer
//!    or 32-bit float, any channel count and rate) is decoded in-process,
//!    downmixed and resampled. Already-canonical input is passed through
//!    sample-for-sample, so normalizing twice cannot drift.
//! 2. **Transcoding backend** — everything else (MP3, WebM, corrupt WAV, …)
//!    goes through the injected [`AudioTranscoder`], which is asked for
//!    canonical WAV bytes. The returned header is validated here; a backend
//!    that delivers a different layout yields a waveform with the actual
//!    spec recorded, which the recognizer will refuse while acoustic
//!    analysis continues.
//!
//! A failure on both paths surfaces as a [`DecodeError`]; the pipeline
//! driver maps that to the default-filled report instead of propagating.

use std::io::Cursor;
use std::sync::Arc;

use crate::audio::resample::{downmix_to_mono, resample_to_16k};
use crate::audio::source::AudioSource;
use crate::audio::transcoder::{AudioTranscoder, DecodeError};
use crate::audio::waveform::{self, CanonicalWaveform};

// ---------------------------------------------------------------------------
// AudioNormalizer
// ---------------------------------------------------------------------------

/// Turns an [`AudioSource`] into a [`CanonicalWaveform`].
pub struct AudioNormalizer {
    transcoder: Arc<dyn AudioTranscoder>,
}

impl AudioNormalizer {
    /// Create a normalizer around the injected transcoding backend.
    pub fn new(transcoder: Arc<dyn AudioTranscoder>) -> Self {
        Self { transcoder }
    }

    /// Decode `source` into the canonical format.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] when the input is not native WAV and the backend is
    /// unavailable, fails, or returns an unparseable stream. The caller
    /// (the pipeline driver) never propagates this further.
    pub fn normalize(&self, source: &AudioSource) -> Result<CanonicalWaveform, DecodeError> {
        match decode_native_wav(source) {
            Some(waveform) => {
                log::debug!(
                    "native WAV decode: {} → {} canonical samples",
                    source.describe(),
                    waveform.len()
                );
                Ok(waveform)
            }
            None => {
                log::debug!(
                    "{} is not native WAV; using transcoding backend",
                    source.describe()
                );
                let bytes = self.transcoder.transcode(source)?;
                parse_transcoded(&bytes)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Native WAV path
// ---------------------------------------------------------------------------

/// Try to decode `source` as a WAV file in-process.
///
/// Returns `None` for anything hound cannot parse (compressed containers,
/// corrupt headers, missing files) — those fall through to the backend,
/// which produces the authoritative error if it cannot handle them either.
fn decode_native_wav(source: &AudioSource) -> Option<CanonicalWaveform> {
    match source {
        AudioSource::Path(p) => {
            let reader = hound::WavReader::open(p).ok()?;
            canonicalize(reader)
        }
        AudioSource::Bytes(b) => {
            let reader = hound::WavReader::new(Cursor::new(b.as_slice())).ok()?;
            canonicalize(reader)
        }
    }
}

/// Convert a parsed WAV stream to the canonical format.
fn canonicalize<R: std::io::Read>(mut reader: hound::WavReader<R>) -> Option<CanonicalWaveform> {
    let spec = reader.spec();

    if spec.channels == 0 || spec.sample_rate == 0 || !(1..=32).contains(&spec.bits_per_sample) {
        return None;
    }

    // Pass-through for input that is already canonical: no float round trip,
    // so the samples come out bit-identical.
    if spec.sample_format == hound::SampleFormat::Int
        && spec.bits_per_sample == waveform::BITS_PER_SAMPLE
        && spec.channels == waveform::CHANNELS
        && spec.sample_rate == waveform::SAMPLE_RATE
    {
        let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>().ok()?;
        return Some(CanonicalWaveform::new(samples));
    }

    let samples = decode_to_f32(&mut reader)?;
    let mono = downmix_to_mono(&samples, spec.channels);
    let resampled = resample_to_16k(&mono, spec.sample_rate);

    Some(CanonicalWaveform::new(f32_to_i16(&resampled)))
}

/// Read all samples as normalised `f32` in `[-1.0, 1.0]`.
fn decode_to_f32<R: std::io::Read>(reader: &mut hound::WavReader<R>) -> Option<Vec<f32>> {
    let spec = reader.spec();
    match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>().ok(),
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()
                .ok()
        }
    }
}

/// Scale normalised `f32` samples back to `i16` with clamping.
fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16)
        .collect()
}

// ---------------------------------------------------------------------------
// Backend output validation
// ---------------------------------------------------------------------------

/// Parse and validate the WAV bytes a transcoding backend returned.
fn parse_transcoded(bytes: &[u8]) -> Result<CanonicalWaveform, DecodeError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| DecodeError::MalformedHeader(format!("backend output: {e}")))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.sample_rate == 0 || !(1..=32).contains(&spec.bits_per_sample) {
        return Err(DecodeError::MalformedHeader(format!(
            "backend output: {} ch / {} Hz / {} bit",
            spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    if spec.sample_format == hound::SampleFormat::Int
        && spec.bits_per_sample == waveform::BITS_PER_SAMPLE
        && spec.channels == waveform::CHANNELS
        && spec.sample_rate == waveform::SAMPLE_RATE
    {
        let samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<Result<_, _>>()
            .map_err(|e| DecodeError::MalformedHeader(format!("backend output: {e}")))?;
        return Ok(CanonicalWaveform::new(samples));
    }

    // Contract violation: the backend was asked for canonical output but
    // delivered something else. Keep the samples for acoustic analysis and
    // record the actual spec; recognition will skip this request.
    log::warn!(
        "transcoding backend returned non-canonical stream ({} ch / {} Hz / {} bit)",
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample
    );

    let samples = decode_to_f32(&mut reader)
        .ok_or_else(|| DecodeError::MalformedHeader("backend output: unreadable samples".into()))?;

    Ok(CanonicalWaveform::with_spec(
        f32_to_i16(&samples),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
