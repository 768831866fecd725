//! Acoustic feature extraction from the canonical waveform.
//!
//! One pass over the clip produces everything the metric layer needs:
//!
//! | Feature | Method |
//! |---------|--------|
//! | `duration` | sample count / sample rate |
//! | `rms_frames` | short-time RMS energy, 2048-sample frame / 512-sample hop |
//! | `pitch_samples` | per-frame autocorrelation F0, 50–400 Hz, voiced frames only |
//! | `non_silent_intervals` | frames within a dB threshold of the loudest frame |
//! | `pause_duration` | duration − Σ non-silent interval lengths |
//!
//! The silence threshold is relative to the clip's own peak energy (default
//! 20 dB below it), so quiet recordings are not classified as one long
//! pause. An all-silent clip has no intervals and `pause_duration ==
//! duration`; a zero-length clip yields all-zero features without any
//! division by zero.
//!
//! Extraction ends with a finiteness check; a degenerate result is reported
//! as [`FeatureError::NonFinite`] and the pipeline driver substitutes
//! [`AcousticFeatures::degraded`] (duration preserved, everything else
//! zeroed) rather than letting bad numbers reach the scores.

use thiserror::Error;

use crate::audio::waveform::CanonicalWaveform;

/// Samples per analysis frame (128 ms at 16 kHz).
pub(crate) const FRAME_LEN: usize = 2_048;
/// Samples between consecutive frame starts (32 ms at 16 kHz).
pub(crate) const HOP_LEN: usize = 512;

/// Lowest fundamental frequency the pitch tracker reports, in Hz.
const PITCH_MIN_HZ: f64 = 50.0;
/// Highest fundamental frequency the pitch tracker reports, in Hz.
const PITCH_MAX_HZ: f64 = 400.0;
/// Minimum normalized autocorrelation peak for a frame to count as voiced.
const VOICING_THRESHOLD: f64 = 0.3;

// ---------------------------------------------------------------------------
// FeatureError
// ---------------------------------------------------------------------------

/// Extraction failed on a numerically degenerate signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("acoustic analysis produced non-finite values")]
    NonFinite,
}

// ---------------------------------------------------------------------------
// SpeechInterval
// ---------------------------------------------------------------------------

/// A half-open `[start, end)` time range, in seconds, where the signal is
/// above the silence threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechInterval {
    pub start: f64,
    pub end: f64,
}

impl SpeechInterval {
    /// Interval length in seconds.
    pub fn len_secs(&self) -> f64 {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// AcousticFeatures
// ---------------------------------------------------------------------------

/// The per-clip acoustic feature record.
#[derive(Debug, Clone, PartialEq)]
pub struct AcousticFeatures {
    /// Clip duration in seconds (≥ 0).
    pub duration: f64,
    /// Short-time RMS energy per frame, on the normalized `[-1, 1]` signal.
    pub rms_frames: Vec<f64>,
    /// F0 estimates for voiced frames only, in Hz.
    pub pitch_samples: Vec<f64>,
    /// Sorted, non-overlapping speech intervals.
    pub non_silent_intervals: Vec<SpeechInterval>,
    /// `duration − Σ interval lengths`, clamped to `[0, duration]`.
    pub pause_duration: f64,
}

impl AcousticFeatures {
    /// Features of a zero-length clip.
    pub fn empty() -> Self {
        Self::degraded(0.0)
    }

    /// Zeroed features with only the duration preserved.
    ///
    /// Substituted by the pipeline when extraction fails; the whole clip
    /// counts as pause.
    pub fn degraded(duration: f64) -> Self {
        Self {
            duration,
            rms_frames: Vec::new(),
            pitch_samples: Vec::new(),
            non_silent_intervals: Vec::new(),
            pause_duration: duration,
        }
    }

    /// Extract all features from `waveform`.
    ///
    /// `silence_threshold_db` is how far below the peak frame energy a frame
    /// may fall before it counts as silence (default 20.0, from
    /// [`crate::config::AnalysisConfig`]).
    pub fn extract(
        waveform: &CanonicalWaveform,
        silence_threshold_db: f64,
    ) -> Result<Self, FeatureError> {
        let duration = waveform.duration_secs();

        // Interleaved sample positions advance `rate × channels` per second;
        // normally channels == 1 and this is just the sample rate.
        let effective_rate = waveform.sample_rate() as f64 * waveform.channels() as f64;
        if waveform.is_empty() || effective_rate <= 0.0 {
            return Ok(Self::degraded(duration));
        }

        let samples = waveform.to_normalized();

        let rms_frames = short_time_rms(&samples);
        let peak = rms_frames.iter().cloned().fold(0.0_f64, f64::max);
        let threshold = peak * 10f64.powf(-silence_threshold_db / 20.0);
        let speech_mask: Vec<bool> = rms_frames.iter().map(|&r| r > threshold).collect();

        let non_silent_intervals =
            intervals_from_mask(&speech_mask, samples.len(), effective_rate);
        let speech_secs: f64 = non_silent_intervals.iter().map(SpeechInterval::len_secs).sum();
        let pause_duration = (duration - speech_secs).clamp(0.0, duration);

        let pitch_samples = pitch_contour(&samples, &speech_mask, effective_rate);

        let features = Self {
            duration,
            rms_frames,
            pitch_samples,
            non_silent_intervals,
            pause_duration,
        };

        if features.all_finite() {
            Ok(features)
        } else {
            Err(FeatureError::NonFinite)
        }
    }

    fn all_finite(&self) -> bool {
        self.duration.is_finite()
            && self.pause_duration.is_finite()
            && self.rms_frames.iter().all(|v| v.is_finite())
            && self.pitch_samples.iter().all(|v| v.is_finite())
            && self
                .non_silent_intervals
                .iter()
                .all(|i| i.start.is_finite() && i.end.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Short-time energy
// ---------------------------------------------------------------------------

/// RMS energy per frame. The final frame may be shorter than `FRAME_LEN`.
fn short_time_rms(samples: &[f32]) -> Vec<f64> {
    let mut frames = Vec::with_capacity(samples.len() / HOP_LEN + 1);
    let mut start = 0;
    while start < samples.len() {
        let end = (start + FRAME_LEN).min(samples.len());
        let frame = &samples[start..end];
        let mean_sq =
            frame.iter().map(|&s| s as f64 * s as f64).sum::<f64>() / frame.len() as f64;
        frames.push(mean_sq.sqrt());
        start += HOP_LEN;
    }
    frames
}

// ---------------------------------------------------------------------------
// Silence split
// ---------------------------------------------------------------------------

/// Group consecutive above-threshold frames into time intervals.
///
/// Interval edges sit on hop boundaries, so intervals from one mask can
/// never overlap; the last edge is clamped to the clip length.
fn intervals_from_mask(
    mask: &[bool],
    total_samples: usize,
    effective_rate: f64,
) -> Vec<SpeechInterval> {
    let to_secs = |frame_idx: usize| {
        ((frame_idx * HOP_LEN).min(total_samples)) as f64 / effective_rate
    };

    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &above) in mask.iter().enumerate() {
        match (above, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(s)) => {
                intervals.push(SpeechInterval {
                    start: to_secs(s),
                    end: to_secs(i),
                });
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = run_start {
        intervals.push(SpeechInterval {
            start: to_secs(s),
            end: total_samples as f64 / effective_rate,
        });
    }

    intervals
}

// ---------------------------------------------------------------------------
// Pitch tracking
// ---------------------------------------------------------------------------

/// F0 estimates for the frames marked as speech; unvoiced frames yield
/// nothing.
fn pitch_contour(samples: &[f32], speech_mask: &[bool], effective_rate: f64) -> Vec<f64> {
    let min_lag = ((effective_rate / PITCH_MAX_HZ).floor() as usize).max(1);
    let max_lag = (effective_rate / PITCH_MIN_HZ).ceil() as usize;

    let mut contour = Vec::new();
    for (idx, &is_speech) in speech_mask.iter().enumerate() {
        if !is_speech {
            continue;
        }
        let start = idx * HOP_LEN;
        let end = (start + FRAME_LEN).min(samples.len());
        let frame = &samples[start..end];

        // Tail frames too short to cover the longest candidate period are
        // skipped rather than estimated badly.
        if frame.len() <= max_lag {
            continue;
        }

        if let Some(f0) = autocorrelation_pitch(frame, min_lag, max_lag, effective_rate) {
            contour.push(f0);
        }
    }
    contour
}

/// Single-frame autocorrelation F0 estimate.
///
/// The frame is mean-removed, the normalized autocorrelation is scanned
/// over the candidate lag range, and the strongest peak wins; a peak below
/// [`VOICING_THRESHOLD`] means the frame is unvoiced.
fn autocorrelation_pitch(
    frame: &[f32],
    min_lag: usize,
    max_lag: usize,
    effective_rate: f64,
) -> Option<f64> {
    let n = frame.len();
    let mean = frame.iter().map(|&s| s as f64).sum::<f64>() / n as f64;
    let x: Vec<f64> = frame.iter().map(|&s| s as f64 - mean).collect();

    let energy: f64 = x.iter().map(|v| v * v).sum();
    if energy <= f64::EPSILON {
        return None;
    }

    let mut best_lag = 0usize;
    let mut best_r = 0.0f64;
    for lag in min_lag..=max_lag.min(n - 1) {
        let r = x[..n - lag]
            .iter()
            .zip(&x[lag..])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / energy;
        if r > best_r {
            best_r = r;
            best_lag = lag;
        }
    }

    if best_lag == 0 || best_r < VOICING_THRESHOLD {
        return None;
    }

    Some(effective_rate / best_lag as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
