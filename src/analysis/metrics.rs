//! Delivery metrics derived from the transcript and acoustic features.
//!
//! Pure functions only: transcript + [`AcousticFeatures`] in,
//! [`DerivedMetrics`] out. All values are kept at full precision here;
//! rounding to two decimals happens once, in the report layer.
//!
//! Filler counting is deliberately literal: raw substring occurrences in
//! the lower-cased transcript, overlapping matches included, partial
//! matches inside words included ("like" inside "likely" counts). The
//! fluency score contract depends on exactly this behaviour.

use crate::analysis::features::AcousticFeatures;

// ---------------------------------------------------------------------------
// DerivedMetrics
// ---------------------------------------------------------------------------

/// Speech-delivery metrics for one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Whitespace-delimited tokens in the transcript.
    pub word_count: usize,
    /// Words per minute of audio; 0 when the clip has no duration.
    pub wpm: f64,
    /// Total silence in seconds, within `[0, duration]`.
    pub pause_duration: f64,
    /// Occurrences of configured filler phrases in the transcript.
    pub filler_words: u32,
    /// Population standard deviation of the voiced pitch contour, in Hz.
    pub pitch_variance: f64,
    /// `1 − population std of the RMS energy envelope`; intentionally
    /// unclamped — values below 0.8 read as "inconsistent" downstream.
    pub volume_consistency: f64,
}

impl DerivedMetrics {
    /// Derive all metrics from one transcript + feature record.
    pub fn derive(transcript: &str, features: &AcousticFeatures, fillers: &[String]) -> Self {
        let word_count = transcript.split_whitespace().count();
        let duration = features.duration;

        let wpm = if duration > 0.0 {
            word_count as f64 / duration * 60.0
        } else {
            0.0
        };

        let lowered = transcript.to_lowercase();
        let filler_words = fillers
            .iter()
            .map(|phrase| count_occurrences(&lowered, &phrase.to_lowercase()))
            .sum::<usize>() as u32;

        Self {
            word_count,
            wpm,
            pause_duration: features.pause_duration.clamp(0.0, duration.max(0.0)),
            filler_words,
            pitch_variance: population_std(&features.pitch_samples),
            volume_consistency: 1.0 - population_std(&features.rms_frames),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Count occurrences of `needle` in `haystack`, overlapping matches
/// included. Empty needles never match.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    (0..=h.len() - n.len())
        .filter(|&i| &h[i..i + n.len()] == n)
        .count()
}

/// Population standard deviation; 0 for an empty sequence.
pub(crate) fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Round to two decimal places for presentation.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_fillers() -> Vec<String> {
        crate::config::AnalysisConfig::default().filler_phrases
    }

    fn features_with_duration(duration: f64) -> AcousticFeatures {
        AcousticFeatures::degraded(duration)
    }

    // ---- wpm ---------------------------------------------------------------

    #[test]
    fn wpm_matches_word_count_over_duration() {
        let features = features_with_duration(30.0);
        let transcript = "one two three four five six seven eight nine ten";
        let m = DerivedMetrics::derive(transcript, &features, &default_fillers());

        assert_eq!(m.word_count, 10);
        assert!((m.wpm - 20.0).abs() < 1e-9); // 10 words / 30 s × 60

        // wpm × duration / 60 ≈ word_count
        assert!((m.wpm * features.duration / 60.0 - m.word_count as f64).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_means_zero_wpm() {
        let m = DerivedMetrics::derive("some words here", &features_with_duration(0.0), &[]);
        assert_eq!(m.wpm, 0.0);
    }

    #[test]
    fn empty_transcript_means_zero_words() {
        let m = DerivedMetrics::derive("", &features_with_duration(10.0), &default_fillers());
        assert_eq!(m.word_count, 0);
        assert_eq!(m.wpm, 0.0);
        assert_eq!(m.filler_words, 0);
    }

    // ---- filler counting ---------------------------------------------------

    #[test]
    fn fillers_counted_case_insensitively() {
        let m = DerivedMetrics::derive(
            "Um, I think, UM, maybe uh yes",
            &features_with_duration(10.0),
            &default_fillers(),
        );
        // "um" ×2, "uh" ×1.
        assert_eq!(m.filler_words, 3);
    }

    #[test]
    fn partial_matches_inside_words_count() {
        // "like" appears inside "likely" and standalone — both count.
        let m = DerivedMetrics::derive(
            "it will likely work like that",
            &features_with_duration(10.0),
            &default_fillers(),
        );
        assert_eq!(m.filler_words, 2);
    }

    #[test]
    fn multi_word_phrases_count() {
        let m = DerivedMetrics::derive(
            "you know it is sort of hard you know",
            &features_with_duration(10.0),
            &default_fillers(),
        );
        // "you know" ×2, "sort of" ×1.
        assert_eq!(m.filler_words, 3);
    }

    #[test]
    fn count_occurrences_is_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 3);
        assert_eq!(count_occurrences("ababa", "aba"), 2);
    }

    #[test]
    fn count_occurrences_edge_cases() {
        assert_eq!(count_occurrences("short", "much longer needle"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
        assert_eq!(count_occurrences("", "x"), 0);
    }

    // ---- pitch variance ----------------------------------------------------

    #[test]
    fn pitch_variance_of_constant_contour_is_zero() {
        let mut features = features_with_duration(5.0);
        features.pitch_samples = vec![180.0; 40];
        let m = DerivedMetrics::derive("", &features, &[]);
        assert!(m.pitch_variance.abs() < 1e-12);
    }

    #[test]
    fn pitch_variance_of_empty_contour_is_zero() {
        let m = DerivedMetrics::derive("", &features_with_duration(5.0), &[]);
        assert_eq!(m.pitch_variance, 0.0);
    }

    #[test]
    fn pitch_variance_is_population_std() {
        let mut features = features_with_duration(5.0);
        features.pitch_samples = vec![100.0, 200.0];
        let m = DerivedMetrics::derive("", &features, &[]);
        // Population std of {100, 200} is 50.
        assert!((m.pitch_variance - 50.0).abs() < 1e-9);
    }

    // ---- volume consistency ------------------------------------------------

    #[test]
    fn steady_envelope_gives_consistency_near_one() {
        let mut features = features_with_duration(5.0);
        features.rms_frames = vec![0.3; 100];
        let m = DerivedMetrics::derive("", &features, &[]);
        assert!((m.volume_consistency - 1.0).abs() < 1e-12);
    }

    #[test]
    fn volume_consistency_can_go_negative() {
        let mut features = features_with_duration(5.0);
        // Wildly swinging envelope: std > 1 → consistency < 0. Left
        // unclamped on purpose.
        features.rms_frames = vec![0.0, 4.0, 0.0, 4.0];
        let m = DerivedMetrics::derive("", &features, &[]);
        assert!(m.volume_consistency < 0.0, "{}", m.volume_consistency);
    }

    // ---- pause clamp -------------------------------------------------------

    #[test]
    fn pause_is_clamped_to_duration() {
        let mut features = features_with_duration(2.0);
        features.pause_duration = 5.0; // inconsistent input
        let m = DerivedMetrics::derive("", &features, &[]);
        assert_eq!(m.pause_duration, 2.0);
    }

    // ---- helpers -----------------------------------------------------------

    #[test]
    fn population_std_known_values() {
        assert_eq!(population_std(&[]), 0.0);
        assert_eq!(population_std(&[5.0]), 0.0);
        assert!((population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(9.876), 9.88);
        assert_eq!(round2(-0.124), -0.12);
        assert_eq!(round2(3.0), 3.0);
    }
}
