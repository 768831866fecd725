//! Heuristic fluency and confidence scores.
//!
//! A deterministic, side-effect-free mapping from [`DerivedMetrics`] to two
//! scores on a 0–10 scale. The thresholds and weights below are a contract:
//! penalties apply additively, in order, and each score is clamped exactly
//! once, at the end.
//!
//! | Score | Penalty | Condition |
//! |-------|---------|-----------|
//! | fluency | −2 | wpm < 100 |
//! | fluency | −1 | wpm > 160 |
//! | fluency | −0.5 × fillers | always |
//! | confidence | −silence_ratio × 10 | silence_ratio > 0.2 |
//! | confidence | −1 | volume_consistency < 0.8 |
//! | confidence | −2 | wpm < 80 |

use crate::analysis::metrics::DerivedMetrics;

const BASE_SCORE: f64 = 10.0;

const SLOW_PACE_WPM: f64 = 100.0;
const SLOW_PACE_PENALTY: f64 = 2.0;
const RUSHED_PACE_WPM: f64 = 160.0;
const RUSHED_PACE_PENALTY: f64 = 1.0;
const FILLER_PENALTY: f64 = 0.5;

const SILENCE_RATIO_LIMIT: f64 = 0.2;
const SILENCE_PENALTY_SCALE: f64 = 10.0;
const UNEVEN_VOLUME_LIMIT: f64 = 0.8;
const UNEVEN_VOLUME_PENALTY: f64 = 1.0;
const HESITANT_PACE_WPM: f64 = 80.0;
const HESITANT_PACE_PENALTY: f64 = 2.0;

// ---------------------------------------------------------------------------
// ScoreResult
// ---------------------------------------------------------------------------

/// Bounded delivery scores for one answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    /// Pace + filler quality, in `[0, 10]`.
    pub fluency_score: f64,
    /// Silence/volume/pace steadiness, in `[0, 10]`.
    pub confidence_score: f64,
}

impl ScoreResult {
    /// Apply the scoring heuristics to one metric record.
    ///
    /// `duration` is the clip duration in seconds; with `duration == 0` the
    /// silence ratio is 0 and no division occurs.
    pub fn compute(metrics: &DerivedMetrics, duration: f64) -> Self {
        let mut fluency = BASE_SCORE;
        if metrics.wpm < SLOW_PACE_WPM {
            fluency -= SLOW_PACE_PENALTY;
        }
        if metrics.wpm > RUSHED_PACE_WPM {
            fluency -= RUSHED_PACE_PENALTY;
        }
        fluency -= FILLER_PENALTY * metrics.filler_words as f64;

        let silence_ratio = if duration > 0.0 {
            metrics.pause_duration / duration
        } else {
            0.0
        };

        let mut confidence = BASE_SCORE;
        if silence_ratio > SILENCE_RATIO_LIMIT {
            confidence -= silence_ratio * SILENCE_PENALTY_SCALE;
        }
        if metrics.volume_consistency < UNEVEN_VOLUME_LIMIT {
            confidence -= UNEVEN_VOLUME_PENALTY;
        }
        if metrics.wpm < HESITANT_PACE_WPM {
            confidence -= HESITANT_PACE_PENALTY;
        }

        Self {
            fluency_score: fluency.clamp(0.0, BASE_SCORE),
            confidence_score: confidence.clamp(0.0, BASE_SCORE),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a metric record directly; only the scored fields matter here.
    fn metrics(wpm: f64, pause: f64, fillers: u32, volume: f64) -> DerivedMetrics {
        DerivedMetrics {
            word_count: 0,
            wpm,
            pause_duration: pause,
            filler_words: fillers,
            pitch_variance: 0.0,
            volume_consistency: volume,
        }
    }

    // ---- contract scenarios ------------------------------------------------

    #[test]
    fn good_delivery_scores_high() {
        // wpm 120, 2 fillers, 10 s with 1 s pause, steady volume.
        let m = metrics(120.0, 1.0, 2, 0.9);
        let s = ScoreResult::compute(&m, 10.0);

        // fluency = 10 − 0 − 0 − 1.0
        assert!((s.fluency_score - 9.0).abs() < 1e-9, "{}", s.fluency_score);
        // confidence = 10, no penalties (ratio 0.1, volume 0.9, wpm 120)
        assert!(
            (s.confidence_score - 10.0).abs() < 1e-9,
            "{}",
            s.confidence_score
        );
    }

    #[test]
    fn slow_filler_heavy_delivery() {
        // wpm 50, 6 fillers: fluency = 10 − 2 − 3.0 = 5.0
        let m = metrics(50.0, 0.0, 6, 1.0);
        let s = ScoreResult::compute(&m, 45.0);
        assert!((s.fluency_score - 5.0).abs() < 1e-9, "{}", s.fluency_score);
    }

    #[test]
    fn halting_quiet_delivery_scores_low() {
        // 10 s with 5 s pause (ratio 0.5), volume 0.7, wpm 70:
        // confidence = 10 − 5.0 − 1 − 2 = 2.0
        let m = metrics(70.0, 5.0, 0, 0.7);
        let s = ScoreResult::compute(&m, 10.0);
        assert!(
            (s.confidence_score - 2.0).abs() < 1e-9,
            "{}",
            s.confidence_score
        );
    }

    // ---- boundaries --------------------------------------------------------

    #[test]
    fn pace_boundaries_are_strict_inequalities() {
        // Exactly 100 wpm: no slow penalty. Exactly 160: no rushed penalty.
        let s = ScoreResult::compute(&metrics(100.0, 0.0, 0, 1.0), 10.0);
        assert_eq!(s.fluency_score, 10.0);

        let s = ScoreResult::compute(&metrics(160.0, 0.0, 0, 1.0), 10.0);
        assert_eq!(s.fluency_score, 10.0);

        let s = ScoreResult::compute(&metrics(160.01, 0.0, 0, 1.0), 10.0);
        assert_eq!(s.fluency_score, 9.0);
    }

    #[test]
    fn silence_ratio_boundary_is_strict() {
        // Exactly 20% silence: no penalty.
        let s = ScoreResult::compute(&metrics(120.0, 2.0, 0, 1.0), 10.0);
        assert_eq!(s.confidence_score, 10.0);

        // Just above 20%: the penalty is the full ratio × 10.
        let s = ScoreResult::compute(&metrics(120.0, 2.5, 0, 1.0), 10.0);
        assert!((s.confidence_score - 7.5).abs() < 1e-9);
    }

    #[test]
    fn volume_boundary_is_strict() {
        let s = ScoreResult::compute(&metrics(120.0, 0.0, 0, 0.8), 10.0);
        assert_eq!(s.confidence_score, 10.0);

        let s = ScoreResult::compute(&metrics(120.0, 0.0, 0, 0.79), 10.0);
        assert_eq!(s.confidence_score, 9.0);
    }

    // ---- degenerate inputs -------------------------------------------------

    #[test]
    fn zero_duration_scores_without_division() {
        let m = metrics(0.0, 0.0, 0, 0.0);
        let s = ScoreResult::compute(&m, 0.0);

        // fluency = 10 − 2 (slow) = 8; confidence = 10 − 1 (volume) − 2 (pace).
        assert!((s.fluency_score - 8.0).abs() < 1e-9);
        assert!((s.confidence_score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_penalties_clamp_to_zero_not_below() {
        // 50 fillers alone would push fluency to −15 before clamping.
        let m = metrics(50.0, 9.5, 50, -3.0);
        let s = ScoreResult::compute(&m, 10.0);
        assert_eq!(s.fluency_score, 0.0);
        assert_eq!(s.confidence_score, 0.0);
    }

    // ---- bounded over the whole input space --------------------------------

    #[test]
    fn scores_stay_bounded_over_metric_grid() {
        // Sweep the documented input ranges: wpm ∈ [0, 400],
        // fillers ∈ [0, 50], silence_ratio ∈ [0, 1], volume ∈ [−5, 5].
        let duration = 10.0;
        for wpm_step in 0..=40 {
            let wpm = wpm_step as f64 * 10.0;
            for fillers in (0..=50).step_by(5) {
                for ratio_step in 0..=10 {
                    let pause = duration * ratio_step as f64 / 10.0;
                    for vol_step in -5..=5 {
                        let m = metrics(wpm, pause, fillers, vol_step as f64);
                        let s = ScoreResult::compute(&m, duration);
                        assert!(
                            (0.0..=10.0).contains(&s.fluency_score),
                            "fluency {} out of range for wpm={wpm} fillers={fillers}",
                            s.fluency_score
                        );
                        assert!(
                            (0.0..=10.0).contains(&s.confidence_score),
                            "confidence {} out of range for wpm={wpm} pause={pause} vol={vol_step}",
                            s.confidence_score
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let m = metrics(133.7, 2.2, 3, 0.42);
        let a = ScoreResult::compute(&m, 12.0);
        let b = ScoreResult::compute(&m, 12.0);
        assert_eq!(a, b);
    }
}
