//! Deviation scoring
//!
//! Maps an observed metric's deviation from its target onto a 0-100
//! posture score. The curve has two regimes with a breakpoint at the
//! deviation threshold: inside it the score decays gently from 100 to 80,
//! beyond it the score drops steeply at an exercise-specific slope.

/// Score a metric against its target, clamped to [0,100]
///
/// Within the threshold: `100 - (deviation/threshold)/5 * 100`.
/// Beyond it: `100 - (deviation - threshold) * steep_slope`, floored at 0.
pub fn deviation_score(actual: f32, target: f32, threshold: f32, steep_slope: f32) -> f32 {
    let deviation = (actual - target).abs();

    let score = if threshold > 0.0 && deviation <= threshold {
        100.0 - (deviation / threshold) / 5.0 * 100.0
    } else {
        100.0 - (deviation - threshold.max(0.0)) * steep_slope
    };

    score.clamp(0.0, 100.0)
}

/// Convex combination of per-metric scores
///
/// Weights are expected to sum to 1.0 per exercise configuration; a
/// misconfigured table is a static error and is not re-normalized here.
pub fn weighted_accuracy(scored: &[(f32, f32)]) -> f32 {
    let total: f32 = scored.iter().map(|(score, weight)| score * weight).sum();
    total.clamp(0.0, 100.0)
}
