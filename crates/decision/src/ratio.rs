//! Category scores -> studying ratio

use detection::{Category, DetectionResult};
use tracing::warn;

/// Below this combined studying + not-studying score a frame is indeterminate
const MIN_EVIDENCE: f64 = 0.01;

/// Ratio reported for indeterminate frames
const NEUTRAL_RATIO: f64 = 0.5;

/// Reduce a detection to a single studying ratio in [0, 1].
///
/// 1.0 = definitely studying, 0.0 = definitely not. An absent subject is
/// maximal distraction evidence regardless of how confident the absence is.
pub fn studying_ratio(result: &DetectionResult) -> f64 {
    if result.status == Category::Absent {
        return 0.0;
    }

    let studying = sanitize("studying", result.studying_score);
    let not_studying = sanitize("not_studying", result.not_studying_score);
    let total = studying + not_studying;
    if total < MIN_EVIDENCE {
        return NEUTRAL_RATIO;
    }
    studying / total
}

/// NaN counts as no evidence; anything else is clamped into [0, 1]
fn sanitize(name: &str, score: f64) -> f64 {
    let clean = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
    if clean != score {
        warn!("Malformed {} score {} treated as {}", name, score, clean);
    }
    clean
}
