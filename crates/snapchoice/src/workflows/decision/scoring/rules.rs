use super::super::domain::Rating;

pub(crate) const URGENCY_WEIGHT: f64 = 0.35;
pub(crate) const IMPORTANCE_WEIGHT: f64 = 0.40;
pub(crate) const EASE_WEIGHT: f64 = 0.25;

/// Scores within this distance are ranked by the tie-break keys instead.
pub(crate) const TIE_TOLERANCE: f64 = 0.1;
/// Top-two gap at or below which the close-scores advisory fires.
pub(crate) const CLOSE_SCORE_GAP: f64 = 0.2;
/// Confidence never reports certainty.
pub const MAX_CONFIDENCE: u8 = 99;

/// Weighted SnapScore. Difficulty counts inverted, so easier options score higher.
pub fn calculate_score(urgency: Rating, importance: Rating, difficulty: Rating) -> f64 {
    URGENCY_WEIGHT * f64::from(urgency.value())
        + IMPORTANCE_WEIGHT * f64::from(importance.value())
        + EASE_WEIGHT * (11.0 - f64::from(difficulty.value()))
}

/// Relative lead of the winner over the runner-up, as a whole percentage.
pub fn calculate_confidence(top_score: f64, second_score: f64) -> u8 {
    if !top_score.is_finite() || top_score <= 0.0 || !second_score.is_finite() {
        return 0;
    }

    let gap = round_half_up((top_score - second_score) / top_score * 100.0);
    gap.clamp(0.0, f64::from(MAX_CONFIDENCE)) as u8
}

pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// One-decimal rendering used in user-facing text. Rounds the exact binary
/// value, so 3.15 (stored just below) prints "3.1"; only exact ties such as
/// 7.25 round away from zero.
pub fn format_score(score: f64) -> String {
    if is_exact_hundredths_tie(score) {
        let magnitude = (score.abs() * 10.0).ceil() / 10.0;
        return format!("{:.1}", magnitude.copysign(score));
    }
    format!("{:.1}", score)
}

// A value sits exactly halfway between two tenths only when it is an odd
// multiple of 0.05 that binary can hold, i.e. an odd number of quarters.
fn is_exact_hundredths_tie(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0
}
