//! Scoring helpers shared by marker hits and tail releases.

use crate::types::{MULTIPLIER_INCREMENT, STREAK_STEP};

/// Add two scores, rounding to one decimal place
///
/// Multipliers step by 0.2, so sums are kept on the tenths grid instead of
/// accumulating binary fraction error.
///
/// # Examples
///
/// ```
/// use tui_rhythm_core::scoring::rounded_sum;
///
/// assert_eq!(rounded_sum(1.2, 0.2), 1.4);
/// assert_eq!(rounded_sum(0.1, 0.2), 0.3);
/// ```
pub fn rounded_sum(a: f64, b: f64) -> f64 {
    ((a + b) * 10.0).round() / 10.0
}

/// Whether `streak` sits on a multiplier milestone (10, 20, 30, ...)
pub fn is_streak_milestone(streak: u32) -> bool {
    streak != 0 && streak % STREAK_STEP == 0
}

/// Multiplier after a scoring hit, given the streak *before* the hit
pub fn next_multiplier(multiplier: f64, streak: u32) -> f64 {
    if is_streak_milestone(streak) {
        rounded_sum(multiplier, MULTIPLIER_INCREMENT)
    } else {
        multiplier
    }
}
