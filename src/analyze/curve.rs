use crate::types::scoring::{Score, MAX_SCORE};

/// Logarithmic growth that reaches 1.0 at `saturation` and stays there.
/// Early growth moves the result much more than later growth.
pub fn log_saturating(value: u64, saturation: u64) -> f64 {
    if saturation == 0 {
        return 1.0;
    }
    let ratio = (value as f64).ln_1p() / (saturation as f64).ln_1p();
    ratio.clamp(0.0, 1.0)
}

/// Exponential decay: 1.0 at zero, 0.5 after `half_life` units.
pub fn half_life(elapsed: u64, half_life: f64) -> f64 {
    0.5_f64.powf(elapsed as f64 / half_life).clamp(0.0, 1.0)
}

pub fn to_score(points: f64) -> Score {
    if !points.is_finite() {
        return 0;
    }
    points.round().clamp(0.0, f64::from(MAX_SCORE)) as Score
}
