use super::curve::to_score;
use crate::types::scoring::{Breakdown, CategoryWeights, Score};

/// Weighted sum of the breakdown, rounded and clamped to `[0, 100]`.
pub fn combine(breakdown: &Breakdown, weights: &CategoryWeights) -> Score {
    let total: f64 = breakdown
        .iter()
        .map(|score| weights.get(score.category) * f64::from(score.value))
        .sum();
    to_score(total)
}
