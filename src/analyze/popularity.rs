use super::curve::{log_saturating, to_score};
use crate::types::scoring::Score;
use crate::types::signals::RepositorySignals;

const STAR_SATURATION: u64 = 1_000;
const FORK_SATURATION: u64 = 200;

/// Stars or forks, whichever shows more reach.
pub fn popularity_score(signals: &RepositorySignals) -> Score {
    let stars = log_saturating(signals.star_count, STAR_SATURATION);
    let forks = log_saturating(signals.fork_count, FORK_SATURATION);
    to_score(100.0 * stars.max(forks))
}
