use super::curve::{log_saturating, to_score};
use crate::types::scoring::Score;
use crate::types::signals::RepositorySignals;

const CONTRIBUTOR_SATURATION: u64 = 25;
const BRANCH_SATURATION: u64 = 10;
const HISTORY_SATURATION: u64 = 1_000;

pub fn maturity_score(signals: &RepositorySignals) -> Score {
    let contributors = log_saturating(signals.contributor_count, CONTRIBUTOR_SATURATION);
    let branches = log_saturating(signals.branch_count, BRANCH_SATURATION);
    let history = log_saturating(signals.commit_count, HISTORY_SATURATION);
    to_score(45.0 * contributors + 25.0 * branches + 30.0 * history)
}
