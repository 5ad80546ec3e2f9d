use super::curve::{log_saturating, to_score};
use crate::types::scoring::Score;
use crate::types::signals::RepositorySignals;

const FILE_SATURATION: u64 = 200;
const MAX_COUNTED_DIRS: u32 = 3;

pub fn structure_score(signals: &RepositorySignals) -> Score {
    let mut points = 30.0 * log_saturating(signals.file_count, FILE_SATURATION);
    if signals.has_tests {
        points += 30.0;
    }
    if signals.has_ci {
        points += 25.0;
    }
    points += 5.0 * f64::from(signals.conventional_dirs.min(MAX_COUNTED_DIRS));
    if signals.has_gitignore {
        points += 5.0;
    }
    if signals.has_tooling_config {
        points += 5.0;
    }
    to_score(points)
}
