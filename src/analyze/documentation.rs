use super::curve::to_score;
use crate::types::scoring::Score;
use crate::types::signals::RepositorySignals;

pub(crate) const SHORT_README_BYTES: u64 = 500;
pub(crate) const FULL_README_BYTES: u64 = 1_500;

pub fn documentation_score(signals: &RepositorySignals) -> Score {
    let mut points = readme_points(signals);
    if signals.has_license {
        points += 10.0;
    }
    if signals.has_contributing {
        points += 5.0;
    }
    to_score(points)
}

fn readme_points(signals: &RepositorySignals) -> f64 {
    if !signals.has_readme {
        return 0.0;
    }
    match signals.readme_bytes {
        // size unknown
        0 => 85.0,
        bytes if bytes < SHORT_README_BYTES => 50.0,
        bytes if bytes < FULL_README_BYTES => 65.0,
        _ => 85.0,
    }
}
