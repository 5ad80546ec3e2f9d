use super::curve::{half_life, log_saturating, to_score};
use crate::types::scoring::Score;
use crate::types::signals::RepositorySignals;

const RECENCY_HALF_LIFE_DAYS: f64 = 90.0;
const CADENCE_SATURATION: u64 = 500;

pub fn activity_score(signals: &RepositorySignals) -> Score {
    let recency = half_life(signals.days_since_last_commit, RECENCY_HALF_LIFE_DAYS);
    let cadence = log_saturating(signals.commit_count, CADENCE_SATURATION);
    to_score(75.0 * recency + 25.0 * cadence + span_points(signals.commit_span_days))
}

/// Work spread over weeks rather than a single burst.
fn span_points(span_days: u64) -> f64 {
    match span_days {
        days if days > 30 => 10.0,
        days if days > 7 => 6.0,
        days if days > 1 => 4.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(days: u64, commits: u64) -> RepositorySignals {
        RepositorySignals {
            days_since_last_commit: days,
            commit_count: commits,
            ..RepositorySignals::default()
        }
    }

    #[test]
    fn fresh_busy_repository_scores_high() {
        assert_eq!(activity_score(&signals(1, 2_000)), 99);
        assert_eq!(activity_score(&signals(0, 500)), 100);
    }

    #[test]
    fn stale_repository_scores_low() {
        assert_eq!(activity_score(&signals(400, 3)), 9);
        assert_eq!(activity_score(&RepositorySignals::default()), 0);
    }

    #[test]
    fn never_increases_with_age() {
        let mut previous = Score::MAX;
        for days in [0, 1, 7, 30, 90, 180, 365, 1_000, 36_500] {
            let score = activity_score(&signals(days, 50));
            assert!(score <= previous, "days {days}");
            previous = score;
        }
    }

    #[test]
    fn never_decreases_with_commits() {
        let mut previous = 0;
        for commits in [0, 1, 10, 100, 1_000] {
            let score = activity_score(&signals(30, commits));
            assert!(score >= previous, "commits {commits}");
            previous = score;
        }
    }

    #[test]
    fn spread_out_history_scores_higher() {
        let mut previous = 0;
        for commit_span_days in [0, 1, 2, 8, 31, 400] {
            let signals = RepositorySignals {
                commit_span_days,
                ..signals(200, 40)
            };
            let score = activity_score(&signals);
            assert!(score >= previous, "span {commit_span_days}");
            previous = score;
        }
        let burst = activity_score(&signals(200, 40));
        assert_eq!(previous, burst + 10);
        let capped = RepositorySignals {
            commit_span_days: 90,
            ..signals(0, 5_000)
        };
        assert_eq!(activity_score(&capped), 100);
    }
}
