use super::scoring::{Breakdown, Grade, Score};
use super::signals::RepositorySignals;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub file_count: u64,
    pub commit_count: u64,
    pub branch_count: u64,
    pub stars: u64,
    pub languages: Vec<String>,
}

impl From<&RepositorySignals> for Metrics {
    fn from(signals: &RepositorySignals) -> Self {
        Self {
            file_count: signals.file_count,
            commit_count: signals.commit_count,
            branch_count: signals.branch_count,
            stars: signals.star_count,
            languages: signals.language_names(),
        }
    }
}

/// The engine's only output. Built once by `analyze::evaluate` and never
/// mutated afterwards; the grade is derived from the score on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    score: Score,
    breakdown: Breakdown,
    summary: String,
    metrics: Metrics,
    roadmap: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(
        score: Score,
        breakdown: Breakdown,
        summary: String,
        metrics: Metrics,
        roadmap: Vec<String>,
    ) -> Self {
        Self {
            score,
            breakdown,
            summary,
            metrics,
            roadmap,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn grade(&self) -> Grade {
        Grade::of(self.score)
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn roadmap(&self) -> &[String] {
        &self.roadmap
    }
}
