pub mod activity;
pub mod composite;
pub mod curve;
pub mod documentation;
pub mod maturity;
pub mod popularity;
pub mod refine;
pub mod roadmap;
pub mod structure;
pub mod summary;

use crate::error::{MirrorError, Result};
use crate::extract::extract;
use crate::identifier::RepoId;
use crate::source::RepoSource;
use crate::types::config::MirrorConfig;
use crate::types::report::{AnalysisResult, Metrics};
use crate::types::scoring::{Breakdown, Category, Score, MAX_SCORE};
use crate::types::signals::RepositorySignals;
use refine::Refiner;

type Scorer = fn(&RepositorySignals) -> Score;

/// One scorer per category, in canonical order.
const SCORERS: [(Category, Scorer); 5] = [
    (Category::Documentation, documentation::documentation_score),
    (Category::Structure, structure::structure_score),
    (Category::Activity, activity::activity_score),
    (Category::Popularity, popularity::popularity_score),
    (Category::Maturity, maturity::maturity_score),
];

pub fn score_categories(signals: &RepositorySignals) -> Result<Breakdown> {
    score_with(&SCORERS, signals)
}

fn score_with(scorers: &[(Category, Scorer)], signals: &RepositorySignals) -> Result<Breakdown> {
    let mut values = [0; 5];
    for &(category, scorer) in scorers {
        let value = scorer(signals);
        if value > MAX_SCORE {
            tracing::error!(category = category.key(), value, "category score out of range");
            return Err(MirrorError::AnalysisFailure(format!(
                "{category} scorer returned {value}, outside 0..={MAX_SCORE}"
            )));
        }
        tracing::debug!(category = category.key(), value, "category scored");
        values[category.index()] = value;
    }
    Ok(Breakdown::from_values(values))
}

/// Scores normalized signals and assembles the result. Composite, roadmap
/// and summary all start from the finished breakdown.
pub fn evaluate(
    signals: &RepositorySignals,
    config: &MirrorConfig,
    refiner: Option<&dyn Refiner>,
) -> Result<AnalysisResult> {
    let breakdown = score_categories(signals)?;
    let score = composite::combine(&breakdown, &config.weights());

    let mut steps = roadmap::generate(signals, &breakdown, &config.roadmap);
    if let Some(refiner) = refiner {
        steps = refine::refine_or_keep(steps, refiner);
    }
    let summary = summary::summarize(score, &breakdown);

    Ok(AnalysisResult::new(
        score,
        breakdown,
        summary,
        Metrics::from(signals),
        steps,
    ))
}

/// Validates the identifier, fetches raw data and evaluates it. Nothing is
/// fetched for a malformed identifier.
pub fn analyze(
    identifier: &str,
    source: &dyn RepoSource,
    config: &MirrorConfig,
    refiner: Option<&dyn Refiner>,
) -> Result<AnalysisResult> {
    let id = RepoId::parse(identifier)?;
    tracing::info!(repository = %id, "fetching repository data");
    let raw = source.fetch(&id)?;

    let signals = extract(&raw);
    let result = evaluate(&signals, config, refiner)?;
    tracing::info!(
        repository = %id,
        score = result.score(),
        grade = %result.grade(),
        "analysis complete"
    );
    Ok(result)
}
