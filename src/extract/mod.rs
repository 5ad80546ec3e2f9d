//! Turns raw source data into [`RepositorySignals`].
//!
//! `extract` is total. Negative counts clamp to zero and missing values take
//! the neutral defaults from `RepositorySignals::default`. An instant that
//! cannot be parsed makes recency fall back to `UNKNOWN_RECENCY_DAYS`.

pub mod history;
pub mod tree;

use crate::source::RawRepoData;
use crate::types::signals::{LanguageShare, RepositorySignals};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub fn extract(raw: &RawRepoData) -> RepositorySignals {
    let repository = raw.repository.as_ref();
    let tree = tree::classify_tree(&raw.tree);

    let as_of = history::parse_instant(raw.fetched_at.as_deref());
    let last = history::last_activity(&raw.commits, repository);

    let commit_count = raw
        .commit_total
        .map(clamp_count)
        .unwrap_or(raw.commits.len() as u64);
    let branch_count = raw.branch_total.map(clamp_count).unwrap_or_else(|| {
        let has_default = repository
            .and_then(|repo| repo.default_branch.as_deref())
            .map(|branch| !branch.trim().is_empty())
            .unwrap_or(false);
        u64::from(has_default)
    });
    let contributor_count = raw
        .contributor_total
        .map(clamp_count)
        .unwrap_or_else(|| history::distinct_authors(&raw.commits));

    let signals = RepositorySignals {
        file_count: tree.file_count,
        commit_count,
        branch_count,
        star_count: clamp_count(repository.and_then(|repo| repo.stargazers_count).unwrap_or(0)),
        fork_count: clamp_count(repository.and_then(|repo| repo.forks_count).unwrap_or(0)),
        contributor_count,
        languages: language_shares(&raw.languages),
        has_readme: tree.has_readme,
        readme_bytes: tree.readme_bytes,
        has_license: tree.has_license,
        has_contributing: tree.has_contributing,
        has_tests: tree.has_tests,
        has_ci: tree.has_ci,
        has_gitignore: tree.has_gitignore,
        has_tooling_config: tree.has_tooling_config,
        issues_disabled: repository.and_then(|repo| repo.has_issues) == Some(false),
        conventional_dirs: tree.conventional_dirs,
        days_since_last_commit: history::days_between(as_of, last),
        sampled_commits: raw.commits.len() as u64,
        descriptive_commits: history::descriptive_commits(&raw.commits),
        commit_span_days: history::commit_span_days(&raw.commits),
    };

    tracing::debug!(
        files = signals.file_count,
        commits = signals.commit_count,
        branches = signals.branch_count,
        stars = signals.star_count,
        days_since_last_commit = signals.days_since_last_commit,
        "extracted repository signals"
    );
    signals
}

fn clamp_count(value: i64) -> u64 {
    value.max(0) as u64
}

fn language_shares(languages: &BTreeMap<String, i64>) -> Vec<LanguageShare> {
    // summed in u128 so several i64::MAX counts cannot overflow
    let total: u128 = languages
        .values()
        .map(|bytes| u128::from(clamp_count(*bytes)))
        .sum();
    let mut shares = languages
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, bytes)| {
            let share = if total == 0 {
                0.0
            } else {
                clamp_count(*bytes) as f64 / total as f64
            };
            LanguageShare::new(name.trim(), share)
        })
        .collect::<Vec<_>>();
    shares.sort_by(|left, right| {
        right
            .share
            .partial_cmp(&left.share)
            .unwrap_or(Ordering::Equal)
            .then_with(|| left.name.cmp(&right.name))
    });
    shares
}
