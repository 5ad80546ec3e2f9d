//! Rule-based roadmap selection.
//!
//! Categories are visited weakest first. Each one below its floor emits the
//! templates whose conditions hold for the current signals, and always at
//! least one. When every category clears its floor the configured momentum
//! steps are returned instead, so the roadmap is never empty.

use super::documentation::{FULL_README_BYTES, SHORT_README_BYTES};
use crate::types::config::RoadmapConfig;
use crate::types::scoring::{Breakdown, Category};
use crate::types::signals::{RepositorySignals, UNKNOWN_RECENCY_DAYS};
use std::collections::HashSet;

const STALE_DAYS: u64 = 365;
const SLOW_DAYS: u64 = 90;
const THIN_HISTORY_COMMITS: u64 = 15;
const DESCRIPTIVE_RATIO_FLOOR: f64 = 0.5;
const MIN_CONVENTIONAL_DIRS: u32 = 2;
const NARROW_SPAN_DAYS: u64 = 7;

pub fn generate(
    signals: &RepositorySignals,
    breakdown: &Breakdown,
    config: &RoadmapConfig,
) -> Vec<String> {
    let mut steps = Vec::new();
    for ranked in breakdown.ranked_ascending() {
        if ranked.value >= config.floor(ranked.category) {
            continue;
        }
        let emitted = category_steps(ranked.category, signals);
        tracing::debug!(
            category = ranked.category.key(),
            value = ranked.value,
            steps = emitted.len(),
            "category below floor"
        );
        steps.extend(emitted);
    }

    let mut steps = dedupe(steps);
    if steps.is_empty() {
        steps = config.momentum.clone();
    }
    steps.truncate(config.max_steps);
    steps
}

fn category_steps(category: Category, signals: &RepositorySignals) -> Vec<String> {
    let mut steps = match category {
        Category::Documentation => documentation_steps(signals),
        Category::Structure => structure_steps(signals),
        Category::Activity => activity_steps(signals),
        Category::Popularity => popularity_steps(signals),
        Category::Maturity => maturity_steps(signals),
    };
    if steps.is_empty() {
        steps.push(fallback_step(category, signals));
    }
    steps
}

fn documentation_steps(signals: &RepositorySignals) -> Vec<String> {
    let mut steps = Vec::new();
    if !signals.has_readme {
        steps.push(
            "Add a README.md describing what the project does, how to install it, and how to use it; none was detected."
                .to_string(),
        );
    } else if signals.readme_bytes > 0 && signals.readme_bytes < SHORT_README_BYTES {
        steps.push(format!(
            "Expand the README: at {} bytes it is too short to explain installation and usage.",
            signals.readme_bytes
        ));
    } else if signals.readme_bytes >= SHORT_README_BYTES && signals.readme_bytes < FULL_README_BYTES {
        steps.push(format!(
            "Deepen the README ({} bytes) with usage examples and a quick-start section.",
            signals.readme_bytes
        ));
    }
    if !signals.has_license {
        steps.push("Add a LICENSE file so others know how they may use and share the code.".to_string());
    }
    if !signals.has_contributing {
        steps.push(
            "Add a CONTRIBUTING.md explaining how to report issues and submit changes.".to_string(),
        );
    }
    steps
}

fn structure_steps(signals: &RepositorySignals) -> Vec<String> {
    let mut steps = Vec::new();
    if signals.has_tests {
        steps.push(
            "Increase test coverage beyond the current suite, starting with untested edge cases."
                .to_string(),
        );
    } else {
        steps.push("Add automated tests; none were detected in the repository tree.".to_string());
    }
    if !signals.has_ci {
        steps.push(
            "Set up continuous integration (for example GitHub Actions) to build and test every change."
                .to_string(),
        );
    }
    if signals.conventional_dirs < MIN_CONVENTIONAL_DIRS {
        steps.push(format!(
            "Organize the {} files into conventional directories such as src/, tests/ and docs/.",
            signals.file_count
        ));
    }
    if !signals.has_gitignore {
        steps.push(
            "Add a .gitignore so build output, dependencies and local secrets stay out of version control."
                .to_string(),
        );
    }
    if !signals.has_tooling_config {
        steps.push(
            "Add lint, format and build configuration (for example package.json, pyproject.toml or Cargo.toml, plus an ESLint or rustfmt config)."
                .to_string(),
        );
    }
    steps
}

fn activity_steps(signals: &RepositorySignals) -> Vec<String> {
    let mut steps = Vec::new();
    let days = signals.days_since_last_commit;
    if days >= UNKNOWN_RECENCY_DAYS {
        steps.push(
            "Resume development with regular commits; no dated commit activity was found."
                .to_string(),
        );
    } else if days > STALE_DAYS {
        steps.push(format!(
            "Revive development: the last commit was {days} days ago. Triage open issues and ship a maintenance release."
        ));
    } else if days > SLOW_DAYS {
        steps.push(format!(
            "Resume a regular commit cadence; the last commit landed {days} days ago."
        ));
    }
    if signals.commit_count < THIN_HISTORY_COMMITS {
        steps.push(format!(
            "Build up project history with small, focused commits; only {} were found.",
            signals.commit_count
        ));
    }
    if signals.sampled_commits >= 2 && signals.commit_span_days <= NARROW_SPAN_DAYS {
        steps.push(format!(
            "Spread work across more days: the sampled commits span only {} days.",
            signals.commit_span_days
        ));
    }
    if let Some(ratio) = signals.descriptive_commit_ratio() {
        if ratio < DESCRIPTIVE_RATIO_FLOOR {
            steps.push(format!(
                "Write descriptive commit messages: only {} of the {} most recent commits explain their change.",
                signals.descriptive_commits, signals.sampled_commits
            ));
        }
    }
    steps
}

fn popularity_steps(signals: &RepositorySignals) -> Vec<String> {
    if signals.star_count == 0 {
        vec![
            "Share the project where its users gather, such as a blog post or a relevant community list; it has no stars yet."
                .to_string(),
        ]
    } else {
        vec![format!(
            "Grow visibility beyond the current {} stars with usage examples and release announcements.",
            signals.star_count
        )]
    }
}

fn maturity_steps(signals: &RepositorySignals) -> Vec<String> {
    let mut steps = Vec::new();
    if signals.branch_count <= 1 {
        steps.push(
            "Adopt a branching workflow: develop on feature branches and merge through pull requests."
                .to_string(),
        );
    }
    if signals.contributor_count <= 1 {
        steps.push(
            "Invite contributors by labelling good first issues; at most one contributor was found."
                .to_string(),
        );
    }
    if signals.issues_disabled {
        steps.push(
            "Enable the issue tracker so users can report bugs and request features.".to_string(),
        );
    }
    steps
}

fn fallback_step(category: Category, signals: &RepositorySignals) -> String {
    match category {
        Category::Documentation => {
            "Extend the documentation with architecture notes and worked examples.".to_string()
        }
        Category::Structure => {
            "Tighten the repository layout and keep build and test entry points obvious."
                .to_string()
        }
        Category::Activity => {
            "Keep a steady cadence of small commits and periodic releases.".to_string()
        }
        Category::Popularity => {
            "Showcase the project with a demo and a clear one-line pitch.".to_string()
        }
        Category::Maturity => format!(
            "Grow the maintainer group beyond {} contributors and document the release process.",
            signals.contributor_count
        ),
    }
}

fn dedupe(steps: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    steps
        .into_iter()
        .filter(|step| seen.insert(step.clone()))
        .collect()
}
