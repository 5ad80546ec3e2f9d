use crate::source::{RawCommit, RawRepository};
use crate::types::signals::UNKNOWN_RECENCY_DAYS;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

const DESCRIPTIVE_MESSAGE_MIN_CHARS: usize = 20;

pub fn parse_instant(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

fn author_dates(commits: &[RawCommit]) -> impl Iterator<Item = DateTime<Utc>> + '_ {
    commits.iter().filter_map(|commit| {
        parse_instant(
            commit
                .commit
                .as_ref()
                .and_then(|detail| detail.author.as_ref())
                .and_then(|author| author.date.as_deref()),
        )
    })
}

/// Newest commit author date in the sample, falling back to the last push.
pub fn last_activity(
    commits: &[RawCommit],
    repository: Option<&RawRepository>,
) -> Option<DateTime<Utc>> {
    author_dates(commits)
        .max()
        .or_else(|| parse_instant(repository.and_then(|repo| repo.pushed_at.as_deref())))
}

/// Whole days between the oldest and newest dated commit; 0 with fewer
/// than two dates.
pub fn commit_span_days(commits: &[RawCommit]) -> u64 {
    let mut dates = author_dates(commits);
    let Some(first) = dates.next() else {
        return 0;
    };
    let (oldest, newest) = dates.fold((first, first), |(oldest, newest), date| {
        (oldest.min(date), newest.max(date))
    });
    (newest - oldest).num_days().max(0) as u64
}

pub fn days_between(as_of: Option<DateTime<Utc>>, last: Option<DateTime<Utc>>) -> u64 {
    match (as_of, last) {
        (Some(as_of), Some(last)) => (as_of - last).num_days().max(0) as u64,
        _ => UNKNOWN_RECENCY_DAYS,
    }
}

pub fn distinct_authors(commits: &[RawCommit]) -> u64 {
    commits
        .iter()
        .filter_map(|commit| {
            commit
                .commit
                .as_ref()
                .and_then(|detail| detail.author.as_ref())
                .and_then(|author| author.name.as_deref())
                .map(str::trim)
                .filter(|name| !name.is_empty())
        })
        .collect::<BTreeSet<_>>()
        .len() as u64
}

/// A subject line longer than a bare label that is not a stock "Update file" message.
pub fn is_descriptive_message(message: &str) -> bool {
    let subject = message.lines().next().unwrap_or_default().trim();
    subject.chars().count() > DESCRIPTIVE_MESSAGE_MIN_CHARS && !subject.starts_with("Update ")
}

pub fn descriptive_commits(commits: &[RawCommit]) -> u64 {
    commits
        .iter()
        .filter_map(|commit| commit.commit.as_ref()?.message.as_deref())
        .filter(|message| is_descriptive_message(message))
        .count() as u64
}
