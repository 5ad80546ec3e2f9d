//! Repository data sources.
//!
//! A source turns a [`RepoId`] into [`RawRepoData`], the loosely typed shape
//! the hosting service hands back. All cleaning and defaulting happens later
//! in [`crate::extract`]; sources only decide which failures are fatal.

pub mod github;
pub mod snapshot;

use crate::error::Result;
use crate::identifier::RepoId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait RepoSource {
    fn fetch(&self, id: &RepoId) -> Result<RawRepoData>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRepoData {
    /// RFC 3339 instant the data was collected; recency is measured from it.
    pub fetched_at: Option<String>,
    pub repository: Option<RawRepository>,
    /// Most recent commits, newest first.
    pub commits: Vec<RawCommit>,
    pub commit_total: Option<i64>,
    pub branch_total: Option<i64>,
    pub contributor_total: Option<i64>,
    /// Language name to bytes of source.
    pub languages: BTreeMap<String, i64>,
    pub tree: Vec<RawTreeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRepository {
    pub full_name: Option<String>,
    pub stargazers_count: Option<i64>,
    pub forks_count: Option<i64>,
    pub has_issues: Option<bool>,
    pub pushed_at: Option<String>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommit {
    pub sha: Option<String>,
    pub commit: Option<RawCommitDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCommitDetail {
    pub message: Option<String>,
    pub author: Option<RawSignature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSignature {
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTreeEntry {
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<i64>,
}
