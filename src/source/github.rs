use super::{RawCommit, RawRepoData, RawRepository, RawTreeEntry, RepoSource};
use crate::error::{MirrorError, Result};
use crate::identifier::RepoId;
use crate::types::config::SourceConfig;
use chrono::{SecondsFormat, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, LINK};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;

const COMMIT_SAMPLE_SIZE: u32 = 100;

/// Reads repository data from the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubSource {
    base_url: String,
    client: Client,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTree {
    tree: Vec<RawTreeEntry>,
    truncated: bool,
}

impl GithubSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                MirrorError::UpstreamUnavailable(format!("http client setup failed: {err}"))
            })?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn repo_url(&self, id: &RepoId, suffix: &str) -> String {
        format!("{}/repos/{}/{}{}", self.base_url, id.owner, id.name, suffix)
    }

    fn send(&self, url: &str) -> Result<Response> {
        tracing::debug!(%url, "github request");
        self.client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|err| MirrorError::UpstreamUnavailable(format!("{url}: {err}")))
    }

    /// Fetches a secondary resource. Missing data (`404`, `409` on empty
    /// repositories, other client errors) yields `None`; throttling and
    /// server errors abort the fetch.
    fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self.send(url)?;
        let status = response.status();
        if status.is_success() {
            return decode(response, url).map(Some);
        }
        if is_transient(status, response.headers()) {
            return Err(MirrorError::UpstreamUnavailable(format!(
                "{url} returned {status}"
            )));
        }
        tracing::debug!(%url, %status, "github resource unavailable, treating as empty");
        Ok(None)
    }

    /// Counts the items behind a paginated listing using one-item pages and
    /// the `rel="last"` link.
    fn count(&self, url: &str) -> Result<Option<i64>> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let url = format!("{url}{separator}per_page=1");
        let response = self.send(&url)?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Some(0));
        }
        if !status.is_success() {
            if is_transient(status, response.headers()) {
                return Err(MirrorError::UpstreamUnavailable(format!(
                    "{url} returned {status}"
                )));
            }
            tracing::debug!(%url, %status, "github listing unavailable");
            return Ok((status == StatusCode::CONFLICT).then_some(0));
        }

        let last_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(last_page_from_link);
        if let Some(pages) = last_page {
            return Ok(Some(pages));
        }
        let items: Vec<serde_json::Value> = decode(response, &url)?;
        Ok(Some(items.len() as i64))
    }
}

impl RepoSource for GithubSource {
    fn fetch(&self, id: &RepoId) -> Result<RawRepoData> {
        tracing::info!(repo = %id, "fetching repository data from github");
        let repo_url = self.repo_url(id, "");
        let response = self.send(&repo_url)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MirrorError::RepositoryNotFound(id.full_name()));
        }
        if !status.is_success() {
            return Err(MirrorError::UpstreamUnavailable(format!(
                "{repo_url} returned {status}"
            )));
        }
        let repository: RawRepository = decode(response, &repo_url)?;

        let commits: Vec<RawCommit> = self
            .get_optional(&self.repo_url(id, &format!("/commits?per_page={COMMIT_SAMPLE_SIZE}")))?
            .unwrap_or_default();
        let commit_total = self.count(&self.repo_url(id, "/commits"))?;
        let branch_total = self.count(&self.repo_url(id, "/branches"))?;
        let contributor_total = self.count(&self.repo_url(id, "/contributors"))?;
        let languages: BTreeMap<String, i64> = self
            .get_optional(&self.repo_url(id, "/languages"))?
            .unwrap_or_default();

        let tree = match repository.default_branch.as_deref() {
            Some(branch) => {
                let raw: Option<RawTree> = self
                    .get_optional(&self.repo_url(
                        id,
                        &format!("/git/trees/{}?recursive=1", encode_path_segment(branch)),
                    ))?;
                let raw = raw.unwrap_or_default();
                if raw.truncated {
                    tracing::warn!(repo = %id, entries = raw.tree.len(), "github truncated the file tree");
                }
                raw.tree
            }
            None => Vec::new(),
        };

        tracing::info!(
            repo = %id,
            commits = commits.len(),
            files = tree.len(),
            "fetched repository data"
        );

        Ok(RawRepoData {
            fetched_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            repository: Some(repository),
            commits,
            commit_total,
            branch_total,
            contributor_total,
            languages,
            tree,
        })
    }
}

fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    response.json::<T>().map_err(|err| {
        MirrorError::UpstreamUnavailable(format!("{url}: response decode failed: {err}"))
    })
}

fn is_transient(status: StatusCode, headers: &HeaderMap) -> bool {
    let rate_limited = status == StatusCode::FORBIDDEN
        && headers
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            .map(|remaining| remaining.trim() == "0")
            .unwrap_or(false);
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() || rate_limited
}

/// Percent-encodes everything outside the RFC 3986 unreserved set, `/`
/// included, so a branch name stays a single path segment.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Extracts the `page` query value of the `rel="last"` entry.
fn last_page_from_link(link: &str) -> Option<i64> {
    link.split(',')
        .find(|part| part.contains("rel=\"last\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            part.get(start..end)
        })
        .and_then(|url| url.split_once('?').map(|(_, query)| query))
        .and_then(|query| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "page")
                .and_then(|(_, value)| value.parse::<i64>().ok())
        })
}
