use super::{RawRepoData, RepoSource};
use crate::error::{MirrorError, Result};
use crate::identifier::RepoId;
use std::path::{Path, PathBuf};

/// Replays a previously saved `RawRepoData` document.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RepoSource for SnapshotSource {
    fn fetch(&self, id: &RepoId) -> Result<RawRepoData> {
        tracing::info!(repo = %id, path = %self.path.display(), "loading repository snapshot");
        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            MirrorError::UpstreamUnavailable(format!(
                "cannot read snapshot {}: {err}",
                self.path.display()
            ))
        })?;
        let raw: RawRepoData = serde_json::from_str(&content).map_err(|err| {
            MirrorError::UpstreamUnavailable(format!(
                "snapshot {} is not valid repository data: {err}",
                self.path.display()
            ))
        })?;

        if let Some(full_name) = raw
            .repository
            .as_ref()
            .and_then(|repository| repository.full_name.as_deref())
        {
            if !id.matches_full_name(full_name) {
                return Err(MirrorError::RepositoryNotFound(format!(
                    "{id} (snapshot {} holds {full_name})",
                    self.path.display()
                )));
            }
        }

        Ok(raw)
    }
}

/// Writes raw data as pretty JSON so it can be replayed with [`SnapshotSource`].
pub fn write_snapshot(path: &Path, raw: &RawRepoData) -> Result<()> {
    let rendered = serde_json::to_string_pretty(raw)?;
    std::fs::write(path, rendered)?;
    Ok(())
}
