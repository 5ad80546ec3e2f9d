use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("invalid repository identifier: {0}")]
    InvalidIdentifier(String),

    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("repository data source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("analysis failed: {0}")]
    AnalysisFailure(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MirrorError {
    /// Failures caused by what the caller asked for, as opposed to the
    /// environment or the engine itself.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            MirrorError::InvalidIdentifier(_) | MirrorError::RepositoryNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
