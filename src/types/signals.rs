/// Used when the last commit date cannot be established.
pub const UNKNOWN_RECENCY_DAYS: u64 = 36_500;

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    /// Fraction of source bytes, in `[0, 1]`.
    pub share: f64,
}

impl LanguageShare {
    pub fn new(name: impl Into<String>, share: f64) -> Self {
        Self {
            name: name.into(),
            share,
        }
    }
}

/// Normalized scoring input. Every field is total: missing upstream data has
/// already been replaced by the neutral value from `Default`.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySignals {
    pub file_count: u64,
    pub commit_count: u64,
    pub branch_count: u64,
    pub star_count: u64,
    pub fork_count: u64,
    pub contributor_count: u64,
    /// Sorted by share descending, then by name.
    pub languages: Vec<LanguageShare>,
    pub has_readme: bool,
    /// Zero when the size is unknown.
    pub readme_bytes: u64,
    pub has_license: bool,
    pub has_contributing: bool,
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_gitignore: bool,
    /// A top-level lint, format or build manifest such as `package.json`.
    pub has_tooling_config: bool,
    pub issues_disabled: bool,
    pub conventional_dirs: u32,
    pub days_since_last_commit: u64,
    pub sampled_commits: u64,
    pub descriptive_commits: u64,
    /// Days between the oldest and newest dated commit in the sample.
    pub commit_span_days: u64,
}

impl Default for RepositorySignals {
    fn default() -> Self {
        Self {
            file_count: 0,
            commit_count: 0,
            branch_count: 0,
            star_count: 0,
            fork_count: 0,
            contributor_count: 0,
            languages: Vec::new(),
            has_readme: false,
            readme_bytes: 0,
            has_license: false,
            has_contributing: false,
            has_tests: false,
            has_ci: false,
            has_gitignore: false,
            has_tooling_config: false,
            issues_disabled: false,
            conventional_dirs: 0,
            days_since_last_commit: UNKNOWN_RECENCY_DAYS,
            sampled_commits: 0,
            descriptive_commits: 0,
            commit_span_days: 0,
        }
    }
}

impl RepositorySignals {
    pub fn language_names(&self) -> Vec<String> {
        self.languages
            .iter()
            .map(|language| language.name.clone())
            .collect()
    }

    /// Share of sampled commits with a descriptive message, or `None`
    /// when no commits were sampled.
    pub fn descriptive_commit_ratio(&self) -> Option<f64> {
        if self.sampled_commits == 0 {
            return None;
        }
        Some(self.descriptive_commits as f64 / self.sampled_commits as f64)
    }
}
