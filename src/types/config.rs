use crate::error::MirrorError;
use crate::types::scoring::{Category, CategoryWeights, Score, MAX_SCORE};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

pub const DEFAULT_FLOOR: Score = 70;
pub const DEFAULT_MAX_STEPS: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub scoring: ScoringConfig,
    pub roadmap: RoadmapConfig,
    pub source: SourceConfig,
    pub refine: RefineConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// When present, must name every category exactly once.
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    pub max_steps: usize,
    pub momentum: Vec<String>,
    /// Per-category overrides of the actionability floor.
    pub floors: BTreeMap<String, Score>,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            momentum: default_momentum(),
            floors: BTreeMap::new(),
        }
    }
}

fn default_momentum() -> Vec<String> {
    vec![
        "Keep dependencies current with automated update tooling such as Dependabot or Renovate."
            .to_string(),
        "Publish tagged releases with changelogs so users can follow what changed.".to_string(),
        "Keep the momentum: respond to issues and review contributions promptly.".to_string(),
    ]
}

impl RoadmapConfig {
    pub fn floor(&self, category: Category) -> Score {
        self.floors
            .get(category.key())
            .copied()
            .unwrap_or(DEFAULT_FLOOR)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: format!("repo-mirror/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 20,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "claude".to_string(),
            args: vec!["--print".to_string()],
            timeout_secs: 60,
        }
    }
}

impl RefineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl MirrorConfig {
    pub fn weights(&self) -> CategoryWeights {
        let defaults = CategoryWeights::default();
        match &self.scoring.weights {
            Some(weights) => CategoryWeights(Category::ALL.map(|category| {
                weights
                    .get(category.key())
                    .copied()
                    .unwrap_or_else(|| defaults.get(category))
            })),
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), MirrorError> {
        if let Some(weights) = &self.scoring.weights {
            validate_weights(weights)?;
        }

        let unknown_floors = unknown_keys(self.roadmap.floors.keys());
        if !unknown_floors.is_empty() {
            return Err(MirrorError::ConfigParse(format!(
                "roadmap.floors contains unknown key(s): {}",
                unknown_floors.join(", ")
            )));
        }
        if let Some((key, floor)) = self
            .roadmap
            .floors
            .iter()
            .find(|(_, floor)| **floor > MAX_SCORE)
        {
            return Err(MirrorError::ConfigParse(format!(
                "roadmap.floors.{key} must be between 0 and 100 (found {floor})"
            )));
        }

        if self.roadmap.max_steps == 0 {
            return Err(MirrorError::ConfigParse(
                "roadmap.max_steps must be greater than 0".to_string(),
            ));
        }
        if self.roadmap.momentum.is_empty() {
            return Err(MirrorError::ConfigParse(
                "roadmap.momentum must contain at least one step".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for step in &self.roadmap.momentum {
            let normalized = step.trim();
            if normalized.is_empty() {
                return Err(MirrorError::ConfigParse(
                    "roadmap.momentum entries must be non-empty".to_string(),
                ));
            }
            if !seen.insert(normalized) {
                return Err(MirrorError::ConfigParse(format!(
                    "roadmap.momentum contains duplicate step: {normalized}"
                )));
            }
        }

        if !self.source.api_url.starts_with("http://") && !self.source.api_url.starts_with("https://")
        {
            return Err(MirrorError::ConfigParse(format!(
                "source.api_url must be an http(s) URL (found {:?})",
                self.source.api_url
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(MirrorError::ConfigParse(
                "source.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.refine.enabled && self.refine.command.trim().is_empty() {
            return Err(MirrorError::ConfigParse(
                "refine.command cannot be empty when refine.enabled = true".to_string(),
            ));
        }
        if self.refine.timeout_secs == 0 {
            return Err(MirrorError::ConfigParse(
                "refine.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn unknown_keys<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<String> {
    keys.filter(|key| Category::from_key(key).is_none())
        .cloned()
        .collect()
}

fn validate_weights(weights: &BTreeMap<String, f64>) -> Result<(), MirrorError> {
    let unknown = unknown_keys(weights.keys());
    if !unknown.is_empty() {
        return Err(MirrorError::ConfigParse(format!(
            "scoring.weights contains unknown key(s): {}",
            unknown.join(", ")
        )));
    }

    let missing = Category::ALL
        .iter()
        .filter(|category| !weights.contains_key(category.key()))
        .map(|category| category.key())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(MirrorError::ConfigParse(format!(
            "scoring.weights is missing key(s): {}",
            missing.join(", ")
        )));
    }

    if weights
        .values()
        .any(|weight| !weight.is_finite() || *weight < 0.0)
    {
        return Err(MirrorError::ConfigParse(
            "scoring.weights values must be non-negative".to_string(),
        ));
    }
    let weight_sum: f64 = weights.values().sum();
    if (weight_sum - 1.0).abs() > 0.001 {
        return Err(MirrorError::ConfigParse(format!(
            "scoring.weights must sum to 1.0 (found {:.3})",
            weight_sum
        )));
    }
    Ok(())
}
