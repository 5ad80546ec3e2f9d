use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

pub type Score = u8;

pub const MAX_SCORE: Score = 100;

/// Quality dimensions, declared in canonical order. The order doubles as
/// the tie-break priority for the roadmap and the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Documentation,
    Structure,
    Activity,
    Popularity,
    Maturity,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Documentation,
        Category::Structure,
        Category::Activity,
        Category::Popularity,
        Category::Maturity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Documentation => "documentation",
            Category::Structure => "structure",
            Category::Activity => "activity",
            Category::Popularity => "popularity",
            Category::Maturity => "maturity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Documentation => "Documentation",
            Category::Structure => "Structure",
            Category::Activity => "Activity",
            Category::Popularity => "Popularity",
            Category::Maturity => "Maturity",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.key() == key)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: Category,
    pub value: Score,
}

/// One score per category, held in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown {
    scores: [CategoryScore; 5],
}

impl Breakdown {
    /// Builds a breakdown from values listed in canonical order.
    pub fn from_values(values: [Score; 5]) -> Self {
        let scores = Category::ALL.map(|category| CategoryScore {
            category,
            value: values[category.index()],
        });
        Self { scores }
    }

    pub fn get(&self, category: Category) -> Score {
        self.scores[category.index()].value
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.scores.iter()
    }

    /// Categories sorted ascending by value; equal values keep canonical order.
    pub fn ranked_ascending(&self) -> Vec<CategoryScore> {
        let mut ranked = self.scores.to_vec();
        ranked.sort_by_key(|score| (score.value, score.category));
        ranked
    }

    pub fn strongest(&self) -> CategoryScore {
        let mut best = self.scores[0];
        for score in &self.scores[1..] {
            if score.value > best.value {
                best = *score;
            }
        }
        best
    }

    pub fn weakest(&self) -> CategoryScore {
        self.ranked_ascending()[0]
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for score in &self.scores {
            map.serialize_entry(score.category.key(), &score.value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Highest threshold first. Shared with the presentation layer's colour
/// mapping, so the cut-offs must not drift.
pub const GRADE_THRESHOLDS: [(Score, Grade); 4] =
    [(85, Grade::A), (70, Grade::B), (50, Grade::C), (35, Grade::D)];

impl Grade {
    pub fn of(score: Score) -> Grade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Per-category weights indexed by canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights(pub [f64; 5]);

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        self.0[category.index()]
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self([0.25, 0.25, 0.20, 0.10, 0.20])
    }
}
