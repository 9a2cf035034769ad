use crate::error::ScoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub type Score = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Github,
    Reviews,
    #[serde(alias = "marketing")]
    Market,
    Tech,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Github,
        Category::Reviews,
        Category::Market,
        Category::Tech,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Github => "github",
            Category::Reviews => "reviews",
            Category::Market => "market",
            Category::Tech => "tech",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "github" => Some(Category::Github),
            "reviews" => Some(Category::Reviews),
            "market" | "marketing" => Some(Category::Market),
            "tech" => Some(Category::Tech),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always within [0, 100].
    pub composite_score: Score,
    /// Normalized per-category scores, each within [0, 1].
    pub sub_scores: BTreeMap<Category, Score>,
    pub contributing_categories: BTreeSet<Category>,
}

impl ScoreResult {
    pub fn zero() -> Self {
        Self {
            composite_score: 0.0,
            sub_scores: BTreeMap::new(),
            contributing_categories: BTreeSet::new(),
        }
    }

    pub fn sub_score(&self, category: Category) -> Score {
        self.sub_scores.get(&category).copied().unwrap_or(0.0)
    }
}

/// Category weights. Categories missing from the set carry no weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightSet(BTreeMap<Category, f64>);

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

impl WeightSet {
    pub fn new(weights: impl IntoIterator<Item = (Category, f64)>) -> Self {
        Self(weights.into_iter().collect())
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, weight)| (*category, *weight))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.0.is_empty() {
            return Err(ScoreError::InvalidWeights(
                "at least one category must carry weight".to_string(),
            ));
        }
        for (category, weight) in &self.0 {
            if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                return Err(ScoreError::InvalidWeights(format!(
                    "weight for {category} must be between 0.0 and 1.0 (found {weight})"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoreError::InvalidWeights(format!(
                "weights must sum to 1.0 (found {sum:.3})"
            )));
        }
        Ok(())
    }
}

/// Built-in weight sets, one per collector variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightProfile {
    /// GitHub activity, market rank/trend and tech-stack breadth.
    #[default]
    Market,
    /// GitHub activity, review sites and marketing reach.
    Reviews,
}

impl WeightProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightProfile::Market => "market",
            WeightProfile::Reviews => "reviews",
        }
    }

    pub fn weights(self) -> WeightSet {
        match self {
            WeightProfile::Market => WeightSet::new([
                (Category::Github, 0.4),
                (Category::Market, 0.3),
                (Category::Tech, 0.3),
            ]),
            WeightProfile::Reviews => WeightSet::new([
                (Category::Github, 0.4),
                (Category::Reviews, 0.3),
                (Category::Market, 0.3),
            ]),
        }
    }
}
