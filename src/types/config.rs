use crate::error::ScoreError;
use crate::types::scoring::{Category, WeightProfile, WeightSet};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcqConfig {
    pub scoring: Option<ScoringConfig>,
    pub normalization: Option<NormalizationConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub profile: Option<WeightProfile>,
    /// Custom weights keyed by category name; replaces the profile's set.
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizationConfig {
    pub github_scale: Option<f64>,
    pub rank_universe: Option<f64>,
    pub trend_window: Option<usize>,
    pub tech_saturation: Option<usize>,
    pub review_divisor: Option<f64>,
}

/// Empirical scale constants used by the normalizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Divisor applied to the raw GitHub activity sum.
    pub github_scale: f64,
    /// Size of the ranked-domain universe; ranks beyond it score zero.
    pub rank_universe: f64,
    /// Number of most recent interest samples averaged into the trend.
    pub trend_window: usize,
    /// Tool count at which the tech sub-score saturates.
    pub tech_saturation: usize,
    /// Divisor applied to the raw review blend.
    pub review_divisor: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            github_scale: 1000.0,
            rank_universe: 1_000_000.0,
            trend_window: 4,
            tech_saturation: 5,
            review_divisor: 10.0,
        }
    }
}

impl Normalization {
    pub fn validate(&self) -> Result<(), ScoreError> {
        for (key, value) in [
            ("github_scale", self.github_scale),
            ("rank_universe", self.rank_universe),
            ("review_divisor", self.review_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScoreError::ConfigParse(format!(
                    "normalization.{key} must be a positive number"
                )));
            }
        }
        if self.trend_window == 0 {
            return Err(ScoreError::ConfigParse(
                "normalization.trend_window must be greater than 0".to_string(),
            ));
        }
        if self.tech_saturation == 0 {
            return Err(ScoreError::ConfigParse(
                "normalization.tech_saturation must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the engine needs to score a company.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub name: String,
    pub weights: WeightSet,
    pub normalization: Normalization,
}

impl ScoringProfile {
    pub fn builtin(profile: WeightProfile) -> Self {
        Self {
            name: profile.as_str().to_string(),
            weights: profile.weights(),
            normalization: Normalization::default(),
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::builtin(WeightProfile::default())
    }
}

impl AcqConfig {
    pub fn weight_profile(&self) -> WeightProfile {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.profile)
            .unwrap_or_default()
    }

    pub fn weights(&self) -> WeightSet {
        match self.scoring.as_ref().and_then(|scoring| scoring.weights.as_ref()) {
            Some(custom) => WeightSet::new(
                custom
                    .iter()
                    .filter_map(|(key, weight)| Category::parse(key).map(|c| (c, *weight))),
            ),
            None => self.weight_profile().weights(),
        }
    }

    pub fn normalization(&self) -> Normalization {
        let defaults = Normalization::default();
        match &self.normalization {
            Some(normalization) => Normalization {
                github_scale: normalization.github_scale.unwrap_or(defaults.github_scale),
                rank_universe: normalization.rank_universe.unwrap_or(defaults.rank_universe),
                trend_window: normalization.trend_window.unwrap_or(defaults.trend_window),
                tech_saturation: normalization
                    .tech_saturation
                    .unwrap_or(defaults.tech_saturation),
                review_divisor: normalization
                    .review_divisor
                    .unwrap_or(defaults.review_divisor),
            },
            None => defaults,
        }
    }

    /// Resolve the scoring profile. An explicit `profile_override` selects
    /// a built-in weight set and ignores configured custom weights.
    pub fn scoring_profile(
        &self,
        profile_override: Option<WeightProfile>,
    ) -> Result<ScoringProfile, ScoreError> {
        self.validate()?;
        let (name, weights) = match profile_override {
            Some(profile) => (profile.as_str().to_string(), profile.weights()),
            None => {
                let custom = self
                    .scoring
                    .as_ref()
                    .is_some_and(|scoring| scoring.weights.is_some());
                let name = if custom {
                    "custom".to_string()
                } else {
                    self.weight_profile().as_str().to_string()
                };
                (name, self.weights())
            }
        };
        Ok(ScoringProfile {
            name,
            weights,
            normalization: self.normalization(),
        })
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if let Some(custom) = self.scoring.as_ref().and_then(|scoring| scoring.weights.as_ref()) {
            let mut unknown = custom
                .keys()
                .filter(|key| Category::parse(key).is_none())
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(ScoreError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
            let mut categories = custom
                .keys()
                .filter_map(|key| Category::parse(key))
                .collect::<Vec<_>>();
            categories.sort();
            let before = categories.len();
            categories.dedup();
            if categories.len() != before {
                return Err(ScoreError::ConfigParse(
                    "scoring.weights names the same category twice".to_string(),
                ));
            }
        }

        self.weights()
            .validate()
            .map_err(|e| ScoreError::ConfigParse(format!("scoring.weights: {e}")))?;

        self.normalization().validate()?;

        Ok(())
    }
}
