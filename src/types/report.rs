use crate::types::scoring::{Score, ScoreResult};
use chrono::Utc;
use serde::Serialize;

/// Column values handed to the persistence layer, one field per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersistedScores {
    pub acquisition_score: Score,
    pub github_score: Score,
    pub review_score: Score,
    pub market_score: Score,
    pub tech_score: Score,
    pub efficiency_score: f64,
    pub tech_diversity_score: f64,
    pub nps_score: f64,
    pub sentiment_score: f64,
    pub average_rating: f64,
    pub review_count: i64,
    pub tranco_rank: Option<i64>,
    pub estimated_spend: f64,
    pub search_interest_score: f64,
    pub trend_score: f64,
    pub brand_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub company: Option<String>,
    pub scored_at: String,
    pub profile: String,
    /// SHA-256 of the canonical JSON form of the input snapshot.
    pub input_sha256: String,
    pub result: ScoreResult,
    pub record: PersistedScores,
    /// Set when scoring failed and the result was degraded to zero.
    pub degraded: Option<String>,
}

impl ScoreReport {
    /// Zero-score report for input that could not be turned into signals.
    pub fn unreadable(company: Option<String>, profile: &str, reason: String) -> Self {
        Self {
            company,
            scored_at: Utc::now().to_rfc3339(),
            profile: profile.to_string(),
            input_sha256: String::new(),
            result: ScoreResult::zero(),
            record: PersistedScores::default(),
            degraded: Some(reason),
        }
    }

    pub fn composite_score(&self) -> Score {
        self.result.composite_score
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}
