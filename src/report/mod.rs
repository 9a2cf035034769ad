pub mod json;
pub mod md;

use crate::error::ScoreError;
use crate::types::report::ScoreReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn render_batch(reports: &[ScoreReport], format: OutputFormat) -> Result<String, ScoreError> {
    match format {
        OutputFormat::Json => json::batch_to_json(reports).map_err(ScoreError::Json),
        OutputFormat::Md => Ok(md::batch_to_markdown(reports)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::report::{PersistedScores, ScoreReport};
    use crate::types::scoring::{Category, ScoreResult};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn sample_report() -> ScoreReport {
        let sub_scores = BTreeMap::from([
            (Category::Github, 0.5),
            (Category::Market, 0.8),
            (Category::Tech, 0.2),
        ]);
        let contributing_categories = sub_scores.keys().copied().collect::<BTreeSet<_>>();
        ScoreReport {
            company: Some("acme".to_string()),
            scored_at: "2026-01-01T00:00:00+00:00".to_string(),
            profile: "market".to_string(),
            input_sha256: "ab".repeat(32),
            result: ScoreResult {
                composite_score: 50.0,
                sub_scores,
                contributing_categories,
            },
            record: PersistedScores {
                acquisition_score: 50.0,
                github_score: 0.5,
                market_score: 0.8,
                tech_score: 0.2,
                tranco_rank: Some(45_000),
                estimated_spend: 541.21,
                ..PersistedScores::default()
            },
            degraded: None,
        }
    }
}
