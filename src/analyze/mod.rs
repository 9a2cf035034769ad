pub mod batch;
pub mod composite;
pub mod github;
pub mod market;
pub mod merge;
pub mod reviews;
pub mod tech;

use crate::error::{Result, ScoreError};
use crate::types::config::{Normalization, ScoringProfile};
use crate::types::metrics::CompanySignals;
use crate::types::report::{PersistedScores, ScoreReport};
use crate::types::scoring::{Category, ScoreResult};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a fail-safe scoring run.
#[derive(Debug)]
pub struct Scored {
    pub result: ScoreResult,
    /// Why the result was degraded to zero, if it was.
    pub failure: Option<ScoreError>,
}

impl Scored {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

pub fn try_score(signals: &CompanySignals, profile: &ScoringProfile) -> Result<ScoreResult> {
    profile.weights.validate()?;
    profile.normalization.validate()?;
    let normalization = &profile.normalization;

    for field in malformed_fields(signals) {
        tracing::warn!(
            company = signals.company.as_deref().unwrap_or("-"),
            field,
            "malformed metric treated as zero"
        );
    }

    let merged_reviews =
        reviews::combine_reviews(signals.reviews.as_ref(), &signals.review_sources);
    let present = [
        (
            Category::Github,
            signals
                .github
                .as_ref()
                .map(|metrics| github::normalize_github(Some(metrics), normalization)),
        ),
        (
            Category::Reviews,
            merged_reviews
                .as_ref()
                .map(|metrics| reviews::normalize_reviews(Some(metrics), normalization)),
        ),
        (
            Category::Market,
            signals
                .market
                .as_ref()
                .map(|metrics| market::normalize_market(Some(metrics), normalization)),
        ),
        (
            Category::Tech,
            signals
                .tech_stack
                .as_ref()
                .map(|stack| tech::normalize_tech(Some(stack), normalization)),
        ),
    ];

    let mut sub_scores = BTreeMap::new();
    let mut contributing_categories = BTreeSet::new();
    for (category, value) in present {
        let Some(value) = value else {
            continue;
        };
        if !value.is_finite() {
            return Err(ScoreError::NonFiniteScore {
                category: category.to_string(),
                value,
            });
        }
        tracing::debug!(%category, sub_score = value, "normalized category");
        sub_scores.insert(category, value);
        contributing_categories.insert(category);
    }

    let composite_score = composite::composite(&sub_scores, &profile.weights);
    Ok(ScoreResult {
        composite_score,
        sub_scores,
        contributing_categories,
    })
}

/// Score a company without ever failing: errors are logged and reported
/// alongside a zero result.
pub fn score(signals: &CompanySignals, profile: &ScoringProfile) -> Scored {
    match try_score(signals, profile) {
        Ok(result) => Scored {
            result,
            failure: None,
        },
        Err(error) => {
            tracing::error!(
                company = signals.company.as_deref().unwrap_or("-"),
                %error,
                "scoring failed; reporting zero score"
            );
            Scored {
                result: ScoreResult::zero(),
                failure: Some(error),
            }
        }
    }
}

pub fn build_record(
    signals: &CompanySignals,
    result: &ScoreResult,
    normalization: &Normalization,
) -> PersistedScores {
    let review_totals =
        reviews::combine_reviews(signals.reviews.as_ref(), &signals.review_sources)
            .unwrap_or_default();
    let market_metrics = signals.market.as_ref();
    let interest = market_metrics
        .map(|metrics| metrics.interest_over_time.as_slice())
        .unwrap_or_default();
    let channel = market::search_channel(interest, normalization);
    let rank = market_metrics.and_then(|metrics| metrics.rank);

    PersistedScores {
        acquisition_score: result.composite_score,
        github_score: result.sub_score(Category::Github),
        review_score: result.sub_score(Category::Reviews),
        market_score: result.sub_score(Category::Market),
        tech_score: result.sub_score(Category::Tech),
        efficiency_score: market::efficiency_score(
            market_metrics,
            signals.tech_stack.as_ref(),
            normalization,
        ),
        tech_diversity_score: tech::tech_diversity_score(
            signals.tech_stack.as_ref(),
            normalization,
        ),
        nps_score: review_totals.nps_score,
        sentiment_score: review_totals.sentiment_score,
        average_rating: review_totals.average_rating,
        review_count: review_totals.review_count.max(0),
        tranco_rank: rank.filter(|rank| *rank > 0),
        estimated_spend: market::estimated_spend(rank),
        search_interest_score: channel.score,
        trend_score: channel.trend,
        brand_score: market_metrics
            .map(|metrics| market::brand_score(&metrics.rising_queries))
            .unwrap_or(0.0),
    }
}

/// Score one company snapshot and package everything the persistence
/// layer stores for it.
pub fn evaluate_company(signals: &CompanySignals, profile: &ScoringProfile) -> Result<ScoreReport> {
    let input_sha256 = input_fingerprint(signals)?;
    let scored = score(signals, profile);
    let record = if scored.is_degraded() {
        PersistedScores::default()
    } else {
        build_record(signals, &scored.result, &profile.normalization)
    };

    Ok(ScoreReport {
        company: signals.company.clone(),
        scored_at: Utc::now().to_rfc3339(),
        profile: profile.name.clone(),
        input_sha256,
        result: scored.result,
        record,
        degraded: scored.failure.map(|error| error.to_string()),
    })
}

pub fn input_fingerprint(signals: &CompanySignals) -> Result<String> {
    let canonical = serde_json::to_vec(signals)?;
    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}

fn malformed_fields(signals: &CompanySignals) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if let Some(github) = &signals.github {
        for (field, bad) in [
            ("github.stars", github.stars < 0),
            ("github.forks", github.forks < 0),
            ("github.contributors", github.contributors < 0),
            ("github.commit_frequency", !is_non_negative(github.commit_frequency)),
            (
                "github.issue_response_time",
                !is_non_negative(github.issue_response_time),
            ),
        ] {
            if bad {
                fields.push(field);
            }
        }
    }
    if let Some(reviews) = &signals.reviews {
        for (field, bad) in [
            ("reviews.review_count", reviews.review_count < 0),
            ("reviews.average_rating", !is_non_negative(reviews.average_rating)),
            ("reviews.sentiment_score", !is_non_negative(reviews.sentiment_score)),
            ("reviews.nps_score", !reviews.nps_score.is_finite()),
        ] {
            if bad {
                fields.push(field);
            }
        }
    }
    if let Some(rank) = signals.market.as_ref().and_then(|market| market.rank) {
        if rank <= 0 {
            fields.push("market.rank");
        }
    }
    fields
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Clamp malformed (negative or non-finite) measurements to zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if is_non_negative(value) {
        value
    } else {
        0.0
    }
}

pub(crate) fn count(value: i64) -> f64 {
    value.max(0) as f64
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
