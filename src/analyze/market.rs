//! Traffic rank and search-interest signals.
//!
//! `normalize_market` feeds the composite score. The remaining helpers
//! derive the columns the marketing estimator persists alongside it
//! (estimated spend, search channel, brand strength, efficiency).

use super::{non_negative, round2};
use crate::types::config::Normalization;
use crate::types::metrics::{MarketMetrics, TechStackMetrics};

/// Assumed monthly marketing spend of the rank-1 domain.
const RANK_ONE_SPEND: f64 = 1_000_000.0;
const SPEND_DECAY: f64 = 0.7;

/// Inverse rank percentile on the 0-100 scale; 0 when the rank is unknown.
pub fn rank_score(rank: Option<i64>, normalization: &Normalization) -> f64 {
    match rank {
        Some(rank) if rank > 0 => {
            (100.0 - rank as f64 / normalization.rank_universe * 100.0).max(0.0)
        }
        _ => 0.0,
    }
}

/// Mean of the most recent `trend_window` interest samples, or fewer when
/// the series is shorter. Empty series score 0.
pub fn trend_score(interest: &[f64], normalization: &Normalization) -> f64 {
    mean(recent(interest, normalization.trend_window))
}

pub fn normalize_market(market: Option<&MarketMetrics>, normalization: &Normalization) -> f64 {
    let Some(market) = market else {
        return 0.0;
    };
    let rank = rank_score(market.rank, normalization);
    let trend = trend_score(&market.interest_over_time, normalization);
    ((rank * 0.6 + trend * 0.4) / 100.0).clamp(0.0, 1.0)
}

/// Power-law spend estimate from the Tranco rank.
pub fn estimated_spend(rank: Option<i64>) -> f64 {
    match rank {
        Some(rank) if rank > 0 => round2(RANK_ONE_SPEND * (rank as f64).powf(-SPEND_DECAY)),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchChannel {
    /// Mean interest over the recent window.
    pub score: f64,
    /// Percent change against the window before it.
    pub trend: f64,
}

pub fn search_channel(interest: &[f64], normalization: &Normalization) -> SearchChannel {
    let window = normalization.trend_window.max(1);
    let recent_slice = recent(interest, window);
    let score = mean(recent_slice);

    let end = interest.len() - recent_slice.len();
    let start = end.saturating_sub(window);
    let previous = interest.get(start..end).map(mean).unwrap_or(0.0);

    let trend = if previous > 0.0 {
        round2((score - previous) / previous * 100.0)
    } else {
        0.0
    };
    SearchChannel { score, trend }
}

/// Share of rising queries that mention the brand, as a percentage.
pub fn brand_score(rising_queries: &[String]) -> f64 {
    if rising_queries.is_empty() {
        return 0.0;
    }
    let brand_terms = rising_queries
        .iter()
        .filter(|query| query.to_lowercase().contains("brand"))
        .count();
    brand_terms as f64 / rising_queries.len() as f64 * 100.0
}

/// Marketing efficiency on the 0-100 scale: rank 40%, trend 30%, tech
/// diversity 30%.
pub fn efficiency_score(
    market: Option<&MarketMetrics>,
    tech: Option<&TechStackMetrics>,
    normalization: &Normalization,
) -> f64 {
    let (rank, trend) = match market {
        Some(market) => (
            rank_score(market.rank, normalization),
            trend_score(&market.interest_over_time, normalization),
        ),
        None => (0.0, 0.0),
    };
    let diversity = super::tech::tech_diversity_score(tech, normalization);
    (rank * 0.4 + trend * 0.3 + diversity * 0.3).clamp(0.0, 100.0)
}

fn recent(values: &[f64], window: usize) -> &[f64] {
    let start = values.len().saturating_sub(window);
    values.get(start..).unwrap_or_default()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().map(non_negative).sum::<f64>() / values.len() as f64
}
