use super::merge::{weighted_mean, RatingAggregate};
use super::non_negative;
use crate::types::config::Normalization;
use crate::types::metrics::{ReviewMetrics, ReviewSource};

const PROMOTER_MIN_RATING: f64 = 9.0;
const DETRACTOR_MAX_RATING: f64 = 6.0;
const NEUTRAL_SENTIMENT: f64 = 50.0;

/// Heuristic review blend before clamping. NPS (-100..100), rating (0..10)
/// and sentiment (0..100) are mixed on their native scales and divided by
/// `review_divisor`, so the raw value can exceed 1.
pub fn review_raw(metrics: &ReviewMetrics, normalization: &Normalization) -> f64 {
    (finite_nps(metrics.nps_score) * 0.4
        + non_negative(metrics.average_rating) * 0.3
        + non_negative(metrics.sentiment_score) * 0.3)
        / normalization.review_divisor
}

pub fn normalize_reviews(metrics: Option<&ReviewMetrics>, normalization: &Normalization) -> f64 {
    metrics
        .map(|metrics| review_raw(metrics, normalization).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Net promoter score over individual ratings: promoters rate 9-10,
/// detractors 0-6.
pub fn nps_from_ratings(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total = ratings.len() as f64;
    let promoters = ratings
        .iter()
        .filter(|rating| **rating >= PROMOTER_MIN_RATING)
        .count() as f64;
    let detractors = ratings
        .iter()
        .filter(|rating| **rating <= DETRACTOR_MAX_RATING)
        .count() as f64;
    ((promoters - detractors) / total * 100.0).clamp(-100.0, 100.0)
}

/// Mean text polarity mapped from [-1, 1] onto [0, 100]; neutral 50 when
/// no review carries text.
pub fn sentiment_from_polarities(polarities: &[f64]) -> f64 {
    if polarities.is_empty() {
        return NEUTRAL_SENTIMENT;
    }
    let mean = polarities
        .iter()
        .map(|polarity| polarity.clamp(-1.0, 1.0))
        .sum::<f64>()
        / polarities.len() as f64;
    (mean + 1.0) * 50.0
}

fn source_ratings(source: &ReviewSource) -> impl Iterator<Item = f64> + '_ {
    source
        .reviews
        .iter()
        .filter_map(|review| review.rating)
        .filter(|rating| rating.is_finite())
}

fn source_polarities(source: &ReviewSource) -> impl Iterator<Item = f64> + '_ {
    source
        .reviews
        .iter()
        .filter_map(|review| review.polarity)
        .filter(|polarity| polarity.is_finite())
}

pub fn summarize_source(source: &ReviewSource) -> ReviewMetrics {
    let ratings = source_ratings(source).collect::<Vec<_>>();
    let polarities = source_polarities(source).collect::<Vec<_>>();

    let average_rating = source.rating.map(non_negative).unwrap_or_else(|| {
        if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().copied().map(non_negative).sum::<f64>() / ratings.len() as f64
        }
    });
    let review_count = source
        .review_count
        .map(|n| n.max(0))
        .unwrap_or(ratings.len() as i64);

    ReviewMetrics {
        nps_score: nps_from_ratings(&ratings),
        review_count,
        average_rating,
        sentiment_score: sentiment_from_polarities(&polarities),
    }
}

/// Collapse pre-aggregated metrics and per-site samples into one review
/// record.
///
/// Rating and count are merged count-weighted across all samples. NPS and
/// sentiment come from the individual reviews of every site pooled
/// together, so a site's headline count does not skew them and a site
/// without review text adds nothing to sentiment. Pre-aggregated NPS and
/// sentiment are blended in by their review count.
pub fn combine_reviews(
    aggregated: Option<&ReviewMetrics>,
    sources: &[ReviewSource],
) -> Option<ReviewMetrics> {
    if sources.is_empty() {
        return aggregated.cloned();
    }

    let ratings = sources.iter().flat_map(source_ratings).collect::<Vec<_>>();
    let polarities = sources.iter().flat_map(source_polarities).collect::<Vec<_>>();
    let samples = aggregated
        .map(|metrics| RatingAggregate::from_sample(metrics.average_rating, metrics.review_count))
        .into_iter()
        .chain(sources.iter().map(|source| {
            let summary = summarize_source(source);
            RatingAggregate::from_sample(summary.average_rating, summary.review_count)
        }))
        .collect::<Vec<_>>();
    let totals = match samples.as_slice() {
        [single] => *single,
        _ => RatingAggregate::fold(samples.iter().copied()),
    };

    let prior_count = |metrics: &ReviewMetrics| u64::try_from(metrics.review_count).unwrap_or(0);
    let nps_score = blend(
        aggregated.map(|metrics| (finite_nps(metrics.nps_score), prior_count(metrics))),
        nps_from_ratings(&ratings),
        ratings.len(),
    );
    let sentiment_score = blend(
        aggregated.map(|metrics| (non_negative(metrics.sentiment_score), prior_count(metrics))),
        sentiment_from_polarities(&polarities),
        polarities.len(),
    );

    Some(ReviewMetrics {
        nps_score,
        review_count: i64::try_from(totals.review_count).unwrap_or(i64::MAX),
        average_rating: totals.average_rating,
        sentiment_score,
    })
}

/// Pooled value, blended with the pre-aggregated one when there is one.
/// Whichever side has no reviews behind it defers to the other.
fn blend(prior: Option<(f64, u64)>, pooled: f64, pooled_count: usize) -> f64 {
    let pooled_count = pooled_count as u64;
    match prior {
        None => pooled,
        Some((value, _)) if pooled_count == 0 => value,
        Some((value, count)) => weighted_mean(value, count, pooled, pooled_count),
    }
}

fn finite_nps(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-100.0, 100.0)
    } else {
        0.0
    }
}
