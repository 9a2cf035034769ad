//! Count-weighted merging of review samples.
//!
//! Each review site reports a rating and how many reviews it is based on.
//! Samples fold into one running aggregate without keeping history:
//! `avg' = (avg*n + rating*m) / (n + m)`, `n' = n + m`.

use super::non_negative;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingAggregate {
    pub average_rating: f64,
    pub review_count: u64,
}

impl RatingAggregate {
    /// Build an aggregate from a raw sample, treating negative or
    /// non-finite values as zero.
    pub fn from_sample(rating: f64, review_count: i64) -> Self {
        Self {
            average_rating: non_negative(rating),
            review_count: u64::try_from(review_count).unwrap_or(0),
        }
    }

    pub fn merge(self, incoming: RatingAggregate) -> RatingAggregate {
        RatingAggregate {
            average_rating: weighted_mean(
                self.average_rating,
                self.review_count,
                incoming.average_rating,
                incoming.review_count,
            ),
            review_count: self.review_count.saturating_add(incoming.review_count),
        }
    }

    pub fn fold(samples: impl IntoIterator<Item = RatingAggregate>) -> RatingAggregate {
        samples
            .into_iter()
            .fold(RatingAggregate::default(), RatingAggregate::merge)
    }
}

/// Convex combination of two values. A zero-weight side is returned
/// untouched; two zero weights yield 0.
pub(crate) fn weighted_mean(left: f64, left_weight: u64, right: f64, right_weight: u64) -> f64 {
    match (left_weight, right_weight) {
        (0, 0) => 0.0,
        (_, 0) => left,
        (0, _) => right,
        (lw, rw) => {
            let (lw, rw) = (lw as f64, rw as f64);
            (left * lw + right * rw) / (lw + rw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rating: f64, n: u64) -> RatingAggregate {
        RatingAggregate {
            average_rating: rating,
            review_count: n,
        }
    }

    #[test]
    fn merge_weights_by_count() {
        let merged = sample(8.0, 30).merge(sample(6.0, 10));
        assert_eq!(merged.review_count, 40);
        assert!((merged.average_rating - 7.5).abs() < 1e-12);
    }

    #[test]
    fn merge_is_order_independent() {
        let triples = [
            (sample(9.1, 12), sample(4.5, 3), sample(7.0, 40)),
            (sample(1.0, 1), sample(10.0, 1000), sample(5.5, 7)),
            (sample(3.3, 250), sample(8.8, 251), sample(0.2, 2)),
        ];
        for (a, b, c) in triples {
            let abc = a.merge(b).merge(c);
            let acb = a.merge(c).merge(b);
            let bca = b.merge(c).merge(a);
            assert_eq!(abc.review_count, acb.review_count);
            assert!((abc.average_rating - acb.average_rating).abs() < 1e-9);
            assert!((abc.average_rating - bca.average_rating).abs() < 1e-9);
        }
    }

    #[test]
    fn merge_stays_within_input_bounds() {
        let merged = RatingAggregate::fold([sample(2.0, 5), sample(9.5, 3), sample(6.0, 11)]);
        assert!(merged.average_rating >= 2.0 && merged.average_rating <= 9.5);
        assert_eq!(merged.review_count, 19);
    }

    #[test]
    fn zero_count_sample_leaves_average_unchanged() {
        let existing = sample(7.3, 17);
        assert_eq!(existing.merge(sample(1.0, 0)), existing);
        assert_eq!(sample(1.0, 0).merge(existing), existing);
    }

    #[test]
    fn empty_merge_is_zero_not_nan() {
        let merged = sample(4.0, 0).merge(sample(9.0, 0));
        assert_eq!(merged.review_count, 0);
        assert_eq!(merged.average_rating, 0.0);
        assert_eq!(RatingAggregate::fold(Vec::<RatingAggregate>::new()), RatingAggregate::default());
    }

    #[test]
    fn from_sample_sanitizes_malformed_values() {
        assert_eq!(RatingAggregate::from_sample(-3.0, -8), RatingAggregate::default());
        assert_eq!(
            RatingAggregate::from_sample(f64::NAN, 4),
            sample(0.0, 4)
        );
    }
}
