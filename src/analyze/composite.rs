use crate::types::scoring::{Category, Score, WeightSet};
use std::collections::BTreeMap;

/// Weighted blend of [0, 1] sub-scores, scaled once to [0, 100].
///
/// Categories without a sub-score contribute nothing; the remaining weights
/// are not renormalized, so a missing category lowers the ceiling.
pub fn composite(sub_scores: &BTreeMap<Category, Score>, weights: &WeightSet) -> Score {
    let blended: f64 = weights
        .iter()
        .map(|(category, weight)| sub_scores.get(&category).copied().unwrap_or(0.0) * weight)
        .sum();
    let scaled = blended * 100.0;
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::WeightProfile;

    fn scores(pairs: &[(Category, f64)]) -> BTreeMap<Category, Score> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn recovers_literal_weighted_sum() {
        let sub_scores = scores(&[
            (Category::Github, 0.5),
            (Category::Market, 0.8),
            (Category::Tech, 0.2),
        ]);
        let score = composite(&sub_scores, &WeightProfile::Market.weights());
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn no_sub_scores_is_zero() {
        assert_eq!(composite(&BTreeMap::new(), &WeightProfile::Market.weights()), 0.0);
    }

    #[test]
    fn absent_categories_are_not_renormalized() {
        let sub_scores = scores(&[(Category::Github, 1.0)]);
        let score = composite(&sub_scores, &WeightProfile::Reviews.weights());
        assert!((score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unweighted_categories_are_ignored() {
        let sub_scores = scores(&[(Category::Github, 0.5), (Category::Tech, 1.0)]);
        let score = composite(&sub_scores, &WeightProfile::Reviews.weights());
        assert!((score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_to_score_range() {
        let full = scores(&[
            (Category::Github, 1.0),
            (Category::Reviews, 1.0),
            (Category::Market, 1.0),
            (Category::Tech, 1.0),
        ]);
        let heavy = WeightSet::new([(Category::Github, 1.0), (Category::Market, 1.0)]);
        assert_eq!(composite(&full, &heavy), 100.0);

        let negative = scores(&[(Category::Github, -3.0)]);
        assert_eq!(composite(&negative, &WeightProfile::Market.weights()), 0.0);

        let nan = scores(&[(Category::Github, f64::NAN)]);
        assert_eq!(composite(&nan, &WeightProfile::Market.weights()), 0.0);
    }

    #[test]
    fn stays_in_range_over_unit_grid() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for profile in [WeightProfile::Market, WeightProfile::Reviews] {
            let weights = profile.weights();
            for github in steps {
                for market in steps {
                    for other in steps {
                        let sub_scores = scores(&[
                            (Category::Github, github),
                            (Category::Market, market),
                            (Category::Tech, other),
                            (Category::Reviews, other),
                        ]);
                        let score = composite(&sub_scores, &weights);
                        assert!((0.0..=100.0).contains(&score));
                    }
                }
            }
        }
    }
}
