use crate::types::config::Normalization;
use crate::types::metrics::TechStackMetrics;

pub fn normalize_tech(tech: Option<&TechStackMetrics>, normalization: &Normalization) -> f64 {
    let Some(tech) = tech else {
        return 0.0;
    };
    let saturation = normalization.tech_saturation.max(1) as f64;
    (tech.total_tools() as f64 / saturation).min(1.0)
}

/// Persisted `tech_diversity_score` on the 0-100 scale.
pub fn tech_diversity_score(tech: Option<&TechStackMetrics>, normalization: &Normalization) -> f64 {
    normalize_tech(tech, normalization) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_stack_scores_zero() {
        let normalization = Normalization::default();
        assert_eq!(normalize_tech(None, &normalization), 0.0);
        assert_eq!(tech_diversity_score(None, &normalization), 0.0);
    }

    #[test]
    fn counts_tools_across_categories() {
        let mut stack = TechStackMetrics::with_tools("analytics", &["Google Analytics"]);
        stack.insert("advertising", &["Google AdSense", "Google Ads"]);
        stack.insert("marketing_tools", &[]);

        let normalization = Normalization::default();
        assert!((normalize_tech(Some(&stack), &normalization) - 0.6).abs() < 1e-12);
        assert!((tech_diversity_score(Some(&stack), &normalization) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn saturates_at_configured_tool_count() {
        let mut stack = TechStackMetrics::with_tools("analytics", &["a", "b", "c"]);
        stack.insert("marketing_tools", &["d", "e", "f", "g"]);

        let normalization = Normalization::default();
        assert_eq!(normalize_tech(Some(&stack), &normalization), 1.0);
        assert_eq!(tech_diversity_score(Some(&stack), &normalization), 100.0);

        let wide = Normalization {
            tech_saturation: 10,
            ..Normalization::default()
        };
        assert!((normalize_tech(Some(&stack), &wide) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn empty_stack_is_present_but_zero() {
        let stack = TechStackMetrics::default();
        assert_eq!(normalize_tech(Some(&stack), &Normalization::default()), 0.0);
    }
}
