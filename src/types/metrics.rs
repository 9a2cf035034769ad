//! Raw per-category signals as produced by the collectors.
//!
//! Every category is optional on [`CompanySignals`]: `None` means the
//! collector could not produce data, which is different from a category
//! that is present with zeroed fields. Sub-fields default to zero or empty
//! when missing, and counts are signed so that a malformed negative value
//! still deserializes and can be treated as zero by the normalizers.

use super::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubMetrics {
    #[serde(deserialize_with = "lenient::count")]
    pub stars: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub forks: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub contributors: i64,
    /// Average commits per day over the sampled window.
    #[serde(deserialize_with = "lenient::number")]
    pub commit_frequency: f64,
    /// Mean hours until the first response on closed issues.
    #[serde(deserialize_with = "lenient::number")]
    pub issue_response_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewMetrics {
    #[serde(deserialize_with = "lenient::number")]
    pub nps_score: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub review_count: i64,
    #[serde(deserialize_with = "lenient::number")]
    pub average_rating: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "lenient::optional_number")]
    pub rating: Option<f64>,
    /// Text polarity in [-1, 1], computed upstream from the review body.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub polarity: Option<f64>,
}

/// One review site's sample for a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSource {
    #[serde(deserialize_with = "lenient::text")]
    pub source: String,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_count")]
    pub review_count: Option<i64>,
    #[serde(deserialize_with = "lenient::list")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMetrics {
    /// Tranco rank; lower is more popular.
    #[serde(deserialize_with = "lenient::optional_count")]
    pub rank: Option<i64>,
    /// Search interest samples, most recent last.
    #[serde(deserialize_with = "lenient::numbers")]
    pub interest_over_time: Vec<f64>,
    #[serde(deserialize_with = "lenient::strings")]
    pub rising_queries: Vec<String>,
}

/// Detected tools keyed by tool category (analytics, advertising, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TechStackMetrics(pub BTreeMap<String, BTreeSet<String>>);

impl<'de> Deserialize<'de> for TechStackMetrics {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::tool_map(deserializer).map(TechStackMetrics)
    }
}

impl TechStackMetrics {
    pub fn total_tools(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn with_tools(category: &str, tools: &[&str]) -> Self {
        let mut stack = Self::default();
        stack.insert(category, tools);
        stack
    }

    pub fn insert(&mut self, category: &str, tools: &[&str]) {
        let entry = self.0.entry(category.to_string()).or_default();
        entry.extend(tools.iter().map(|tool| tool.to_string()));
    }
}

/// Everything the collectors managed to gather for one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySignals {
    #[serde(deserialize_with = "lenient::category")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::category")]
    pub github: Option<GitHubMetrics>,
    /// Pre-aggregated review metrics, if a collector already merged them.
    #[serde(deserialize_with = "lenient::category")]
    pub reviews: Option<ReviewMetrics>,
    #[serde(deserialize_with = "lenient::list")]
    pub review_sources: Vec<ReviewSource>,
    #[serde(alias = "marketing", deserialize_with = "lenient::category")]
    pub market: Option<MarketMetrics>,
    #[serde(deserialize_with = "lenient::category")]
    pub tech_stack: Option<TechStackMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sub_fields_default_to_zero() {
        let signals: CompanySignals = serde_json::from_str(
            r#"{
                "company": "acme",
                "github": { "stars": 10 },
                "market": {}
            }"#,
        )
        .expect("snapshot should parse");

        let github = signals.github.expect("github should be present");
        assert_eq!(github.stars, 10);
        assert_eq!(github.contributors, 0);
        assert_eq!(github.issue_response_time, 0.0);

        let market = signals.market.expect("market should be present");
        assert!(market.rank.is_none());
        assert!(market.interest_over_time.is_empty());

        assert!(signals.reviews.is_none());
        assert!(signals.tech_stack.is_none());
    }

    #[test]
    fn absent_and_null_categories_are_distinct_from_zeroed() {
        let absent: CompanySignals =
            serde_json::from_str(r#"{ "github": null }"#).expect("null should parse");
        assert!(absent.github.is_none());

        let zeroed: CompanySignals =
            serde_json::from_str(r#"{ "github": {} }"#).expect("empty object should parse");
        assert_eq!(zeroed.github, Some(GitHubMetrics::default()));
    }

    #[test]
    fn marketing_key_is_an_alias_for_market() {
        let signals: CompanySignals =
            serde_json::from_str(r#"{ "marketing": { "rank": 42 } }"#).expect("alias should parse");
        assert_eq!(signals.market.and_then(|market| market.rank), Some(42));
    }

    #[test]
    fn tech_stack_deduplicates_tool_names() {
        let stack: TechStackMetrics = serde_json::from_str(
            r#"{
                "analytics": ["Google Analytics", "Google Analytics"],
                "advertising": ["Google Ads"],
                "marketing_tools": []
            }"#,
        )
        .expect("tech stack should parse");
        assert_eq!(stack.total_tools(), 2);
    }

    #[test]
    fn null_and_mistyped_sub_fields_become_zero() {
        let signals: CompanySignals = serde_json::from_str(
            r#"{
                "github": { "stars": 10.0, "forks": "many", "issue_response_time": null },
                "reviews": { "review_count": null, "average_rating": "4.5" },
                "market": { "rank": 1234.9, "interest_over_time": [10, null, "x", 30], "rising_queries": ["a", 7] }
            }"#,
        )
        .expect("malformed sub-fields should not reject the snapshot");

        let github = signals.github.expect("github should be present");
        assert_eq!(github.stars, 10);
        assert_eq!(github.forks, 0);
        assert_eq!(github.issue_response_time, 0.0);

        let reviews = signals.reviews.expect("reviews should be present");
        assert_eq!(reviews.review_count, 0);
        assert_eq!(reviews.average_rating, 0.0);

        let market = signals.market.expect("market should be present");
        assert_eq!(market.rank, Some(1234));
        assert_eq!(market.interest_over_time, vec![10.0, 0.0, 0.0, 30.0]);
        assert_eq!(market.rising_queries, vec!["a".to_string()]);
    }

    #[test]
    fn mistyped_categories_and_records_are_dropped() {
        let signals: CompanySignals = serde_json::from_str(
            r#"{
                "company": ["acme"],
                "github": 42,
                "tech_stack": { "analytics": "Mixpanel", "advertising": ["Google Ads", 3] },
                "review_sources": [
                    "not a source",
                    { "source": 5, "review_count": 2.0, "reviews": [7, { "rating": "9", "polarity": 0.4 }] }
                ]
            }"#,
        )
        .expect("malformed categories should not reject the snapshot");

        assert!(signals.company.is_none());
        assert!(signals.github.is_none());
        let stack = signals.tech_stack.expect("tech stack should be present");
        assert_eq!(stack.total_tools(), 2);

        assert_eq!(signals.review_sources.len(), 1);
        let source = &signals.review_sources[0];
        assert_eq!(source.source, "");
        assert_eq!(source.review_count, Some(2));
        assert_eq!(
            source.reviews,
            vec![Review {
                rating: None,
                polarity: Some(0.4)
            }]
        );
    }
}
