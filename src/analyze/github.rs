use super::{count, non_negative};
use crate::types::config::Normalization;
use crate::types::metrics::GitHubMetrics;

/// Repository activity blended into [0, 1].
///
/// The raw blend is divided by `github_scale` (1000 by default), an
/// empirical constant rather than a derived bound, so large projects hit
/// the ceiling of 1.0.
pub fn normalize_github(metrics: Option<&GitHubMetrics>, normalization: &Normalization) -> f64 {
    let Some(metrics) = metrics else {
        return 0.0;
    };

    let responsiveness = 1.0 / (non_negative(metrics.issue_response_time) + 1.0);
    let raw = count(metrics.stars) * 0.3
        + count(metrics.contributors) * 0.3
        + non_negative(metrics.commit_frequency) * 0.2
        + responsiveness * 0.2;

    (raw / normalization.github_scale).clamp(0.0, 1.0)
}
