use crate::types::report::ScoreReport;

pub fn to_json(report: &ScoreReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn batch_to_json(reports: &[ScoreReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
