use crate::types::report::ScoreReport;
use crate::types::scoring::Category;

pub fn to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# Acquisition Score Report\n\n");
    output.push_str(&format!(
        "Company: {}\n\n",
        report.company.as_deref().unwrap_or("unnamed")
    ));
    output.push_str(&format!(
        "Acquisition score: {:.2} (profile: {})\n\n",
        report.composite_score(),
        report.profile
    ));
    if let Some(reason) = &report.degraded {
        output.push_str(&format!("**Degraded:** {reason}\n\n"));
    }

    output.push_str("## Sub-scores\n\n");
    for category in Category::ALL {
        match report.result.sub_scores.get(&category) {
            Some(value) => output.push_str(&format!("- {category}: {value:.3}\n")),
            None => output.push_str(&format!("- {category}: absent\n")),
        }
    }
    output.push('\n');

    let record = &report.record;
    output.push_str("## Persisted Columns\n\n");
    output.push_str(&format!(
        "- efficiency_score: {:.2}\n- tech_diversity_score: {:.2}\n- nps_score: {:.2}\n- sentiment_score: {:.2}\n- average_rating: {:.2}\n- review_count: {}\n",
        record.efficiency_score,
        record.tech_diversity_score,
        record.nps_score,
        record.sentiment_score,
        record.average_rating,
        record.review_count
    ));
    match record.tranco_rank {
        Some(rank) => output.push_str(&format!("- tranco_rank: {rank}\n")),
        None => output.push_str("- tranco_rank: unknown\n"),
    }
    output.push_str(&format!(
        "- estimated_spend: {:.2}\n- search_interest_score: {:.2}\n- trend_score: {:.2}\n- brand_score: {:.2}\n\n",
        record.estimated_spend,
        record.search_interest_score,
        record.trend_score,
        record.brand_score
    ));

    output.push_str(&format!(
        "Scored at {} from input sha256 {}\n",
        report.scored_at, report.input_sha256
    ));
    output
}

pub fn batch_to_markdown(reports: &[ScoreReport]) -> String {
    let mut output = String::new();
    output.push_str("# Acquisition Score Ranking\n\n");
    if reports.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    output.push_str("| Company | Score | Profile | Status |\n");
    output.push_str("|---|---|---|---|\n");
    for report in reports {
        output.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            report.company.as_deref().unwrap_or("unnamed"),
            report.composite_score(),
            report.profile,
            if report.is_degraded() { "degraded" } else { "ok" }
        ));
    }
    output
}
