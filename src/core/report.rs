use chrono::NaiveDateTime;

use crate::core::formatter::{escape_cell, format_money, format_timestamp};
use crate::core::models::cost::{DailyReport, FetchFailure};

const EMPTY_DAY: &str = "No costs recorded for today.";

/// Render the markdown document for one day's line items.
///
/// Layout:
/// ```text
/// # DigitalOcean Cost Report - 2024-03-07
///
/// | Description | Amount ($) | Duration |
/// |---|---|---|
/// | Droplet: web-server | 10.00 | 24h |
/// | **Total** | **10.00** | |
///
/// *Generated at: 2024-03-07 09:00:00*
/// ```
pub fn render_daily(provider: &str, report: &DailyReport, generated_at: &NaiveDateTime) -> String {
    let mut out = format!(
        "# {} Cost Report - {}\n\n",
        provider,
        report.date.format("%Y-%m-%d")
    );
    out.push_str(&render_items_table(report));
    out.push_str(&format!(
        "\n\n*Generated at: {}*\n",
        format_timestamp(generated_at)
    ));
    out
}

fn render_items_table(report: &DailyReport) -> String {
    if report.items.is_empty() {
        return EMPTY_DAY.to_string();
    }

    let mut lines = vec![
        "| Description | Amount ($) | Duration |".to_string(),
        "|---|---|---|".to_string(),
    ];
    for item in &report.items {
        lines.push(format!(
            "| {} | {} | {} |",
            escape_cell(&item.description),
            format_money(item.amount),
            escape_cell(item.duration.as_deref().unwrap_or("N/A"))
        ));
    }
    lines.push(format!("| **Total** | **{}** | |", format_money(report.total)));
    lines.join("\n")
}

/// Render the block recorded in the daily file when fetching fails.
pub fn render_error(provider: &str, failure: &FetchFailure) -> String {
    let at = format_timestamp(&failure.at);
    format!(
        "# {provider} Error Report - {at}\n\n```\nError Type: {}\nError Message: {}\n```\n\n*Error recorded at: {at}*\n",
        failure.kind, failure.message
    )
}
