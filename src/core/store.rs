use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::io::Write;

use crate::core::paths::ReportPaths;
use crate::core::summary::MonthlySummary;

const ERROR_SEPARATOR: &str = "\n\n---\n\n";

/// Overwrite the daily report file.
pub fn write_daily(paths: &ReportPaths, content: &str) -> Result<()> {
    std::fs::write(&paths.daily, content)
        .with_context(|| format!("Failed to write daily report {}", paths.daily.display()))?;
    tracing::debug!(path = %paths.daily.display(), "wrote daily report");
    Ok(())
}

/// Record an error block in the daily file, after a separator if the file already has content.
pub fn append_error(paths: &ReportPaths, block: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.daily)
        .with_context(|| format!("Failed to open {}", paths.daily.display()))?;
    let has_content = file
        .metadata()
        .with_context(|| format!("Failed to stat {}", paths.daily.display()))?
        .len()
        > 0;
    let mut out = String::with_capacity(ERROR_SEPARATOR.len() + block.len());
    if has_content {
        out.push_str(ERROR_SEPARATOR);
    }
    out.push_str(block);
    file.write_all(out.as_bytes())
        .with_context(|| format!("Failed to append error to {}", paths.daily.display()))?;
    tracing::debug!(path = %paths.daily.display(), has_content, "recorded error block");
    Ok(())
}

/// Load the month's summary; a missing file starts an empty month.
pub fn load_summary(paths: &ReportPaths, date: NaiveDate) -> Result<MonthlySummary> {
    if !paths.summary.exists() {
        return Ok(MonthlySummary::empty(date.year(), date.month()));
    }
    let content = std::fs::read_to_string(&paths.summary)
        .with_context(|| format!("Failed to read {}", paths.summary.display()))?;
    Ok(MonthlySummary::parse(date.year(), date.month(), &content))
}

/// Upsert `total` as the cost for `date` and rewrite the summary file.
pub fn update_summary(
    paths: &ReportPaths,
    date: NaiveDate,
    total: Decimal,
    provider: &str,
    now: &NaiveDateTime,
) -> Result<MonthlySummary> {
    let mut summary = load_summary(paths, date)?;
    if summary.is_empty() {
        tracing::info!(path = %paths.summary.display(), "starting monthly summary");
    }
    if let Some(previous) = summary.cost_for(date.day()) {
        tracing::info!(day = date.day(), %previous, %total, "replacing existing summary row");
    }
    summary.upsert(date.day(), total);
    std::fs::write(&paths.summary, summary.render(provider, now))
        .with_context(|| format!("Failed to write {}", paths.summary.display()))?;
    Ok(summary)
}
