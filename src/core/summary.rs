use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::core::formatter::{format_money, format_month_heading, format_timestamp};

/// One rendered row: day of month, that day's cost, and the running total through that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub day: u32,
    pub cost: Decimal,
    pub running_total: Decimal,
}

/// Per-day costs for one calendar month.
///
/// The markdown file is the only persisted form; running totals are
/// recomputed from the day costs every time the table is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    days: BTreeMap<u32, Decimal>,
}

impl MonthlySummary {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            days: BTreeMap::new(),
        }
    }

    /// Parse a previously rendered summary. Lines that are not table rows
    /// with a day number and a decimal cost are skipped.
    pub fn parse(year: i32, month: u32, content: &str) -> Self {
        let mut summary = Self::empty(year, month);
        for line in content.lines().map(str::trim).filter(|l| l.starts_with('|')) {
            if let Some((day, cost)) = parse_row(line) {
                summary.days.insert(day, cost);
            }
        }
        summary
    }

    /// Set the cost for `day`, replacing any existing row for it.
    pub fn upsert(&mut self, day: u32, cost: Decimal) {
        self.days.insert(day, cost);
    }

    pub fn cost_for(&self, day: u32) -> Option<Decimal> {
        self.days.get(&day).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Rows in ascending day order with running totals.
    pub fn rows(&self) -> Vec<SummaryRow> {
        let mut running_total = Decimal::ZERO;
        self.days
            .iter()
            .map(|(&day, &cost)| {
                running_total += cost;
                SummaryRow {
                    day,
                    cost,
                    running_total,
                }
            })
            .collect()
    }

    pub fn month_total(&self) -> Decimal {
        self.days.values().copied().sum()
    }

    pub fn render(&self, provider: &str, updated_at: &NaiveDateTime) -> String {
        let mut lines = vec![
            format!(
                "# {} Cost Summary - {}",
                provider,
                format_month_heading(self.year, self.month)
            ),
            String::new(),
            "| Day | Cost ($) | Running Total ($) |".to_string(),
            "|---|---|---|".to_string(),
        ];
        for row in self.rows() {
            lines.push(format!(
                "| {} | {} | {} |",
                row.day,
                format_money(row.cost),
                format_money(row.running_total)
            ));
        }
        lines.push(String::new());
        lines.push(format!("*Last Updated: {}*", format_timestamp(updated_at)));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn parse_row(line: &str) -> Option<(u32, Decimal)> {
    let cells: Vec<&str> = line
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect();
    if cells.len() < 2 {
        return None;
    }
    let day: u32 = cells[0].parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let cost_text: String = cells[1].chars().filter(|c| *c != '$' && *c != ',').collect();
    let cost = Decimal::from_str(cost_text.trim()).ok()?;
    Some((day, cost))
}
