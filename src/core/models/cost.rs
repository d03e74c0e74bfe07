use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub description: String,
    pub amount: Decimal,
    /// Billed duration as reported by the API (e.g. "24h"); rendered as "N/A" when absent
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub items: Vec<CostLineItem>,
    pub total: Decimal,
}

impl DailyReport {
    /// Build a report for `date`, totalling the item amounts.
    pub fn new(date: NaiveDate, items: Vec<CostLineItem>) -> Self {
        let total = items.iter().map(|item| item.amount).sum();
        Self { date, items, total }
    }
}

/// A fetch failure captured for the daily file instead of aborting the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchFailure {
    /// "CredentialError" or "ApiError"
    pub kind: String,
    pub message: String,
    pub at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(description: &str, amount: &str) -> CostLineItem {
        CostLineItem {
            description: description.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            duration: None,
        }
    }

    #[test]
    fn total_is_sum_of_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let report = DailyReport::new(
            date,
            vec![item("Droplet", "10.10"), item("Spaces", "0.20"), item("LB", "0.01")],
        );
        assert_eq!(report.total, Decimal::from_str("10.31").unwrap());
    }

    #[test]
    fn empty_report_totals_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let report = DailyReport::new(date, vec![]);
        assert_eq!(report.total, Decimal::ZERO);
    }
}
