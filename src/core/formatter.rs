use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the amount with exactly two decimals, e.g. "15.00".
/// Midpoints round away from zero.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Returns "YYYY-MM-DD HH:MM:SS".
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns "March 2024".
pub fn format_month_heading(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => format!("{} {}", first.format("%B"), first.year()),
        None => format!("{:02} {}", month, year),
    }
}

/// Make arbitrary text safe to place inside a pipe-table cell.
pub fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn format_money_two_decimals() {
        assert_eq!(format_money(dec("15")), "15.00");
        assert_eq!(format_money(dec("0")), "0.00");
        assert_eq!(format_money(dec("3.1")), "3.10");
        assert_eq!(format_money(dec("-12.34")), "-12.34");
    }

    #[test]
    fn format_money_rounds_half_away_from_zero() {
        assert_eq!(format_money(dec("0.125")), "0.13");
        assert_eq!(format_money(dec("0.124")), "0.12");
        assert_eq!(format_money(dec("-0.125")), "-0.13");
    }

    #[test]
    fn format_timestamp_layout() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-07 09:05:03");
    }

    #[test]
    fn format_month_heading_uses_full_name() {
        assert_eq!(format_month_heading(2024, 3), "March 2024");
        assert_eq!(format_month_heading(2023, 12), "December 2023");
    }

    #[test]
    fn escape_cell_pipes_and_newlines() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line1\nline2"), "line1 line2");
        assert_eq!(escape_cell("Droplet: web-server"), "Droplet: web-server");
    }
}
