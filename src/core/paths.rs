use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_NAME: &str = "monthly_summary.md";

/// File locations for one report date under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// `<root>/YYYY/MM`
    pub month_dir: PathBuf,
    /// `<root>/YYYY/MM/DD.md`
    pub daily: PathBuf,
    /// `<root>/YYYY/MM/monthly_summary.md`
    pub summary: PathBuf,
}

impl ReportPaths {
    pub fn for_date(root: &Path, date: NaiveDate) -> Self {
        let month_dir = root
            .join(format!("{}", date.year()))
            .join(format!("{:02}", date.month()));
        Self {
            daily: month_dir.join(format!("{:02}.md", date.day())),
            summary: month_dir.join(SUMMARY_FILE_NAME),
            month_dir,
        }
    }

    /// Create the year and month directories if they don't exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.month_dir).with_context(|| {
            format!("Failed to create report directory: {}", self.month_dir.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let paths = ReportPaths::for_date(Path::new("reports"), date);
        assert_eq!(paths.daily, PathBuf::from("reports/2024/03/07.md"));
        assert_eq!(paths.summary, PathBuf::from("reports/2024/03/monthly_summary.md"));
        assert_eq!(paths.month_dir, PathBuf::from("reports/2024/03"));
    }

    #[test]
    fn paths_two_digit_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let paths = ReportPaths::for_date(Path::new("."), date);
        assert_eq!(paths.daily, PathBuf::from("./2023/12/31.md"));
    }

    #[test]
    fn every_day_of_a_year_maps_under_its_month() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            let paths = ReportPaths::for_date(Path::new("r"), date);
            let expected = format!("r/2024/{:02}/{:02}.md", date.month(), date.day());
            assert_eq!(paths.daily, PathBuf::from(expected));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn ensure_dirs_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let paths = ReportPaths::for_date(tmp.path(), date);
        paths.ensure_dirs().unwrap();
        assert!(paths.month_dir.is_dir());
        // Idempotent
        paths.ensure_dirs().unwrap();
    }

    #[test]
    fn ensure_dirs_fails_when_root_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let err = ReportPaths::for_date(&file, date).ensure_dirs().unwrap_err();
        assert!(err.to_string().contains("Failed to create report directory"));
    }
}
