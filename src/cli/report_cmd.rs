use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{self, OutputFormat, OutputOptions};
use crate::core::auth;
use crate::core::config::AppConfig;
use crate::core::formatter::format_money;
use crate::core::models::cost::FetchFailure;
use crate::core::paths::ReportPaths;
use crate::core::providers::digitalocean;
use crate::core::{report, store};

/// Command-line overrides for a report run.
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub output_dir: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub fail_on_error: bool,
}

#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub date: NaiveDate,
    pub daily_path: PathBuf,
    pub summary_path: PathBuf,
    pub items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchFailure>,
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

pub async fn run(args: ReportArgs, opts: &OutputOptions) -> Result<()> {
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &args);
    check_config(&config)?;

    let now = Local::now().naive_local();
    let date = args.date.unwrap_or_else(|| now.date());
    let outcome = generate(&config, date, now).await?;

    match opts.format {
        OutputFormat::Text => print_text(&outcome, opts),
        OutputFormat::Json => {
            println!("{}", output::to_json(&outcome, opts)?);
            if let (Some(failure), true) = (&outcome.error, opts.verbose) {
                eprintln!("Error fetching billing data: {}", failure.message);
            }
        }
    }

    let code = exit_code(&outcome, config.settings.fail_on_error);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Command-line flags take precedence over the config file.
pub fn apply_overrides(config: &mut AppConfig, args: &ReportArgs) {
    if let Some(dir) = &args.output_dir {
        config.settings.output_dir = dir.clone();
    }
    if args.fail_on_error {
        config.settings.fail_on_error = true;
    }
}

/// Refuse to run with a config that could write misleading reports.
pub fn check_config(config: &AppConfig) -> Result<()> {
    let issues = config.validate();
    if !issues.is_empty() {
        anyhow::bail!(
            "Invalid config at {}: {}",
            AppConfig::config_path().display(),
            issues.join("; ")
        );
    }
    Ok(())
}

/// Process exit status: recorded fetch failures only fail the run when asked to.
pub fn exit_code(outcome: &RunOutcome, fail_on_error: bool) -> i32 {
    if !outcome.succeeded() && fail_on_error {
        1
    } else {
        0
    }
}

/// Fetch the day's costs and write both markdown files.
///
/// Credential and API failures are recorded in the daily file and reported
/// through the returned outcome; only filesystem failures return `Err`.
pub async fn generate(config: &AppConfig, date: NaiveDate, now: NaiveDateTime) -> Result<RunOutcome> {
    let provider = config.settings.provider_name.as_str();
    let paths = ReportPaths::for_date(&config.settings.output_dir, date);
    paths.ensure_dirs()?;

    let fetched = match auth::read_token(&config.settings.token_env) {
        Ok(token) => digitalocean::fetch_daily(&config.api, token, date).await,
        Err(e) => Err(e),
    };

    let mut outcome = RunOutcome {
        date,
        daily_path: paths.daily.clone(),
        summary_path: paths.summary.clone(),
        items: 0,
        total: None,
        month_total: None,
        error: None,
    };

    match fetched {
        Ok(daily) => {
            store::write_daily(&paths, &report::render_daily(provider, &daily, &now))?;
            let summary = store::update_summary(&paths, date, daily.total, provider, &now)?;
            tracing::info!(%date, total = %daily.total, items = daily.items.len(), "cost report written");
            outcome.items = daily.items.len();
            outcome.total = Some(format_money(daily.total));
            outcome.month_total = Some(format_money(summary.month_total()));
        }
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "failed to fetch billing data");
            let failure = FetchFailure {
                kind: err.kind().to_string(),
                message: err.to_string(),
                at: now,
            };
            store::append_error(&paths, &report::render_error(provider, &failure))?;
            outcome.error = Some(failure);
        }
    }

    Ok(outcome)
}

fn print_text(outcome: &RunOutcome, opts: &OutputOptions) {
    use colored::Colorize;
    colored::control::set_override(opts.use_color);

    match &outcome.error {
        None => {
            println!("{}", "Cost report generated successfully!".green());
            println!(
                "  {}  {} items, total ${}",
                outcome.daily_path.display(),
                outcome.items,
                outcome.total.as_deref().unwrap_or("0.00")
            );
            println!(
                "  {}  month to date ${}",
                outcome.summary_path.display(),
                outcome.month_total.as_deref().unwrap_or("0.00")
            );
        }
        Some(failure) => {
            let label = match failure.kind.as_str() {
                "CredentialError" => "Token Error",
                _ => "API Error",
            };
            eprintln!("{}", format!("{}: {}", label, failure.message).red());
            eprintln!("  Error recorded in {}", outcome.daily_path.display());
        }
    }
}
