use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{self, OutputFormat, OutputOptions};
use crate::core::config::AppConfig;

#[derive(Serialize)]
struct CheckReport {
    path: String,
    exists: bool,
    issues: Vec<String>,
}

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    match AppConfig::default().save() {
        Ok(path) => println!("Generated config at {}", path.display()),
        Err(e) => {
            eprintln!("Failed to generate config: {:#}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn check(opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    let exists = path.exists();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    let issues = config.validate();

    match opts.format {
        OutputFormat::Json => {
            let report = CheckReport {
                path: path.display().to_string(),
                exists,
                issues: issues.clone(),
            };
            println!("{}", output::to_json(&report, opts)?);
        }
        OutputFormat::Text => {
            if !exists {
                println!("No config file at {} (using defaults)", path.display());
            }
            if issues.is_empty() {
                println!("Config is valid.");
            } else {
                println!("Found {} issue(s):", issues.len());
                for issue in &issues {
                    println!("  - {}", issue);
                }
            }
        }
    }

    if !issues.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

pub fn path(_opts: &OutputOptions) -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
