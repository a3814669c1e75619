//! The `check` subcommand: load cases, run the rules, render reports.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tilecase_core::{CaseOptions, CaseRule, ValidationReport, validate_case_with};
use tilecase_data::{ValidationConfig, find_case_files, load_case, load_config};

use crate::CheckArgs;

/// Report for one case file.
#[derive(Debug, Serialize)]
pub struct CaseResult {
    pub file: PathBuf,
    pub case: String,
    pub valid: bool,
    pub errors: ValidationReport,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub results: Vec<CaseResult>,
    pub fail_on_errors: bool,
}

impl CheckOutcome {
    pub fn invalid_count(&self) -> usize {
        self.results.iter().filter(|r| !r.valid).count()
    }

    /// Whether the run should exit non-zero.
    pub fn failed(&self) -> bool {
        self.fail_on_errors && self.invalid_count() > 0
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            let status = if result.valid { "ok" } else { "FAILED" };
            let _ = writeln!(
                out,
                "{} [{}]: {status}",
                result.case,
                result.file.display()
            );
            for message in result.errors.messages() {
                let _ = writeln!(out, "  - {message}");
            }
        }
        let _ = writeln!(
            out,
            "{} case(s) checked, {} invalid",
            self.results.len(),
            self.invalid_count()
        );
        out
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.results).context("rendering JSON report")
    }
}

/// Resolve the effective configuration: the config file if given, with
/// command-line rules and `--no-fail` layered on top.
fn resolve_config(args: &CheckArgs) -> Result<ValidationConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ValidationConfig::default(),
    };
    if !args.rules.is_empty() {
        config.rules = Some(args.rules.clone());
    }
    if args.no_fail {
        config.fail_on_errors = false;
    }
    Ok(config)
}

/// Expand directories into the case files they contain; files pass
/// through unchanged.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = find_case_files(path)
                .with_context(|| format!("scanning {}", path.display()))?;
            if found.is_empty() {
                tracing::warn!(dir = %path.display(), "no case files found");
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn check_case(file: &Path, options: &CaseOptions, rules: &[CaseRule]) -> CaseResult {
    let report = validate_case_with(options, rules);
    if report.is_valid() {
        tracing::info!(case = %options.name, "case valid");
    } else {
        tracing::warn!(case = %options.name, errors = report.len(), "case invalid");
    }
    CaseResult {
        file: file.to_path_buf(),
        case: options.name.clone(),
        valid: report.is_valid(),
        errors: report,
    }
}

pub fn run(args: &CheckArgs) -> Result<CheckOutcome> {
    let config = resolve_config(args)?;
    let rules = config.rules();
    tracing::debug!(?rules, fail_on_errors = config.fail_on_errors, "configuration resolved");

    let mut results = Vec::new();
    for file in expand_paths(&args.paths)? {
        let options =
            load_case(&file).with_context(|| format!("loading case {}", file.display()))?;
        results.push(check_case(&file, &options, &rules));
    }

    Ok(CheckOutcome {
        results,
        fail_on_errors: config.fail_on_errors,
    })
}
