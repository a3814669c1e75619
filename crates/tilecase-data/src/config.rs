//! Validator configuration: which rules run and whether errors fail the
//! run.
//!
//! The on-disk form names rules as strings; they are resolved against
//! [`CaseRule`] on load so a typo is reported with the file it came from.

use serde::Deserialize;
use std::path::Path;
use tilecase_core::CaseRule;

use crate::loader::{DataLoadError, deserialize_file};

/// Configuration as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
struct ValidationConfigData {
    #[serde(default)]
    rules: Option<Vec<String>>,
    #[serde(default = "default_true")]
    fail_on_errors: bool,
}

fn default_true() -> bool {
    true
}

/// Resolved validator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Rules to run, in order. `None` runs every rule.
    pub rules: Option<Vec<CaseRule>>,
    /// Whether a non-empty report counts as a failure.
    pub fail_on_errors: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            rules: None,
            fail_on_errors: true,
        }
    }
}

impl ValidationConfig {
    /// The rules to run, defaulting to all of them in canonical order.
    pub fn rules(&self) -> Vec<CaseRule> {
        match &self.rules {
            Some(rules) => rules.clone(),
            None => CaseRule::all().to_vec(),
        }
    }
}

/// Load and resolve a validator configuration file.
pub fn load_config(path: &Path) -> Result<ValidationConfig, DataLoadError> {
    let data: ValidationConfigData = deserialize_file(path)?;
    let rules = data
        .rules
        .map(|names| {
            names
                .iter()
                .map(|name| {
                    name.parse::<CaseRule>()
                        .map_err(|_| DataLoadError::UnknownRule {
                            file: path.to_path_buf(),
                            name: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(ValidationConfig {
        rules,
        fail_on_errors: data.fail_on_errors,
    })
}
