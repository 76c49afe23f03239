//! Configuration semantic validation.
//!
//! Runs after parsing and before any profile is read, so a bad threshold or
//! pattern never produces partial coverage numbers.

use regex::Regex;

use crate::config::Config;
use crate::{CoverGuardError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error when a threshold is outside `[0, 100]` or an exclusion
/// or override pattern is not a valid regular expression.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_threshold_range("threshold.file", config.threshold.file)?;
    validate_threshold_range("threshold.package", config.threshold.package)?;
    validate_threshold_range("threshold.total", config.threshold.total)?;

    for (i, over) in config.overrides.iter().enumerate() {
        validate_threshold_range(&format!("override[{i}].threshold"), over.threshold)?;
        validate_pattern(&over.path)?;
    }
    for pattern in &config.exclude.patterns {
        validate_pattern(pattern)?;
    }
    Ok(())
}

fn validate_threshold_range(field: &str, value: u32) -> Result<()> {
    if value > 100 {
        return Err(CoverGuardError::Config(format!(
            "{field} must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

fn validate_pattern(pattern: &str) -> Result<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|source| CoverGuardError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
