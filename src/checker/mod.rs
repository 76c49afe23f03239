//! Stats aggregation and threshold evaluation.
//!
//! Builds per-file, per-package and total [`Stats`] from per-file coverage
//! counts, then checks each scope against its effective threshold.
//!
//! Threshold overrides are first-match-wins, not most-specific-match: the
//! order of `[[override]]` entries is semantically significant.

use indexmap::IndexMap;
use regex::Regex;

use crate::config::Config;
use crate::coverage::Stats;
use crate::error::{CoverGuardError, Result};

/// Terminal artifact of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeResult {
    /// Files below their effective threshold, in first-encounter order.
    pub files_below_threshold: Vec<Stats>,
    /// Packages below their effective threshold, in first-encounter order.
    pub packages_below_threshold: Vec<Stats>,
    pub meets_total_threshold: bool,
    pub total: Stats,
}

impl AnalyzeResult {
    /// The run passes iff the total passes and no file or package is below
    /// its threshold.
    #[must_use]
    pub fn passes(&self) -> bool {
        self.meets_total_threshold
            && self.files_below_threshold.is_empty()
            && self.packages_below_threshold.is_empty()
    }

    #[must_use]
    pub fn total_coverage_percent(&self) -> u32 {
        self.total.covered_percentage()
    }
}

#[derive(Debug)]
struct CompiledOverride {
    pattern: Regex,
    threshold: u32,
}

/// Compiled aggregation and threshold rules for one run.
#[derive(Debug)]
pub struct Analyzer {
    file_threshold: u32,
    package_threshold: u32,
    total_threshold: u32,
    overrides: Vec<CompiledOverride>,
    exclude: Vec<Regex>,
    local_prefix: String,
}

impl Analyzer {
    /// Compiles exclusion and override patterns from the configuration.
    ///
    /// # Errors
    /// Returns an error when a pattern is not a valid regular expression.
    pub fn new(config: &Config) -> Result<Self> {
        let overrides = config
            .overrides
            .iter()
            .map(|o| {
                compile_pattern(&o.path).map(|pattern| CompiledOverride {
                    pattern,
                    threshold: o.threshold,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let exclude = config
            .exclude
            .patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            file_threshold: config.threshold.file,
            package_threshold: config.threshold.package,
            total_threshold: config.threshold.total,
            overrides,
            exclude,
            local_prefix: with_trailing_separator(&config.local_prefix),
        })
    }

    /// Whether a profile path is excluded from coverage accounting.
    /// Patterns match against the `/`-normalized path, before prefix
    /// stripping.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        let normalized = normalize_path(name);
        self.exclude.iter().any(|re| re.is_match(&normalized))
    }

    /// Builds file, package and total stats and evaluates thresholds.
    ///
    /// Input is per-file `(name, total, covered)` in profile order. Files
    /// that are excluded or have no countable statements are dropped before
    /// aggregation and never appear in any rollup.
    #[must_use]
    pub fn analyze(&self, file_coverage: &[(String, u64, u64)]) -> AnalyzeResult {
        let mut files_below = Vec::new();
        let mut packages: IndexMap<String, (u64, u64)> = IndexMap::new();
        let mut grand_total = 0;
        let mut grand_covered = 0;

        for (name, total, covered) in file_coverage {
            if *total == 0 || self.is_excluded(name) {
                continue;
            }
            let display = self.display_name(name);

            let stats = Stats {
                threshold: self.effective_threshold(&display, self.file_threshold),
                name: display.clone(),
                total: *total,
                covered: *covered,
            };
            if !stats.meets_threshold() {
                files_below.push(stats);
            }

            let entry = packages.entry(package_of(&display).to_string()).or_default();
            entry.0 += total;
            entry.1 += covered;
            grand_total += total;
            grand_covered += covered;
        }

        let packages_below = packages
            .into_iter()
            .map(|(name, (total, covered))| Stats {
                threshold: self.effective_threshold(&name, self.package_threshold),
                name,
                total,
                covered,
            })
            .filter(|stats| !stats.meets_threshold())
            .collect();

        let total = Stats {
            name: "total".to_string(),
            total: grand_total,
            covered: grand_covered,
            threshold: self.total_threshold,
        };
        let meets_total_threshold = total.meets_threshold();

        AnalyzeResult {
            files_below_threshold: files_below,
            packages_below_threshold: packages_below,
            meets_total_threshold,
            total,
        }
    }

    /// First override whose pattern matches wins; otherwise the baseline.
    fn effective_threshold(&self, name: &str, baseline: u32) -> u32 {
        self.overrides
            .iter()
            .find(|o| o.pattern.is_match(name))
            .map_or(baseline, |o| o.threshold)
    }

    fn display_name(&self, name: &str) -> String {
        let normalized = normalize_path(name);
        if self.local_prefix.is_empty() {
            return normalized;
        }
        normalized
            .strip_prefix(&self.local_prefix)
            .map_or(normalized.clone(), ToString::to_string)
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CoverGuardError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Normalizes path separators to `/` regardless of host conventions.
#[must_use]
pub fn normalize_path(name: &str) -> String {
    name.replace('\\', "/")
}

/// Package identity: the containing directory of a normalized path.
/// A path with no separator is its own package.
#[must_use]
pub fn package_of(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(package, _)| package)
}

fn with_trailing_separator(prefix: &str) -> String {
    let normalized = normalize_path(prefix);
    if normalized.is_empty() || normalized.ends_with('/') {
        normalized
    } else {
        format!("{normalized}/")
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
