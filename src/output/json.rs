use serde::Serialize;

use crate::checker::AnalyzeResult;
use crate::coverage::Stats;
use crate::error::Result;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    summary: Summary,
    files_below_threshold: Vec<EntityResult>,
    packages_below_threshold: Vec<EntityResult>,
}

#[derive(Serialize)]
struct Summary {
    passed: bool,
    total_coverage: u32,
    total_threshold: u32,
    meets_total_threshold: bool,
    total_statements: u64,
    covered_statements: u64,
}

#[derive(Serialize)]
struct EntityResult {
    name: String,
    coverage: u32,
    threshold: u32,
    total_statements: u64,
    covered_statements: u64,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &AnalyzeResult) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                passed: result.passes(),
                total_coverage: result.total_coverage_percent(),
                total_threshold: result.total.threshold,
                meets_total_threshold: result.meets_total_threshold,
                total_statements: result.total.total,
                covered_statements: result.total.covered,
            },
            files_below_threshold: convert(&result.files_below_threshold),
            packages_below_threshold: convert(&result.packages_below_threshold),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert(entries: &[Stats]) -> Vec<EntityResult> {
    entries
        .iter()
        .map(|stats| EntityResult {
            name: stats.name.clone(),
            coverage: stats.covered_percentage(),
            threshold: stats.threshold,
            total_statements: stats.total,
            covered_statements: stats.covered,
        })
        .collect()
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
