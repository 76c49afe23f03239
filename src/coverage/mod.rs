//! Statement coverage computation for one file.
//!
//! Walks the profile blocks overlapping each function extent, honoring
//! suppression annotations at function and nested-block granularity.

use serde::Serialize;

use crate::extent::{Extent, FileExtents};
use crate::profile::Profile;

/// Coverage accumulator for a file, a package or the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub name: String,
    pub total: u64,
    pub covered: u64,
    pub threshold: u32,
}

impl Stats {
    #[must_use]
    pub fn covered_percentage(&self) -> u32 {
        covered_percentage(self.total, self.covered)
    }

    #[must_use]
    pub fn meets_threshold(&self) -> bool {
        self.covered_percentage() >= self.threshold
    }
}

/// Truncating coverage percentage.
///
/// 0 when nothing is countable, 100 only at full coverage, otherwise rounded
/// down so 2/9 reports 22 and 6/9 reports 66. Never rounds up: 99.9% is not
/// yet 100%.
#[must_use]
pub fn covered_percentage(total: u64, covered: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    if covered == total {
        return 100;
    }
    #[allow(clippy::cast_possible_truncation)]
    {
        (covered * 100 / total) as u32
    }
}

/// Computes `(total, covered)` statement counts for one file.
#[must_use]
pub fn file_coverage(profile: &Profile, extents: &FileExtents) -> (u64, u64) {
    let mut total = 0;
    let mut covered = 0;
    for func in &extents.functions {
        let (t, c) = function_coverage(profile, func, &extents.blocks, &extents.annotations);
        total += t;
        covered += c;
    }
    (total, covered)
}

fn function_coverage(
    profile: &Profile,
    func: &Extent,
    blocks: &[Extent],
    annotations: &[Extent],
) -> (u64, u64) {
    // An annotation on the declaration line suppresses the whole function.
    if has_annotation_on_line(annotations, func.start_line) {
        return (0, 0);
    }

    let mut total = 0;
    let mut covered = 0;
    let mut skip: Option<Extent> = None;

    for block in &profile.blocks {
        if block.start_pos() >= func.end_pos() {
            // Blocks are sorted, nothing past the function end can match.
            break;
        }
        if block.end_pos() <= func.start_pos() {
            continue;
        }
        if let Some(skipped) = &skip
            && skipped.start_pos() <= block.start_pos()
            && block.end_pos() <= skipped.end_pos()
        {
            // Wholly contained in an already-suppressed block.
            continue;
        }
        if has_annotation_on_line(annotations, block.start_line) {
            skip = enclosing_block(blocks, block.start_line);
            continue;
        }

        total += block.num_stmt;
        if block.count > 0 {
            covered += block.num_stmt;
        }
    }

    (total, covered)
}

fn has_annotation_on_line(annotations: &[Extent], line: u32) -> bool {
    annotations.iter().any(|a| a.contains_line(line))
}

/// Smallest declared block extent whose line span contains `line`.
fn enclosing_block(blocks: &[Extent], line: u32) -> Option<Extent> {
    blocks
        .iter()
        .filter(|b| b.contains_line(line))
        .min_by_key(|b| b.line_span())
        .copied()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
