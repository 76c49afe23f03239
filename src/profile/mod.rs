//! Coverage profile parsing and multi-run merging.
//!
//! A profile file starts with a `mode:` declaration followed by one block
//! per line: `path:startLine.startCol,endLine.endCol numStmt count`.
//! Profiles from several test runs are merged per file: block structure must
//! be identical, execution counts combine with `max` so a statement counts
//! as covered when any run executed it.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{CoverGuardError, Result};

/// One statement block reported by a coverage profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub num_stmt: u64,
    pub count: u64,
}

impl Block {
    #[must_use]
    pub const fn start_pos(&self) -> (u32, u32) {
        (self.start_line, self.start_col)
    }

    #[must_use]
    pub const fn end_pos(&self) -> (u32, u32) {
        (self.end_line, self.end_col)
    }

    /// Positional and statement-count identity, ignoring execution counts.
    #[must_use]
    pub const fn same_structure(&self, other: &Self) -> bool {
        self.start_line == other.start_line
            && self.start_col == other.start_col
            && self.end_line == other.end_line
            && self.end_col == other.end_col
            && self.num_stmt == other.num_stmt
    }
}

/// Ordered statement blocks for exactly one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub file_name: String,
    pub blocks: Vec<Block>,
}

/// Parses all profile files and merges them into one profile per source file.
///
/// Files keep the order of first encounter across inputs, so repeated runs
/// over identical inputs yield identical output ordering.
///
/// # Errors
/// Returns an error when a profile file cannot be read, a line is malformed,
/// or two profiles disagree on the block structure of the same file.
pub fn parse_and_merge(paths: &[PathBuf]) -> Result<Vec<Profile>> {
    let mut merged: IndexMap<String, Profile> = IndexMap::new();

    for path in paths {
        let content = fs::read_to_string(path).map_err(|source| CoverGuardError::FileRead {
            path: path.clone(),
            source,
        })?;

        for profile in parse_profile(path, &content)? {
            match merged.get_mut(&profile.file_name) {
                Some(existing) => merge_into(existing, &profile)?,
                None => {
                    merged.insert(profile.file_name.clone(), profile);
                }
            }
        }
    }

    Ok(merged.into_values().collect())
}

/// Parses one profile file into per-file profiles with sorted blocks.
///
/// # Errors
/// Returns an error when the mode declaration is missing or a block line
/// does not match the profile format.
pub fn parse_profile(path: &Path, content: &str) -> Result<Vec<Profile>> {
    let mut lines = content.lines().enumerate();

    let Some((_, first)) = lines.next() else {
        return Err(parse_error(path, 1, "empty profile"));
    };
    if !first.starts_with("mode:") {
        return Err(parse_error(path, 1, "missing mode declaration"));
    }

    let mut files: IndexMap<String, Profile> = IndexMap::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (file_name, block) = parse_block_line(line).ok_or_else(|| {
            parse_error(path, idx + 1, "expected 'path:sl.sc,el.ec numStmt count'")
        })?;

        files
            .entry(file_name.to_string())
            .or_insert_with(|| Profile {
                file_name: file_name.to_string(),
                blocks: Vec::new(),
            })
            .blocks
            .push(block);
    }

    let mut profiles: Vec<Profile> = files.into_values().collect();
    for profile in &mut profiles {
        profile
            .blocks
            .sort_by_key(|b| (b.start_line, b.start_col, b.end_line, b.end_col));
    }
    Ok(profiles)
}

fn parse_block_line(line: &str) -> Option<(&str, Block)> {
    // The path may itself contain ':', so split on the last one.
    let (file_name, rest) = line.rsplit_once(':')?;
    if file_name.is_empty() {
        return None;
    }

    let mut fields = rest.split_whitespace();
    let range = fields.next()?;
    let num_stmt = fields.next()?.parse().ok()?;
    let count = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let (start, end) = range.split_once(',')?;
    let (start_line, start_col) = parse_position(start)?;
    let (end_line, end_col) = parse_position(end)?;

    Some((
        file_name,
        Block {
            start_line,
            start_col,
            end_line,
            end_col,
            num_stmt,
            count,
        },
    ))
}

fn parse_position(pos: &str) -> Option<(u32, u32)> {
    let (line, col) = pos.split_once('.')?;
    Some((line.parse().ok()?, col.parse().ok()?))
}

/// Merges `incoming` into `existing` for the same file.
///
/// Block lists must agree on length, positions and statement counts;
/// execution counts merge with `max`, which makes the merge commutative
/// and associative.
fn merge_into(existing: &mut Profile, incoming: &Profile) -> Result<()> {
    if existing.blocks.len() != incoming.blocks.len() {
        return Err(CoverGuardError::InconsistentProfile {
            file: existing.file_name.clone(),
        });
    }
    for (a, b) in existing.blocks.iter().zip(&incoming.blocks) {
        if !a.same_structure(b) {
            return Err(CoverGuardError::InconsistentProfile {
                file: existing.file_name.clone(),
            });
        }
    }
    for (a, b) in existing.blocks.iter_mut().zip(&incoming.blocks) {
        a.count = a.count.max(b.count);
    }
    Ok(())
}

fn parse_error(path: &Path, line: usize, reason: &str) -> CoverGuardError {
    CoverGuardError::ProfileParse {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
