use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed profile line {line} in {path}: {reason}")]
    ProfileParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Inconsistent coverage profiles for file: {file}")]
    InconsistentProfile { file: String },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse source file {path}: {reason}")]
    SourceParse { path: PathBuf, reason: String },

    #[error("Invalid pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoverGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
