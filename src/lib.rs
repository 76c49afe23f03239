pub mod checker;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod error;
pub mod extent;
pub mod output;
pub mod profile;

pub use error::{CoverGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_BELOW_THRESHOLD: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
