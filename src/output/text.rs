use std::fmt::Write;

use crate::checker::AnalyzeResult;
use crate::coverage::Stats;
use crate::error::Result;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, passed: bool) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let color = if passed { ansi::GREEN } else { ansi::RED };
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_below(&self, scope: &str, entries: &[Stats], output: &mut String) {
        if entries.is_empty() {
            return;
        }
        let _ = writeln!(output, "{scope} below threshold:");
        for stats in entries {
            let line = format!(
                "  ✗ {}: {}% (want {}%)",
                stats.name,
                stats.covered_percentage(),
                stats.threshold
            );
            let _ = writeln!(output, "{}", self.colorize(&line, false));
            if self.verbose > 0 {
                let _ = writeln!(
                    output,
                    "      {} of {} statements covered",
                    stats.covered, stats.total
                );
            }
        }
        let _ = writeln!(output);
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &AnalyzeResult) -> Result<String> {
        let mut output = String::new();

        self.format_below("Files", &result.files_below_threshold, &mut output);
        self.format_below("Packages", &result.packages_below_threshold, &mut output);

        let total_line = format!(
            "Total coverage: {}% (want {}%)",
            result.total_coverage_percent(),
            result.total.threshold
        );
        let _ = writeln!(
            output,
            "{}",
            self.colorize(&total_line, result.meets_total_threshold)
        );
        if self.verbose > 0 {
            let _ = writeln!(
                output,
                "  {} of {} statements covered",
                result.total.covered, result.total.total
            );
        }

        let status = if result.passes() { "✓ PASS" } else { "✗ FAIL" };
        let _ = writeln!(output, "{}", self.colorize(status, result.passes()));

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
