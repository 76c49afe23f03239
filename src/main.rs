use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;

use cover_guard::checker::{AnalyzeResult, Analyzer, normalize_path};
use cover_guard::cli::{CheckArgs, Cli, ColorChoice, Commands, InitArgs};
use cover_guard::config::{Config, DEFAULT_CONFIG_FILE, validate_config};
use cover_guard::error::CoverGuardError;
use cover_guard::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, render_badge,
};
use cover_guard::profile::Profile;
use cover_guard::{EXIT_BELOW_THRESHOLD, EXIT_CONFIG_ERROR, EXIT_SUCCESS, coverage, extent, profile};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> cover_guard::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // 3. Validate before any profile is read
    validate_config(&config)?;
    if config.profile.is_empty() {
        return Err(CoverGuardError::Config(
            "no coverage profiles given; pass profile paths or set 'profile' in the config"
                .to_string(),
        ));
    }

    // 4. Compile exclusion and threshold rules
    let analyzer = Analyzer::new(&config)?;

    // 5. Parse and merge coverage profiles
    let profiles = profile::parse_and_merge(&config.profile)?;

    // 6. Drop excluded files before resolving sources, so an excluded
    //    generated file absent from disk cannot abort the run
    let profiles: Vec<Profile> = profiles
        .into_iter()
        .filter(|p| !analyzer.is_excluded(&p.file_name))
        .collect();

    // 7. Per-file extent extraction and coverage (parallel, order preserved)
    let file_coverage = profiles
        .par_iter()
        .map(|p| compute_file_coverage(&config, p))
        .collect::<cover_guard::Result<Vec<_>>>()?;

    // 8. Aggregate and evaluate thresholds
    let result = analyzer.analyze(&file_coverage);

    // 9. Format and write the report
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_output(args.format, &result, color_mode, cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 10. Render badge if configured
    if let Some(badge_path) = &config.badge.file_name {
        fs::write(badge_path, render_badge(result.total_coverage_percent()))?;
        if !cli.quiet {
            eprintln!("Badge written to {}", badge_path.display());
        }
    }

    Ok(if result.passes() {
        EXIT_SUCCESS
    } else {
        EXIT_BELOW_THRESHOLD
    })
}

fn compute_file_coverage(
    config: &Config,
    profile: &Profile,
) -> cover_guard::Result<(String, u64, u64)> {
    let source_path = resolve_source(config, &profile.file_name);
    let content =
        fs::read_to_string(&source_path).map_err(|source| CoverGuardError::FileRead {
            path: source_path.clone(),
            source,
        })?;
    let extents = extent::extract(&source_path, &content)?;
    let (total, covered) = coverage::file_coverage(profile, &extents);
    Ok((profile.file_name.clone(), total, covered))
}

/// Locates the source file a profile entry refers to: the `/`-normalized
/// name, minus the configured local prefix, resolved under `source_dir`.
fn resolve_source(config: &Config, file_name: &str) -> PathBuf {
    let normalized = normalize_path(file_name);
    let mut prefix = normalize_path(&config.local_prefix);
    if !prefix.is_empty() && !prefix.ends_with('/') {
        prefix.push('/');
    }
    let relative = normalized.strip_prefix(&prefix).unwrap_or(&normalized);
    config.source_dir.join(relative)
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> cover_guard::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    if let Some(path) = config_path {
        return Config::load(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Config::load(default_path);
    }
    Ok(Config::default())
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    config.profile.extend(args.profiles.iter().cloned());
    if let Some(source_dir) = &args.source_dir {
        config.source_dir.clone_from(source_dir);
    }
    if let Some(local_prefix) = &args.local_prefix {
        config.local_prefix.clone_from(local_prefix);
    }
    config.exclude.patterns.extend(args.exclude.iter().cloned());
    if let Some(file) = args.threshold_file {
        config.threshold.file = file;
    }
    if let Some(package) = args.threshold_package {
        config.threshold.package = package;
    }
    if let Some(total) = args.threshold_total {
        config.threshold.total = total;
    }
    if let Some(badge) = &args.badge {
        config.badge.file_name = Some(badge.clone());
    }
}

fn format_output(
    format: OutputFormat,
    result: &AnalyzeResult,
    color_mode: ColorMode,
    verbose: u8,
) -> cover_guard::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(result),
        OutputFormat::Json => JsonFormatter.format(result),
    }
}

fn write_output(path: Option<&Path>, output: &str, quiet: bool) -> cover_guard::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)?;
            if !quiet {
                eprintln!("Results written to {}", path.display());
            }
        }
        None => {
            if !quiet {
                print!("{output}");
            }
        }
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> cover_guard::Result<()> {
    if args.output.exists() && !args.force {
        return Err(CoverGuardError::Config(format!(
            "{} already exists, use --force to overwrite",
            args.output.display()
        )));
    }
    fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE)?;
    println!("Configuration written to {}", args.output.display());
    Ok(())
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# cover-guard configuration

# Coverage profiles to analyze; profiles from multiple test runs are merged.
profile = ["coverage.out"]

# Root directory for locating source files named in profiles.
source_dir = "."

# Prefix stripped from reported file and package names.
local_prefix = ""

# Minimum acceptable coverage percentages (0-100).
[threshold]
file = 70
package = 80
total = 95

[exclude]
# Regular expressions matched against profile paths.
patterns = []

# Path-specific thresholds. The FIRST matching pattern wins.
# [[override]]
# path = "^generated/"
# threshold = 0

[badge]
# file_name = "coverage-badge.svg"
"#;
