use super::*;
use crate::config::{ThresholdConfig, ThresholdOverride};

fn config_with_thresholds(file: u32, package: u32, total: u32) -> Config {
    Config {
        threshold: ThresholdConfig {
            file,
            package,
            total,
        },
        ..Config::default()
    }
}

fn files(entries: &[(&str, u64, u64)]) -> Vec<(String, u64, u64)> {
    entries
        .iter()
        .map(|(name, total, covered)| ((*name).to_string(), *total, *covered))
        .collect()
}

#[test]
fn package_of_is_containing_directory() {
    assert_eq!(package_of("src/a.rs"), "src");
    assert_eq!(package_of("src/nested/b.rs"), "src/nested");
    assert_eq!(package_of("standalone.rs"), "standalone.rs");
}

#[test]
fn normalize_path_converts_backslashes() {
    assert_eq!(normalize_path("src\\sub\\a.rs"), "src/sub/a.rs");
    assert_eq!(normalize_path("src/a.rs"), "src/a.rs");
}

#[test]
fn aggregates_package_from_member_files() {
    let analyzer = Analyzer::new(&config_with_thresholds(0, 80, 0)).unwrap();

    let result = analyzer.analyze(&files(&[("pkg/a.rs", 10, 5), ("pkg/b.rs", 10, 10)]));

    assert_eq!(result.packages_below_threshold.len(), 1);
    let pkg = &result.packages_below_threshold[0];
    assert_eq!(pkg.name, "pkg");
    assert_eq!((pkg.total, pkg.covered), (20, 15));
    assert_eq!(pkg.covered_percentage(), 75);
}

#[test]
fn total_sums_all_retained_files() {
    let analyzer = Analyzer::new(&config_with_thresholds(0, 0, 0)).unwrap();

    let result = analyzer.analyze(&files(&[("pkg/a.rs", 10, 5), ("other/b.rs", 10, 10)]));

    assert_eq!((result.total.total, result.total.covered), (20, 15));
    assert_eq!(result.total_coverage_percent(), 75);
    assert!(result.passes());
}

#[test]
fn file_below_threshold_is_collected() {
    let analyzer = Analyzer::new(&config_with_thresholds(60, 0, 0)).unwrap();

    let result = analyzer.analyze(&files(&[("pkg/a.rs", 10, 5), ("pkg/b.rs", 10, 10)]));

    assert_eq!(result.files_below_threshold.len(), 1);
    assert_eq!(result.files_below_threshold[0].name, "pkg/a.rs");
    assert_eq!(result.files_below_threshold[0].threshold, 60);
    assert!(!result.passes());
}

#[test]
fn below_threshold_lists_keep_first_encounter_order() {
    let analyzer = Analyzer::new(&config_with_thresholds(100, 100, 0)).unwrap();

    let result = analyzer.analyze(&files(&[
        ("b/z.rs", 10, 0),
        ("a/x.rs", 10, 0),
        ("b/y.rs", 10, 0),
    ]));

    let file_names: Vec<&str> = result
        .files_below_threshold
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(file_names, vec!["b/z.rs", "a/x.rs", "b/y.rs"]);

    let package_names: Vec<&str> = result
        .packages_below_threshold
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(package_names, vec!["b", "a"]);
}

#[test]
fn zero_total_file_is_dropped_entirely() {
    let analyzer = Analyzer::new(&config_with_thresholds(100, 100, 0)).unwrap();

    let result = analyzer.analyze(&files(&[("pkg/empty.rs", 0, 0), ("pkg/a.rs", 10, 10)]));

    assert!(result.files_below_threshold.is_empty());
    assert!(result.packages_below_threshold.is_empty());
    assert_eq!(result.total.total, 10);
}

#[test]
fn excluded_file_is_absent_from_all_rollups() {
    let config = Config {
        exclude: crate::config::ExcludeConfig {
            patterns: vec![r"\.gen\.rs$".to_string()],
        },
        ..config_with_thresholds(100, 100, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("pkg/a.gen.rs", 10, 0), ("pkg/b.rs", 10, 10)]));

    assert!(result.files_below_threshold.is_empty());
    assert!(result.packages_below_threshold.is_empty());
    assert_eq!(result.total.total, 10);
}

#[test]
fn exclusion_matches_normalized_separators() {
    let config = Config {
        exclude: crate::config::ExcludeConfig {
            patterns: vec!["^generated/".to_string()],
        },
        ..Config::default()
    };
    let analyzer = Analyzer::new(&config).unwrap();

    assert!(analyzer.is_excluded("generated\\types.rs"));
    assert!(analyzer.is_excluded("generated/types.rs"));
    assert!(!analyzer.is_excluded("src/types.rs"));
}

#[test]
fn local_prefix_is_stripped_from_names() {
    let config = Config {
        local_prefix: "github.com/org/repo".to_string(),
        ..config_with_thresholds(100, 100, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("github.com/org/repo/src/a.rs", 10, 0)]));

    assert_eq!(result.files_below_threshold[0].name, "src/a.rs");
    assert_eq!(result.packages_below_threshold[0].name, "src");
}

#[test]
fn local_prefix_with_trailing_separator_behaves_the_same() {
    let config = Config {
        local_prefix: "repo/".to_string(),
        ..config_with_thresholds(100, 0, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("repo/src/a.rs", 10, 0)]));

    assert_eq!(result.files_below_threshold[0].name, "src/a.rs");
}

#[test]
fn override_replaces_baseline_threshold() {
    let config = Config {
        overrides: vec![ThresholdOverride {
            path: "^vendored/".to_string(),
            threshold: 10,
        }],
        ..config_with_thresholds(80, 0, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("vendored/a.rs", 10, 5), ("src/b.rs", 10, 5)]));

    // vendored file passes at 50% against its 10% override
    assert_eq!(result.files_below_threshold.len(), 1);
    assert_eq!(result.files_below_threshold[0].name, "src/b.rs");
}

#[test]
fn first_matching_override_wins_over_later_more_specific_one() {
    let config = Config {
        overrides: vec![
            ThresholdOverride {
                path: "^src/".to_string(),
                threshold: 10,
            },
            ThresholdOverride {
                path: "^src/special/".to_string(),
                threshold: 90,
            },
        ],
        ..config_with_thresholds(0, 0, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("src/special/a.rs", 10, 5)]));

    // the broad pattern is first, so its 10% threshold applies
    assert!(result.files_below_threshold.is_empty());
}

#[test]
fn override_order_reversed_changes_the_outcome() {
    let config = Config {
        overrides: vec![
            ThresholdOverride {
                path: "^src/special/".to_string(),
                threshold: 90,
            },
            ThresholdOverride {
                path: "^src/".to_string(),
                threshold: 10,
            },
        ],
        ..config_with_thresholds(0, 0, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("src/special/a.rs", 10, 5)]));

    assert_eq!(result.files_below_threshold.len(), 1);
    assert_eq!(result.files_below_threshold[0].threshold, 90);
}

#[test]
fn overrides_apply_to_packages_too() {
    let config = Config {
        overrides: vec![ThresholdOverride {
            path: "^legacy$".to_string(),
            threshold: 20,
        }],
        ..config_with_thresholds(0, 90, 0)
    };
    let analyzer = Analyzer::new(&config).unwrap();

    let result = analyzer.analyze(&files(&[("legacy/a.rs", 10, 5)]));

    assert!(result.packages_below_threshold.is_empty());
}

#[test]
fn total_threshold_gates_the_run() {
    let analyzer = Analyzer::new(&config_with_thresholds(0, 0, 80)).unwrap();

    let result = analyzer.analyze(&files(&[("src/a.rs", 10, 7)]));

    assert!(!result.meets_total_threshold);
    assert!(!result.passes());

    let analyzer = Analyzer::new(&config_with_thresholds(0, 0, 70)).unwrap();
    let result = analyzer.analyze(&files(&[("src/a.rs", 10, 7)]));
    assert!(result.meets_total_threshold);
    assert!(result.passes());
}

#[test]
fn empty_input_reports_zero_percent_total() {
    let analyzer = Analyzer::new(&config_with_thresholds(0, 0, 50)).unwrap();

    let result = analyzer.analyze(&[]);

    assert_eq!(result.total_coverage_percent(), 0);
    assert!(!result.passes());
}

#[test]
fn invalid_override_pattern_is_rejected() {
    let config = Config {
        overrides: vec![ThresholdOverride {
            path: "[invalid".to_string(),
            threshold: 50,
        }],
        ..Config::default()
    };

    let err = Analyzer::new(&config).unwrap_err();
    assert!(matches!(err, CoverGuardError::InvalidPattern { .. }));
}

#[test]
fn invalid_exclude_pattern_is_rejected() {
    let config = Config {
        exclude: crate::config::ExcludeConfig {
            patterns: vec!["(unclosed".to_string()],
        },
        ..Config::default()
    };

    let err = Analyzer::new(&config).unwrap_err();
    assert!(matches!(err, CoverGuardError::InvalidPattern { .. }));
}
