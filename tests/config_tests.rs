//! Integration tests for configuration management

use gradebook::config::{Config, ConfigOverrides, DEFAULT_GPA_PRECISION};
use gradebook::core::transcript::MAX_GPA_PRECISION;
use gradebook::GradingMode;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert_eq!(config.display.gpa_precision, 2);
    assert_eq!(config.grading.mode, "shared-course");
    assert_eq!(config.grading_mode(), GradingMode::SharedCourse);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[display]
gpa_precision = 3

[grading]
mode = "per-enrollment"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.display.gpa_precision, 3);
    assert_eq!(config.grading_mode(), GradingMode::PerEnrollment);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.display.gpa_precision, DEFAULT_GPA_PRECISION);
    assert_eq!(config.grading.mode, "");
    assert_eq!(config.grading_mode(), GradingMode::SharedCourse);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$GRADEBOOK/test.log"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("gradebook"));
    assert!(!config.logging.file.contains("$GRADEBOOK"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("gpa_precision", "4")
        .expect("Failed to set precision");
    assert_eq!(config.get("gpa-precision").unwrap(), "4");

    config
        .set("grading_mode", "enrollment")
        .expect("Failed to set grading mode");
    assert_eq!(config.get("grading_mode").unwrap(), "per-enrollment");
    assert_eq!(config.grading_mode(), GradingMode::PerEnrollment);

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "trace").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("gpa_precision", "-1").is_err());
    assert!(config.set("grading_mode", "weekly").is_err());
    assert_eq!(config.grading.mode, "shared-course");
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("gpa_precision", "5").expect("Failed to set precision");
    config
        .unset("gpa_precision", &defaults)
        .expect("Failed to unset precision");
    assert_eq!(config.display.gpa_precision, defaults.display.gpa_precision);

    config
        .set("grading_mode", "per-enrollment")
        .expect("Failed to set mode");
    config
        .unset("grading_mode", &defaults)
        .expect("Failed to unset mode");
    assert_eq!(config.grading.mode, defaults.grading.mode);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("gpa_precision", "1").expect("Failed to set precision");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.display.gpa_precision, 1);
}

#[test]
fn test_load_from_creates_file_on_first_run() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.grading.mode, Config::from_defaults().grading.mode);
}

#[test]
fn test_load_from_merges_and_rewrites_missing_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").unwrap();

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.grading.mode, "shared-course");

    let rewritten = fs::read_to_string(&config_file).unwrap();
    assert!(rewritten.contains("shared-course"));
}

#[test]
fn test_load_from_invalid_file_falls_back_to_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "this is = = not toml").unwrap();

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        gpa_precision: Some(4),
        grading_mode: Some("per-enrollment".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.display.gpa_precision, 4);
    assert_eq!(config.grading_mode(), GradingMode::PerEnrollment);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let precision = config.display.gpa_precision;

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.display.gpa_precision, precision);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[display]"));
    assert!(display_str.contains("[grading]"));
    assert!(display_str.contains("gpa_precision = 2"));
    assert!(display_str.contains("mode = \"shared-course\""));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.grading.mode, "shared-course");
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[grading]
mode = "per-enrollment"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.grading.mode, "per-enrollment");
}

#[test]
fn test_get_gradebook_dir() {
    let dir = Config::get_gradebook_dir();

    assert!(dir.to_string_lossy().contains("gradebook"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}

#[test]
fn test_gpa_precision_is_bounded() {
    let mut config = Config::from_defaults();

    config
        .set("gpa_precision", "15")
        .expect("upper bound is accepted");
    assert_eq!(config.display.gpa_precision, MAX_GPA_PRECISION);

    assert!(config.set("gpa_precision", "16").is_err());
    assert!(config.set("gpa_precision", "70000").is_err());
    assert_eq!(config.display.gpa_precision, MAX_GPA_PRECISION);
}

#[test]
fn test_gpa_precision_clamped_from_file_and_overrides() {
    let config = Config::from_toml("[display]\ngpa_precision = 70000\n").expect("valid TOML");
    assert_eq!(config.display.gpa_precision, MAX_GPA_PRECISION);

    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "[display]\ngpa_precision = 99\n").unwrap();
    assert_eq!(
        Config::load_from(&config_file).display.gpa_precision,
        MAX_GPA_PRECISION
    );

    let mut config = Config::from_defaults();
    config.apply_overrides(&ConfigOverrides {
        gpa_precision: Some(500),
        ..ConfigOverrides::default()
    });
    assert_eq!(config.display.gpa_precision, MAX_GPA_PRECISION);
}
