use config::Map;
use spost_kernel::config::{ConfigError, load_build_config, load_config_with_env};
use spost_kernel::domain::{BuildConfig, Environment, OutputStyle};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("stylepost.toml");
    fs::write(&path, body).expect("write config file");
    path
}

#[test]
fn loads_build_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            environment = "development"
            css_dir = "public/css"
            line_comments = true
            supported_browsers = ["ie >= 10", "last 1 version"]
        "#,
    );

    let cfg = load_build_config(Some(&path)).expect("config should load");
    assert_eq!(cfg.environment, Environment::Development);
    assert_eq!(cfg.output_style(), OutputStyle::Expanded);
    assert_eq!(cfg.css_dir, PathBuf::from("public/css"));
    assert!(cfg.line_comments);
    assert_eq!(cfg.supported_browsers, vec!["ie >= 10", "last 1 version"]);
    assert_eq!(cfg.http_stylesheets_path, "/assets/css", "unset keys keep defaults");
}

#[test]
fn environment_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "environment = \"development\"\ncss_dir = \"public/css\"\n");

    let env = Map::from([
        ("SPOST__ENVIRONMENT".to_owned(), "production".to_owned()),
        ("SPOST__CSS_DIR".to_owned(), "dist/css".to_owned()),
        ("SPOST__SUPPORTED_BROWSERS".to_owned(), "ie >= 11,safari >= 12".to_owned()),
        ("OTHER__CSS_DIR".to_owned(), "ignored".to_owned()),
    ]);

    let cfg: BuildConfig = load_config_with_env(Some(&path), Some(env)).expect("config should load");
    assert_eq!(cfg.environment, Environment::Production);
    assert_eq!(cfg.output_style(), OutputStyle::Compressed);
    assert_eq!(cfg.css_dir, PathBuf::from("dist/css"));
    assert_eq!(cfg.supported_browsers, vec!["ie >= 11", "safari >= 12"]);
}

#[test]
fn numeric_overrides_stay_strings() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "css_dir = \"public/css\"\n");

    let env = Map::from([
        ("SPOST__CSS_DIR".to_owned(), "123".to_owned()),
        ("SPOST__HTTP_PATH".to_owned(), "2024".to_owned()),
        ("SPOST__LINE_COMMENTS".to_owned(), "true".to_owned()),
    ]);

    let cfg: BuildConfig = load_config_with_env(Some(&path), Some(env)).expect("config should load");
    assert_eq!(cfg.css_dir, PathBuf::from("123"));
    assert_eq!(cfg.http_path, "2024");
    assert!(cfg.line_comments);
}

#[test]
fn explicit_output_style_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "environment = \"development\"\noutput_style = \"compressed\"\n");

    let cfg: BuildConfig =
        load_config_with_env(Some(&path), Some(Map::new())).expect("config should load");
    assert_eq!(cfg.output_style(), OutputStyle::Compressed);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config_with_env::<BuildConfig>(Some(&missing), Some(Map::new()))
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn malformed_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "output_style = \"sparkly\"\n");

    let err = load_config_with_env::<BuildConfig>(Some(&path), Some(Map::new()))
        .expect_err("unknown style must fail");
    assert!(err.to_string().contains("Failed to deserialize config"));
}
