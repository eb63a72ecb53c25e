use holegrid_settings::{Config, OutputFormat, PeckPolicy, SettingsError, Template};
use std::path::PathBuf;
use tempfile::tempdir;

fn custom() -> Config {
    let mut config = Config::default();
    config.output.format = OutputFormat::Svg;
    config.output.path = Some(PathBuf::from("board.svg"));
    config.layout.template = Template::Snake;
    config.layout.dpi = 96;
    config.machine.z_depth = -0.25;
    config.machine.peck_policy = PeckPolicy::HalfDepth;
    config
}

#[test]
fn test_toml_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    custom().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("template = \"snake\""));
    assert!(text.contains("peck_policy = \"half-depth\""));

    assert_eq!(Config::load_from_file(&path).unwrap(), custom());
}

#[test]
fn test_json_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    custom().save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), custom());
}

#[test]
fn test_load_rejects_non_negative_depth() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[machine]\nz_depth = 0.125\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Machine(_)));
}

#[test]
fn test_read_skips_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[machine]\nz_depth = 0.125\n").unwrap();

    let mut config = Config::read_from_file(&path).unwrap();
    assert_eq!(config.machine.z_depth, 0.125);
    config.machine.z_depth = -0.2;
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_reports_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[machine\nz_depth = ").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError { .. }));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}
