use facadekit_core::DrawingUnits;
use facadekit_designer::StairWindowParameters;
use facadekit_settings::{Config, ConfigError, SettingsError};
use std::path::PathBuf;
use tempfile::TempDir;

fn customised() -> Config {
    let mut config = Config::default();
    config.connection.max_attempts = 3;
    config.connection.document = Some(PathBuf::from("facade.json"));
    config.layers.create_missing = true;
    config.layers.outline = "A-ELEV-OTLN".to_string();
    config.facade.stair_windows = Some(StairWindowParameters::default());
    config.viewports.scale_denominator = 100.0;
    config.report.author = "Site Team".to_string();
    config.report.drawing_units = DrawingUnits::Meters;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[layers]\nwindows = \"GLAZING\"\n\n[facade]\nwidth = 24.0\n",
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.layers.windows, "GLAZING");
    assert_eq!(config.layers.doors, "A-DOOR");
    assert_eq!(config.facade.width, 24.0);
    assert_eq!(config.facade.eave_height, 15.0);
    assert_eq!(config.connection.max_attempts, 5);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[connection]\nmax_attempts = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let err = Config::default().save_to_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_load_or_default_with_explicit_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Config::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}

#[test]
fn test_save_over_directory_is_save_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("facadekit.toml");
    std::fs::create_dir(&path).unwrap();

    let err = Config::default().save_to_file(&path).unwrap_err();
    match err {
        SettingsError::SaveError(message) => assert!(message.contains("facadekit.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}
