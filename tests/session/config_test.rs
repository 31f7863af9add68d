//! Tests for configuration files

use pose_actions::config::{ConfigValidation, PoseActionsConfig};

use crate::test_utils::*;

#[test]
fn test_save_and_load() {
    let dir = create_temp_dir();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = PoseActionsConfig::default();
    config.recognition.cooldown_time = 1.25;
    config.source.pose_index = 1;
    config.session.auto_calibrate = false;
    config.save_to_file(&path).unwrap();

    let loaded = PoseActionsConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[recognition]\nfist_hold_time = 9.0\n").unwrap();

    let err = PoseActionsConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("fist_hold_time"));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[recognition\n").unwrap();
    assert!(PoseActionsConfig::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = create_temp_dir();
    assert!(PoseActionsConfig::load_from_file(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_invalid_config_is_not_saved() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    let mut config = PoseActionsConfig::default();
    config.source.visibility_threshold = 1.5;

    assert!(config.validate().is_err());
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}
