//! Configuration files on disk

use std::path::PathBuf;

use crate::config::{Config, ConfigError, DemoConfig, ShadowTechnique};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("csm_engine_{}_{}", std::process::id(), name))
}

#[test]
fn test_save_and_load_both_formats() {
    let mut config = DemoConfig::default();
    config.title = "Saved".to_string();
    config.shadows.technique = ShadowTechnique::Single;
    config.shadows.cascade_count = 2;

    for name in ["demo.toml", "demo.ron"] {
        let path = temp_path(name);
        let path = path.to_str().expect("utf-8 temp path");
        config.save_to_file(path).expect("save config");
        let loaded = DemoConfig::load_from_file(path).expect("load config");
        assert_eq!(loaded, config);
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let path = temp_path("missing.toml");
    let result = DemoConfig::load_from_file(path.to_str().expect("utf-8 temp path"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = DemoConfig::from_str_with_format("frames = \"many\"", "demo.toml");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
