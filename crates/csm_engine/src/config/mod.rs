//! Configuration system
//!
//! Every tunable that used to be a compile-time switch in the demo is a
//! named option here, loaded from TOML or RON.

mod settings;

pub use serde::{Serialize, Deserialize};
pub use settings::{CameraConfig, DemoConfig, ShadowConfig, ShadowTechnique};

/// Settings that round-trip through TOML or RON files
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read and parse settings from `path`
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        log::debug!("Loading configuration from {}", path);
        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Serialize configuration, picking the format from `path`'s extension
    fn to_string_with_format(&self, path: &str) -> Result<String, ConfigError> {
        if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Write settings to `path` in the format its extension names
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = self.to_string_with_format(path)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Failures while loading, saving or validating settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the settings file failed
    #[error("Cannot access settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents do not match the settings schema
    #[error("Malformed settings: {0}")]
    Parse(String),

    /// Settings could not be rendered as text
    #[error("Cannot write settings: {0}")]
    Serialize(String),

    /// The file extension is neither `.toml` nor `.ron`
    #[error("Settings file must end in .toml or .ron: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
