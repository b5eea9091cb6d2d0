use crate::error::ConfigError;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a JSON config file (native builds only)
pub const CONFIG_ENV_VAR: &str = "NUMBER_LINE_CONFIG";

/// An sRGB color as stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn color(self) -> Color32 {
        let [r, g, b] = self.0;
        Color32::from_rgb(r, g, b)
    }
}

/// Colors used by the layout engine and the field overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub text: Rgb,
    pub mark: Rgb,
    pub error: Rgb,
    pub arrow: Rgb,
    pub background: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Rgb([0, 0, 0]),
            mark: Rgb([255, 165, 0]),
            error: Rgb([255, 0, 0]),
            arrow: Rgb([255, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

/// Session configuration.
///
/// Every field has a default so a partial file (or none at all) works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct Config {
    /// Delay before entering the first stage and after each solved operand
    pub stage_delay_ms: u64,
    /// Delay after the result is solved; zero means the transition is synchronous
    pub result_delay_ms: u64,
    /// PNG used for the ruler instead of the generated sprite
    pub ruler_image: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_delay_ms: 500,
            result_delay_ms: 0,
            ruler_image: None,
            theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }

    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.stage_delay(), Duration::from_millis(500));
        assert_eq!(config.result_delay(), Duration::ZERO);
        assert_eq!(config.theme.mark.color(), Color32::from_rgb(255, 165, 0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "stage_delay_ms": 250, "theme": { "arrow": [0, 0, 255] } }"#)
            .unwrap();
        assert_eq!(config.stage_delay_ms, 250);
        assert_eq!(config.result_delay_ms, 0);
        assert_eq!(config.theme.arrow, Rgb([0, 0, 255]));
        assert_eq!(config.theme.text, Rgb([0, 0, 0]));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
