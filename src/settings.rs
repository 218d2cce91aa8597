//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::WIN_RESET_DELAY_MS;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fill colors and font used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub ball: String,
    pub paddle: String,
    pub brick: String,
    pub score: String,
    pub font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            ball: "#0095dd".to_string(),
            paddle: "#0095dd".to_string(),
            brick: "#0095dd".to_string(),
            score: "#0095dd".to_string(),
            font: "20px Arial".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Upload ===
    /// Endpoint receiving `{ "data": <image> }` on game over
    pub upload_endpoint: String,
    /// Upload a screenshot when a round is lost
    pub upload_enabled: bool,

    // === Flow ===
    /// Blocking notification shown on round loss
    pub game_over_message: String,
    /// Pause between clearing the grid and the next round
    pub win_reset_delay_ms: u32,

    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_endpoint: "/api/upload".to_string(),
            upload_enabled: true,
            game_over_message: "GAME OVER! score recorded at Cloudinary".to_string(),
            win_reset_delay_ms: WIN_RESET_DELAY_MS,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Environment variable naming a settings file (native only)
    pub const ENV_PATH: &'static str = "BRICK_BREAKER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("LocalStorage unavailable, using default settings");
            return Self::default();
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                // Leave a hand-edited entry in place for the user to fix
                Err(e) => log::warn!("Ignoring stored settings: {}", e),
            },
            Ok(None) => {
                // Seed the key so the defaults can be edited in devtools
                let settings = Self::default();
                settings.save();
                return settings;
            }
            Err(e) => log::warn!("Failed to read stored settings: {:?}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `BRICK_BREAKER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.upload_endpoint, "/api/upload");
        assert_eq!(settings.win_reset_delay_ms, 3000);
        assert_eq!(settings.theme.font, "20px Arial");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            Settings::from_json(r#"{ "upload_enabled": false, "theme": { "ball": "red" } }"#)
                .unwrap();
        assert!(!settings.upload_enabled);
        assert_eq!(settings.theme.ball, "red");
        assert_eq!(settings.theme.paddle, "#0095dd");
        assert_eq!(settings.game_over_message, Settings::default().game_over_message);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
