use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_player_one() -> String {
    "Player 1".to_string()
}

fn default_player_two() -> String {
    "Player 2".to_string()
}

fn default_flip_back_ms() -> u64 {
    1000
}

/// Optional hex-color overrides for the UI palette (`#RRGGBB` or `#RGB`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display name for the first player
    #[serde(default = "default_player_one")]
    pub player_one: String,

    /// Display name for the second player
    #[serde(default = "default_player_two")]
    pub player_two: String,

    /// How long two mismatched cards stay face up before flipping back
    #[serde(default = "default_flip_back_ms")]
    pub flip_back_ms: u64,

    /// Use A-H card faces instead of emoji (for terminals without emoji fonts)
    #[serde(default)]
    pub ascii_symbols: bool,

    /// Palette overrides
    #[serde(default)]
    pub theme: ThemeColors,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_one: default_player_one(),
            player_two: default_player_two(),
            flip_back_ms: default_flip_back_ms(),
            ascii_symbols: false,
            theme: ThemeColors::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("kioku");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            player_one: "Aiko".to_string(),
            player_two: "Ben".to_string(),
            flip_back_ms: 750,
            ascii_symbols: true,
            theme: ThemeColors {
                accent: Some("#FFC107".to_string()),
                ..ThemeColors::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.player_one, deserialized.player_one);
        assert_eq!(config.flip_back_ms, deserialized.flip_back_ms);
        assert_eq!(config.theme.accent, deserialized.theme.accent);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("ascii_symbols = true").unwrap();

        assert!(config.ascii_symbols);
        assert_eq!(config.player_one, "Player 1");
        assert_eq!(config.player_two, "Player 2");
        assert_eq!(config.flip_back_ms, 1000);
        assert!(config.theme.accent.is_none());
    }
}
