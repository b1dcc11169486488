use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::banner::BannerMessage;
use crate::theme::ThemeMode;

fn default_rotation_period_ms() -> u64 {
    5000
}

fn default_marquee_speed() -> f64 {
    12.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stored theme preference (unset until the user toggles it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,

    /// Accent color override, as #RRGGBB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,

    /// How long each rotating banner message stays up
    #[serde(default = "default_rotation_period_ms")]
    pub rotation_period_ms: u64,

    /// Marquee speed in terminal cells per second
    #[serde(default = "default_marquee_speed")]
    pub marquee_speed: f64,

    /// Show the clock in the header
    #[serde(default = "default_true")]
    pub show_clock: bool,

    /// Width-timed marquee messages (built-in messages when empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marquee_messages: Vec<String>,

    /// Catalog file to use instead of the built-in catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Rotating banner messages (built-in messages when empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub banner_messages: Vec<BannerMessage>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: None,
            accent: None,
            rotation_period_ms: default_rotation_period_ms(),
            marquee_speed: default_marquee_speed(),
            show_clock: true,
            banner_messages: Vec::new(),
            marquee_messages: Vec::new(),
            catalog: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("calcdir");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub async fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => match Self::from_toml_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Leave a broken file alone so the user can fix it
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Failed to write default config: {}", e);
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.sanitize();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let mut clean_config = self.clone();
        clean_config.sanitize();

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Drop values the widgets can't use
    fn sanitize(&mut self) {
        self.banner_messages.retain(|m| !m.text.trim().is_empty());
        self.marquee_messages.retain(|m| !m.trim().is_empty());

        if self.rotation_period_ms == 0 {
            self.rotation_period_ms = default_rotation_period_ms();
        }
        if !self.marquee_speed.is_finite() || self.marquee_speed <= 0.0 {
            self.marquee_speed = default_marquee_speed();
        }
        if self.accent.as_ref().map(|s| s.is_empty()).unwrap_or(false) {
            self.accent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            theme: Some(ThemeMode::Light),
            accent: Some("#ffc107".to_string()),
            rotation_period_ms: 3000,
            marquee_speed: 20.0,
            show_clock: false,
            banner_messages: vec![BannerMessage::new("Hello").highlighted()],
            marquee_messages: vec!["Scrolling".to_string()],
            catalog: Some(PathBuf::from("/tmp/catalog.toml")),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AppConfig::from_toml_str("theme = \"dark\"").unwrap();
        assert_eq!(config.theme, Some(ThemeMode::Dark));
        assert_eq!(config.rotation_period_ms, 5000);
        assert!(config.show_clock);
        assert!(config.banner_messages.is_empty());
    }

    #[test]
    fn test_sanitize_rejects_unusable_values() {
        let content = r#"
            rotation_period_ms = 0
            marquee_speed = -4.0
            accent = ""
            marquee_messages = ["", "  ", "kept"]

            [[banner_messages]]
            text = " "
        "#;
        let config = AppConfig::from_toml_str(content).unwrap();

        assert_eq!(config.rotation_period_ms, 5000);
        assert_eq!(config.marquee_speed, 12.0);
        assert_eq!(config.accent, None);
        assert_eq!(config.marquee_messages, vec!["kept".to_string()]);
        assert!(config.banner_messages.is_empty());
    }

    #[test]
    fn test_invalid_theme_is_an_error() {
        assert!(AppConfig::from_toml_str("theme = \"sepia\"").is_err());
    }
}
