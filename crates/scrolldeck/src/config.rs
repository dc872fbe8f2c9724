use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "scrolldeck";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<TuningConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

/// Interaction constants tuned empirically for typical deck layouts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Scroll-spy lookahead margin in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookahead_margin: Option<f32>,

    /// Delay before scrolling to a deep-linked section, letting layout settle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_delay_ms: Option<u64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `scrolldeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# scrolldeck configuration \u{2014} https://github.com/mklab-se/scrolldeck\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn lookahead_margin(&self) -> f32 {
        self.tuning
            .as_ref()
            .and_then(|t| t.lookahead_margin)
            .unwrap_or(200.0)
    }

    pub fn settle_delay_ms(&self) -> u64 {
        self.tuning
            .as_ref()
            .and_then(|t| t.settle_delay_ms)
            .unwrap_or(100)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.language" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid language: must be a language code like 'en'.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .language = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "tuning.lookahead_margin" => {
                let margin: f32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid lookahead_margin: {value}. Must be a number.")
                })?;
                if margin < 0.0 {
                    anyhow::bail!("Invalid lookahead_margin: must not be negative.");
                }
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .lookahead_margin = Some(margin);
            }
            "tuning.settle_delay_ms" => {
                let delay: u64 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid settle_delay_ms: {value}. Must be a whole number.")
                })?;
                self.tuning
                    .get_or_insert_with(TuningConfig::default)
                    .settle_delay_ms = Some(delay);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.language, defaults.windowed, tuning.lookahead_margin, tuning.settle_delay_ms"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.lookahead_margin(), 200.0);
        assert_eq!(config.settle_delay_ms(), 100);
    }

    #[test]
    fn test_set_theme_validates() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(
            config.defaults.as_ref().unwrap().theme.as_deref(),
            Some("dark")
        );
        assert!(config.set("defaults.theme", "sepia").is_err());
    }

    #[test]
    fn test_set_tuning_values() {
        let mut config = Config::default();
        config.set("tuning.lookahead_margin", "150").unwrap();
        config.set("tuning.settle_delay_ms", "250").unwrap();
        assert_eq!(config.lookahead_margin(), 150.0);
        assert_eq!(config.settle_delay_ms(), 250);
        assert!(config.set("tuning.lookahead_margin", "-5").is_err());
        assert!(config.set("tuning.settle_delay_ms", "soon").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        let err = config.set("defaults.volume", "11").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_round_trips_through_yaml() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.windowed", "true").unwrap();
        config.set("tuning.lookahead_margin", "120").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.lookahead_margin(), 120.0);
        assert_eq!(back.defaults.unwrap().windowed, Some(true));
    }
}
