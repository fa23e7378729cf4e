use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for status and rating markers
    pub use_glyphs: bool,

    /// Show row numbers in the table
    pub show_row_numbers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Backend base URL; unset means no API mode
    pub api_url: Option<String>,

    /// Directory with rentals/accounts files for file mode
    pub data_dir: Option<PathBuf>,

    /// Where exports land; defaults to the current directory
    pub export_dir: Option<PathBuf>,

    /// Cooldown between approval actions, in milliseconds
    pub approval_cooldown_ms: u64,

    /// How long status line messages stay visible, in seconds
    pub status_message_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_row_numbers: false,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            data_dir: None,
            export_dir: None,
            approval_cooldown_ms: 1000,
            status_message_secs: 5,
        }
    }
}

impl Config {
    /// Load config from the default location, creating it on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("agrodash").join("config.toml"))
    }

    /// Export directory to use, falling back to the working directory
    pub fn export_dir(&self) -> PathBuf {
        self.behavior
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.behavior.approval_cooldown_ms, 1000);
        assert!(parsed.display.use_glyphs);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let parsed: Config = toml::from_str("[display]\nuse_glyphs = false\n").unwrap();
        assert!(!parsed.display.use_glyphs);
        assert_eq!(parsed.behavior.status_message_secs, 5);
        assert!(parsed.behavior.api_url.is_none());
    }
}
