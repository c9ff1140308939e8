use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::TimeRange;
use crate::pagination::DEFAULT_DELTA;

/// Sizes of the generated mock data sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSettings {
    pub dashboard_transactions: usize,
    pub token_transactions: usize,
    pub peer_tokens: usize,
    pub quorum_size: usize,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            dashboard_transactions: 100,
            token_transactions: 30,
            peer_tokens: 50,
            quorum_size: 7,
        }
    }
}

/// Optional hex colour overrides, e.g. `accent = "#22c55e"`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Rows per page in every paginated table
    pub page_size: usize,

    /// Page numbers shown either side of the current page
    pub window_delta: usize,

    /// UI refresh interval
    pub tick_rate_ms: u64,

    /// Chart range shown when the dashboard opens
    pub default_time_range: TimeRange,

    /// Fixed seed for reproducible mock data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub mock: MockSettings,

    pub theme: ThemeOverrides,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            window_delta: DEFAULT_DELTA,
            tick_rate_ms: 100,
            default_time_range: TimeRange::Day,
            seed: None,
            mock: MockSettings::default(),
            theme: ThemeOverrides::default(),
        }
    }
}

impl ExplorerConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("rubix-explorer");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(ExplorerConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Leave a broken file alone so the user can fix it
            return Ok(ExplorerConfig::default());
        }

        let config = ExplorerConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Parse and sanitize config text
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: ExplorerConfig = toml::from_str(content)?;
        config.page_size = config.page_size.max(1);
        config.tick_rate_ms = config.tick_rate_ms.clamp(16, 1000);
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
        let config = ExplorerConfig {
            page_size: 25,
            window_delta: 1,
            tick_rate_ms: 200,
            default_time_range: TimeRange::Year,
            seed: Some(1234),
            mock: MockSettings {
                dashboard_transactions: 500,
                ..MockSettings::default()
            },
            theme: ThemeOverrides {
                accent: Some("#22c55e".to_string()),
                ..ThemeOverrides::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = ExplorerConfig::parse(&serialized).unwrap();

        assert_eq!(deserialized.page_size, 25);
        assert_eq!(deserialized.window_delta, 1);
        assert_eq!(deserialized.default_time_range, TimeRange::Year);
        assert_eq!(deserialized.seed, Some(1234));
        assert_eq!(deserialized.mock.dashboard_transactions, 500);
        assert_eq!(deserialized.mock.quorum_size, 7);
        assert_eq!(deserialized.theme.accent.as_deref(), Some("#22c55e"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ExplorerConfig::parse("page_size = 0\ndefault_time_range = \"30d\"\n").unwrap();
        assert_eq!(config.page_size, 1, "page size is clamped to at least one row");
        assert_eq!(config.window_delta, DEFAULT_DELTA);
        assert_eq!(config.default_time_range, TimeRange::Month);
        assert_eq!(config.mock.peer_tokens, 50);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(ExplorerConfig::parse("page_size = \"ten\"").is_err());
    }
}
