use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagtimeConfig {
    /// Base URL of the tracking backend. Unset means `TAGTIME_API_HOST`,
    /// then `API_HOST`, then http://localhost:8787.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Seconds between background refreshes of the entry list.
    pub entries_refresh_secs: u64,
    /// Seconds a fetched tag list is considered fresh.
    pub tags_stale_secs: u64,
    /// Offer inline tag creation from the tag search.
    pub allow_tag_creation: bool,
    /// Tags offered while the backend has none.
    pub fallback_tags: Vec<String>,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for TagtimeConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            entries_refresh_secs: 30,
            tags_stale_secs: 60,
            allow_tag_creation: true,
            fallback_tags: [
                "Meeting",
                "Planning",
                "Design",
                "Development",
                "Testing",
                "Research",
            ]
            .map(String::from)
            .to_vec(),
            log_filter: "info".to_string(),
        }
    }
}

impl TagtimeConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("tagtime")
            .join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(dirs::cache_dir()
            .context("Cannot determine cache directory")?
            .join("tagtime")
            .join("tagtime.log"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn entries_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.entries_refresh_secs.max(1))
    }

    pub fn tags_stale_after(&self) -> Duration {
        Duration::from_secs(self.tags_stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(TagtimeConfig::parse("").unwrap(), TagtimeConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = TagtimeConfig::parse(
            r#"
            api_url = "https://tracker.example.com"
            allow_tag_creation = false
            fallback_tags = ["Focus"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url.as_deref(), Some("https://tracker.example.com"));
        assert!(!config.allow_tag_creation);
        assert_eq!(config.fallback_tags, vec!["Focus".to_string()]);
        assert_eq!(config.entries_refresh_secs, 30);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn zero_refresh_interval_is_clamped() {
        let config = TagtimeConfig {
            entries_refresh_secs: 0,
            ..TagtimeConfig::default()
        };
        assert_eq!(config.entries_refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let raw = toml::to_string_pretty(&TagtimeConfig::default()).unwrap();
        assert_eq!(TagtimeConfig::parse(&raw).unwrap(), TagtimeConfig::default());
    }
}
