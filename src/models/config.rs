//! Application configuration structures.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Discord REST client settings
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Weekly report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Thumbnail lookup settings
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    /// Direct message pacing
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.discord.api_base.trim().is_empty() {
            return Err(AppError::validation("discord.api_base is empty"));
        }
        url::Url::parse(&self.discord.api_base)?;
        if self.discord.user_agent.trim().is_empty() {
            return Err(AppError::validation("discord.user_agent is empty"));
        }
        if self.discord.timeout_secs == 0 {
            return Err(AppError::validation("discord.timeout_secs must be > 0"));
        }
        if self.report.offset().is_none() {
            return Err(AppError::validation(
                "report.utc_offset_hours must be within -23..=23",
            ));
        }
        if self.thumbnail.timeout_secs == 0 {
            return Err(AppError::validation("thumbnail.timeout_secs must be > 0"));
        }
        if self.thumbnail.max_concurrent == 0 {
            return Err(AppError::validation("thumbnail.max_concurrent must be > 0"));
        }
        if self.paths.export_file.trim().is_empty() {
            return Err(AppError::validation("paths.export_file is empty"));
        }
        Ok(())
    }
}

/// Discord REST client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// REST API root, including the version segment
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    #[serde(default = "defaults::bot_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::api_timeout")]
    pub timeout_secs: u64,

    /// How many times a rate-limited (429) request is retried
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            user_agent: defaults::bot_user_agent(),
            timeout_secs: defaults::api_timeout(),
            max_retries: defaults::max_retries(),
        }
    }
}

/// Weekly report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Offset of the reference timezone used for week boundaries
    #[serde(default = "defaults::utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Number of hot threads announced
    #[serde(default = "defaults::top_n")]
    pub top_n: usize,

    /// Challenge name shown in message footers
    #[serde(default = "defaults::brand")]
    pub brand: String,
}

impl ReportConfig {
    /// The reference timezone, or `None` when the configured hours are out of range.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours.checked_mul(3600)?)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: defaults::utc_offset_hours(),
            top_n: defaults::top_n(),
            brand: defaults::brand(),
        }
    }
}

/// Thumbnail lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Per-page timeout in seconds
    #[serde(default = "defaults::thumbnail_timeout")]
    pub timeout_secs: u64,

    /// Maximum pages fetched at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Browser User-Agent; some sites block obvious bots
    #[serde(default = "defaults::browser_user_agent")]
    pub user_agent: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::thumbnail_timeout(),
            max_concurrent: defaults::max_concurrent(),
            user_agent: defaults::browser_user_agent(),
        }
    }
}

/// Direct message pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Delay after each direct message in milliseconds
    #[serde(default = "defaults::dispatch_delay")]
    pub delay_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: defaults::dispatch_delay(),
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::export_file")]
    pub export_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            export_file: defaults::export_file(),
        }
    }
}

mod defaults {
    // Discord defaults
    pub fn api_base() -> String {
        "https://discord.com/api/v10".into()
    }
    pub fn bot_user_agent() -> String {
        "DiscordBot (https://github.com/forum-digest, 0.1)".into()
    }
    pub fn api_timeout() -> u64 {
        30
    }
    pub fn max_retries() -> u32 {
        3
    }

    // Report defaults
    pub fn utc_offset_hours() -> i32 {
        9
    }
    pub fn top_n() -> usize {
        3
    }
    pub fn brand() -> String {
        "Blog-Or-Death".into()
    }

    // Thumbnail defaults
    pub fn thumbnail_timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn browser_user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36".into()
    }

    // Dispatch defaults
    pub fn dispatch_delay() -> u64 {
        1000
    }

    // Path defaults
    pub fn export_file() -> String {
        "data/forum-posts.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thumbnail.timeout_secs, 10);
        assert_eq!(config.dispatch.delay_ms, 1000);
        assert_eq!(config.report.top_n, 3);
        assert_eq!(
            config.report.offset(),
            FixedOffset::east_opt(9 * 3600)
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [report]
            top_n = 5

            [dispatch]
            delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.utc_offset_hours, 9);
        assert_eq!(config.dispatch.delay_ms, 0);
        assert_eq!(config.discord.api_base, "https://discord.com/api/v10");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.report.utc_offset_hours = 30;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.thumbnail.max_concurrent = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.discord.api_base = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.report.top_n, 3);
    }
}
