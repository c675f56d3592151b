// src/config.rs

//! Run inputs taken from the process environment.
//!
//! The bot token, channel ids and roster are deployment secrets, so they are
//! read from environment variables rather than `config.toml`.

use crate::error::{AppError, Result};
use crate::models::Roster;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const FORUM_CHANNEL_VAR: &str = "DISCORD_CHANNEL_ID";
pub const NOTIFY_CHANNEL_VAR: &str = "DISCORD_NOTI_CHANNEL_ID";
pub const ROSTER_VAR: &str = "TARGET_USERS";

/// Values every run needs.
#[derive(Clone)]
pub struct Environment {
    pub token: String,
    pub forum_channel_id: String,
    /// Only the weekly check posts to a channel
    pub notification_channel_id: Option<String>,
    /// Empty when unset; the export does not need it
    pub roster: Roster,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("token", &"<redacted>")
            .field("forum_channel_id", &self.forum_channel_id)
            .field("notification_channel_id", &self.notification_channel_id)
            .field("roster", &self.roster)
            .finish()
    }
}

impl Environment {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::config(format!("{key} is not set")))
        };

        let token = required(TOKEN_VAR)?;
        let forum_channel_id = parse_snowflake(FORUM_CHANNEL_VAR, &required(FORUM_CHANNEL_VAR)?)?;
        let notification_channel_id = lookup(NOTIFY_CHANNEL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| parse_snowflake(NOTIFY_CHANNEL_VAR, &v))
            .transpose()?;
        let roster = Roster::parse(&lookup(ROSTER_VAR).unwrap_or_default());

        Ok(Self {
            token,
            forum_channel_id,
            notification_channel_id,
            roster,
        })
    }

    /// The notification channel, required by the weekly check.
    pub fn require_notification_channel(&self) -> Result<&str> {
        self.notification_channel_id
            .as_deref()
            .ok_or_else(|| AppError::config(format!("{NOTIFY_CHANNEL_VAR} is not set")))
    }

    /// The target roster, required by the check and the reminder.
    pub fn require_roster(&self) -> Result<&Roster> {
        if self.roster.is_empty() {
            return Err(AppError::config(format!("{ROSTER_VAR} is not set")));
        }
        Ok(&self.roster)
    }
}

fn parse_snowflake(key: &str, value: &str) -> Result<String> {
    value
        .parse::<u64>()
        .map(|id| id.to_string())
        .map_err(|_| AppError::config(format!("{key} is not a numeric id: {value}")))
}
