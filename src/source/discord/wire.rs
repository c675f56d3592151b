//! Discord REST payloads, reduced to the fields the digest reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Attachment, Member};

/// Channel type id of a guild forum.
pub const GUILD_FORUM: u8 = 15;

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// Discord epoch (2015-01-01T00:00:00Z) in unix milliseconds.
const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub thread_metadata: Option<ThreadMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadMetadata {
    pub archive_timestamp: String,
    /// Only present on threads created after 2022-01-09
    #[serde(default)]
    pub create_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadList {
    pub threads: Vec<Channel>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("{CDN_BASE}/avatars/{}/{hash}.png", self.id),
            None => default_avatar_url(&self.id),
        }
    }

    pub fn into_member(self) -> Member {
        let avatar_url = self.avatar_url();
        Member {
            display_name: self.global_name.clone().unwrap_or_else(|| self.username.clone()),
            id: self.id,
            name: self.username,
            avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    /// Guild-specific avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
}

impl GuildMember {
    pub fn into_member(self, guild_id: &str) -> Option<Member> {
        let user = self.user?;
        let avatar_url = match &self.avatar {
            Some(hash) => format!(
                "{CDN_BASE}/guilds/{guild_id}/users/{}/avatars/{hash}.png",
                user.id
            ),
            None => user.avatar_url(),
        };
        let display_name = self
            .nick
            .or_else(|| user.global_name.clone())
            .unwrap_or_else(|| user.username.clone());

        Some(Member {
            id: user.id,
            name: user.username,
            display_name,
            avatar_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Reaction {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// Only the id is needed from a listed message.
#[derive(Debug, Deserialize)]
pub struct MessageId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DmChannel {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateDm<'a> {
    pub recipient_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RateLimited {
    pub retry_after: f64,
}

/// Creation instant encoded in a snowflake id.
pub fn snowflake_time(id: &str) -> Option<DateTime<Utc>> {
    let raw = id.parse::<u64>().ok()?;
    let millis = i64::try_from(raw >> 22).ok()? + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis)
}

fn default_avatar_url(user_id: &str) -> String {
    let index = user_id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0);
    format!("{CDN_BASE}/embed/avatars/{index}.png")
}
