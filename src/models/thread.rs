//! Forum thread data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Member;

/// A thread as returned by a forum listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    /// Thread id (the starter message shares it)
    pub id: String,

    /// Thread title
    pub title: String,

    /// Id of the member who opened the thread, if the source knows it
    pub owner_id: Option<String>,

    /// Creation instant
    pub created_at: DateTime<Utc>,

    /// Link that opens the thread in the client
    pub url: String,
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,

    /// Declared MIME type, when the platform reports one
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|t| t.starts_with("image/"))
    }
}

/// The first message of a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarterMessage {
    pub id: String,
    pub author: Option<Member>,
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Count per emoji, summed by `reaction_count`
    pub reactions: Vec<u64>,
}

impl StarterMessage {
    pub fn reaction_count(&self) -> u64 {
        self.reactions.iter().sum()
    }
}

/// A thread joined with its starter message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRecord {
    pub id: String,
    pub title: String,
    /// Starter message author; `None` when the platform did not return one
    pub owner: Option<Member>,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

impl ThreadRecord {
    pub fn new(thread: ForumThread, starter: StarterMessage) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            owner: starter.author,
            created_at: thread.created_at,
            url: thread.url,
            content: starter.content,
            attachments: starter.attachments,
        }
    }
}

/// Engagement counters for one thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadStats {
    pub message_count: u64,
    pub reaction_count: u64,
}

impl ThreadStats {
    pub fn new(message_count: u64, reaction_count: u64) -> Self {
        Self {
            message_count,
            reaction_count,
        }
    }

    /// Activity volume: messages plus reactions, unweighted.
    pub fn hot_score(&self) -> u64 {
        self.message_count + self.reaction_count
    }
}

/// An in-window thread with its resolved owner and counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadInfo {
    pub thread: ForumThread,
    pub owner: Option<Member>,
    pub stats: ThreadStats,
}
