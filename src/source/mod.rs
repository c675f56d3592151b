//! Capabilities the digest consumes from the chat platform.
//!
//! The pipeline only talks to these traits; `discord` holds the REST-backed
//! implementation and tests use in-memory mocks.

pub mod discord;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::models::{ForumThread, Member, Notification, StarterMessage};

// Re-export for convenience
pub use discord::DiscordClient;

/// Read access to one forum channel.
#[async_trait]
pub trait ForumSource: Send + Sync {
    /// Threads that are currently open. Bounded.
    async fn active_threads(&self) -> Result<Vec<ForumThread>>;

    /// Archived threads, fetched page by page as the stream is polled.
    ///
    /// Every call starts a fresh enumeration from the newest archive entry.
    fn archived_threads(&self) -> BoxStream<'_, Result<ForumThread>>;

    /// The message that opened `thread_id`, or `None` when it is gone or hidden.
    async fn starter_message(&self, thread_id: &str) -> Result<Option<StarterMessage>>;

    /// Number of messages in the thread, walking its full history.
    async fn message_count(&self, thread_id: &str) -> Result<u64>;
}

/// Guild membership lookups.
pub trait MemberDirectory: Send + Sync {
    fn find_by_name(&self, name: &str) -> Option<Member>;

    fn find_by_id(&self, id: &str) -> Option<Member>;
}

/// Outbound messages.
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    async fn send_direct(&self, recipient: &Member, message: &str) -> Result<()>;

    async fn send_notification(&self, channel_id: &str, notification: &Notification)
    -> Result<()>;
}
