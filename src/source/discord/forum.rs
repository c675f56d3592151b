//! A Discord forum channel as a `ForumSource`.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use super::DiscordClient;
use super::wire::{self, ThreadList};
use crate::error::Result;
use crate::models::{ForumThread, StarterMessage};
use crate::source::ForumSource;

/// Largest page the archived-threads endpoint returns.
const ARCHIVE_PAGE_SIZE: usize = 100;

/// Largest page the channel-messages endpoint returns.
const MESSAGE_PAGE_SIZE: usize = 100;

/// One forum channel in one guild.
#[derive(Clone)]
pub struct DiscordForum {
    client: DiscordClient,
    channel_id: String,
    guild_id: String,
    name: String,
}

impl DiscordForum {
    pub(super) fn new(
        client: DiscordClient,
        channel_id: String,
        guild_id: String,
        name: String,
    ) -> Self {
        Self {
            client,
            channel_id,
            guild_id,
            name,
        }
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert a thread channel, dropping it when no creation time is known.
    fn to_forum_thread(&self, channel: wire::Channel) -> Option<ForumThread> {
        let created_at = channel
            .thread_metadata
            .as_ref()
            .and_then(|m| m.create_timestamp)
            .or_else(|| wire::snowflake_time(&channel.id));

        let Some(created_at) = created_at else {
            log::debug!("Skipping thread {} without a creation time", channel.id);
            return None;
        };

        Some(ForumThread {
            url: format!("https://discord.com/channels/{}/{}", self.guild_id, channel.id),
            title: channel.name.unwrap_or_default(),
            owner_id: channel.owner_id,
            id: channel.id,
            created_at,
        })
    }

    /// Fetch one page of archived threads older than `before`.
    async fn archived_page(&self, before: Option<&str>) -> Result<ThreadList> {
        let mut query = vec![("limit", ARCHIVE_PAGE_SIZE.to_string())];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }
        self.client
            .get_json(
                &format!("/channels/{}/threads/archived/public", self.channel_id),
                &query,
            )
            .await
    }
}

#[async_trait]
impl ForumSource for DiscordForum {
    async fn active_threads(&self) -> Result<Vec<ForumThread>> {
        let list: ThreadList = self
            .client
            .get_json(&format!("/guilds/{}/threads/active", self.guild_id), &[])
            .await?;

        // The endpoint lists the whole guild; keep this forum's threads only.
        Ok(list
            .threads
            .into_iter()
            .filter(|t| t.parent_id.as_deref() == Some(self.channel_id.as_str()))
            .filter_map(|t| self.to_forum_thread(t))
            .collect())
    }

    fn archived_threads(&self) -> BoxStream<'_, Result<ForumThread>> {
        // State: `None` once exhausted, otherwise the cursor for the next page.
        stream::unfold(Some(None::<String>), move |cursor| async move {
            let before = cursor?;
            match self.archived_page(before.as_deref()).await {
                Ok(page) => {
                    let next = if page.has_more {
                        page.threads
                            .last()
                            .and_then(|t| t.thread_metadata.as_ref())
                            .map(|m| Some(m.archive_timestamp.clone()))
                    } else {
                        None
                    };
                    let threads: Vec<Result<ForumThread>> = page
                        .threads
                        .into_iter()
                        .filter_map(|t| self.to_forum_thread(t))
                        .map(Ok)
                        .collect();
                    Some((stream::iter(threads), next))
                }
                Err(e) => Some((stream::iter(vec![Err(e)]), None)),
            }
        })
        .flatten()
        .boxed()
    }

    async fn starter_message(&self, thread_id: &str) -> Result<Option<StarterMessage>> {
        // A forum post's starter message shares the thread's id.
        let path = format!("/channels/{thread_id}/messages/{thread_id}");
        match self.client.get_json::<wire::Message>(&path, &[]).await {
            Ok(message) => Ok(Some(StarterMessage {
                id: message.id,
                author: message.author.map(wire::User::into_member),
                content: message.content,
                attachments: message.attachments,
                reactions: message.reactions.iter().map(|r| r.count).collect(),
            })),
            Err(e) if e.is_missing() => {
                log::debug!("Starter message of {} unavailable: {}", thread_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn message_count(&self, thread_id: &str) -> Result<u64> {
        let path = format!("/channels/{thread_id}/messages");
        let mut count = 0u64;
        let mut before: Option<String> = None;

        loop {
            let mut query = vec![("limit", MESSAGE_PAGE_SIZE.to_string())];
            if let Some(id) = &before {
                query.push(("before", id.clone()));
            }

            let page: Vec<wire::MessageId> = self.client.get_json(&path, &query).await?;
            count += page.len() as u64;

            if page.len() < MESSAGE_PAGE_SIZE {
                return Ok(count);
            }
            before = page.last().map(|m| m.id.clone());
        }
    }
}
