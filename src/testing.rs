// Test mocks for the digest pipeline.
//
// One mock per capability boundary:
// - MockForum (ForumSource): fixed listings, starter messages and counts
// - MockDirectory (MemberDirectory): linear member list
// - MockDelivery (MessageDelivery): records sends, fails chosen recipients
// - MockFetcher (PageFetcher): URL→HTML map with a call counter
//
// Plus builders for threads and members, and a Discord client for wiremock
// servers.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{DiscordConfig, ForumThread, Member, Notification, StarterMessage};
use crate::source::{DiscordClient, ForumSource, MemberDirectory, MessageDelivery};
use crate::utils::http::PageFetcher;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Wednesday 2026-10-07 12:00 KST.
pub fn mid_week() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 7, 3, 0, 0).unwrap()
}

pub fn thread(id: &str) -> ForumThread {
    thread_by(id, None, mid_week())
}

pub fn thread_by(id: &str, owner_id: Option<&str>, created_at: DateTime<Utc>) -> ForumThread {
    ForumThread {
        id: id.to_string(),
        title: format!("Post {id}"),
        owner_id: owner_id.map(str::to_string),
        created_at,
        url: format!("https://discord.com/channels/1/{id}"),
    }
}

pub fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        display_name: format!("{name} (display)"),
        avatar_url: format!("https://cdn.example.com/avatars/{id}.png"),
    }
}

pub fn starter(content: &str) -> StarterMessage {
    StarterMessage {
        id: "starter".to_string(),
        content: content.to_string(),
        ..StarterMessage::default()
    }
}

/// A real client pointed at a local mock server; two 429 retries.
pub fn discord_client(server: &wiremock::MockServer) -> DiscordClient {
    let config = DiscordConfig {
        api_base: server.uri(),
        max_retries: 2,
        ..DiscordConfig::default()
    };
    DiscordClient::new(&config, "token").unwrap()
}

// ---------------------------------------------------------------------------
// MockForum
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockForum {
    active: Vec<ForumThread>,
    archived: Vec<ForumThread>,
    archive_fail_after: Option<usize>,
    starters: HashMap<String, StarterMessage>,
    broken_starters: HashSet<String>,
    counts: HashMap<String, u64>,
    broken_counts: HashSet<String>,
}

impl MockForum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, threads: Vec<ForumThread>) -> Self {
        self.active = threads;
        self
    }

    pub fn with_archived(mut self, threads: Vec<ForumThread>) -> Self {
        self.archived = threads;
        self
    }

    /// Yield `n` archived threads, then an error.
    pub fn failing_archive_after(mut self, n: usize) -> Self {
        self.archive_fail_after = Some(n);
        self
    }

    pub fn with_starter(mut self, thread_id: &str, message: StarterMessage) -> Self {
        self.starters.insert(thread_id.to_string(), message);
        self
    }

    pub fn broken_starter(mut self, thread_id: &str) -> Self {
        self.broken_starters.insert(thread_id.to_string());
        self
    }

    pub fn with_count(mut self, thread_id: &str, count: u64) -> Self {
        self.counts.insert(thread_id.to_string(), count);
        self
    }

    pub fn broken_count(mut self, thread_id: &str) -> Self {
        self.broken_counts.insert(thread_id.to_string());
        self
    }
}

#[async_trait]
impl ForumSource for MockForum {
    async fn active_threads(&self) -> Result<Vec<ForumThread>> {
        Ok(self.active.clone())
    }

    fn archived_threads(&self) -> BoxStream<'_, Result<ForumThread>> {
        let mut items: Vec<Result<ForumThread>> = self.archived.iter().cloned().map(Ok).collect();
        if let Some(n) = self.archive_fail_after {
            items.truncate(n);
            items.push(Err(AppError::source("archived threads", "page failed")));
        }
        stream::iter(items).boxed()
    }

    async fn starter_message(&self, thread_id: &str) -> Result<Option<StarterMessage>> {
        if self.broken_starters.contains(thread_id) {
            return Err(AppError::Api {
                status: 500,
                message: "starter".into(),
            });
        }
        Ok(self.starters.get(thread_id).cloned())
    }

    async fn message_count(&self, thread_id: &str) -> Result<u64> {
        if self.broken_counts.contains(thread_id) {
            return Err(AppError::Forbidden("history".into()));
        }
        Ok(self.counts.get(thread_id).copied().unwrap_or(0))
    }
}

// ---------------------------------------------------------------------------
// MockDirectory
// ---------------------------------------------------------------------------

pub struct MockDirectory {
    members: Vec<Member>,
    name_lookups: AtomicUsize,
}

impl MockDirectory {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            name_lookups: AtomicUsize::new(0),
        }
    }

    pub fn name_lookups(&self) -> usize {
        self.name_lookups.load(Ordering::SeqCst)
    }
}

impl MemberDirectory for MockDirectory {
    fn find_by_name(&self, name: &str) -> Option<Member> {
        self.name_lookups.fetch_add(1, Ordering::SeqCst);
        self.members.iter().find(|m| m.name == name).cloned()
    }

    fn find_by_id(&self, id: &str) -> Option<Member> {
        self.members.iter().find(|m| m.id == id).cloned()
    }
}

// ---------------------------------------------------------------------------
// MockDelivery
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockDelivery {
    failing_recipients: HashSet<String>,
    failing_notifications: HashSet<usize>,
    pub direct: Mutex<Vec<(String, String)>>,
    pub notifications: Mutex<Vec<(String, Notification)>>,
    notification_attempts: AtomicUsize,
}

impl MockDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct messages to `name` fail with a permission error.
    pub fn failing_for(mut self, name: &str) -> Self {
        self.failing_recipients.insert(name.to_string());
        self
    }

    /// The `index`-th channel notification (0-based) fails.
    pub fn failing_notification(mut self, index: usize) -> Self {
        self.failing_notifications.insert(index);
        self
    }

    pub fn direct_recipients(&self) -> Vec<String> {
        self.direct
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn sent_notifications(&self) -> Vec<(String, Notification)> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageDelivery for MockDelivery {
    async fn send_direct(&self, recipient: &Member, message: &str) -> Result<()> {
        if self.failing_recipients.contains(&recipient.name) {
            return Err(AppError::Forbidden(format!("cannot DM {}", recipient.name)));
        }
        self.direct
            .lock()
            .unwrap()
            .push((recipient.name.clone(), message.to_string()));
        Ok(())
    }

    async fn send_notification(
        &self,
        channel_id: &str,
        notification: &Notification,
    ) -> Result<()> {
        let attempt = self.notification_attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing_notifications.contains(&attempt) {
            return Err(AppError::Api {
                status: 500,
                message: "notification".into(),
            });
        }
        self.notifications
            .lock()
            .unwrap()
            .push((channel_id.to_string(), notification.clone()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Returns the registered HTML, or an error for unknown URLs.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or_else(|| AppError::Api {
            status: 404,
            message: url.to_string(),
        })
    }
}
