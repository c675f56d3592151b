//! Per-thread engagement counters.

use crate::models::{ForumThread, ThreadStats, TimeWindow};
use crate::source::ForumSource;

/// Threads created inside `window`, bounds inclusive, in input order.
pub fn in_window<'t>(threads: &'t [ForumThread], window: &TimeWindow) -> Vec<&'t ForumThread> {
    threads
        .iter()
        .filter(|t| window.contains(t.created_at))
        .collect()
}

/// Reads message and reaction counts from a forum source.
pub struct StatsExtractor<'a> {
    source: &'a dyn ForumSource,
}

impl<'a> StatsExtractor<'a> {
    pub fn new(source: &'a dyn ForumSource) -> Self {
        Self { source }
    }

    /// Counters for one thread. Failures count as zero and are logged.
    pub async fn stats(&self, thread: &ForumThread) -> ThreadStats {
        let message_count = match self.source.message_count(&thread.id).await {
            Ok(count) => count,
            Err(e) => {
                log::warn!(
                    "Could not count messages in '{}': {}. Using 0.",
                    thread.title,
                    e
                );
                0
            }
        };

        let reaction_count = match self.source.starter_message(&thread.id).await {
            Ok(Some(message)) => message.reaction_count(),
            Ok(None) => {
                log::warn!(
                    "Starter message of '{}' not found. Reactions counted as 0.",
                    thread.title
                );
                0
            }
            Err(e) => {
                log::warn!(
                    "Could not read reactions of '{}': {}. Using 0.",
                    thread.title,
                    e
                );
                0
            }
        };

        ThreadStats::new(message_count, reaction_count)
    }
}
