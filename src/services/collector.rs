//! Thread collection service.
//!
//! Merges a forum's active and archived listings into one ordered list.

use futures::TryStreamExt;

use crate::error::Result;
use crate::models::ForumThread;
use crate::source::ForumSource;

/// Collects every thread a forum source knows about.
pub struct ThreadCollector<'a> {
    source: &'a dyn ForumSource,
}

impl<'a> ThreadCollector<'a> {
    pub fn new(source: &'a dyn ForumSource) -> Self {
        Self { source }
    }

    /// Active threads first, then archived ones in listing order.
    ///
    /// No deduplication. A failing archive page aborts the whole collection.
    pub async fn collect(&self) -> Result<Vec<ForumThread>> {
        let mut threads = self.source.active_threads().await?;
        let active = threads.len();

        let archived: Vec<ForumThread> = self.source.archived_threads().try_collect().await?;
        let archived_count = archived.len();
        threads.extend(archived);

        log::info!(
            "Found {} threads ({} active, {} archived)",
            threads.len(),
            active,
            archived_count
        );
        Ok(threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testing::{MockForum, thread};

    #[tokio::test]
    async fn test_active_then_archived_in_order() {
        let forum = MockForum::new()
            .with_active(vec![thread("a1"), thread("a2")])
            .with_archived(vec![thread("x1"), thread("x2"), thread("x3")]);

        let threads = ThreadCollector::new(&forum).collect().await.unwrap();
        let ids: Vec<_> = threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "x1", "x2", "x3"]);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let forum = MockForum::new()
            .with_active(vec![thread("same")])
            .with_archived(vec![thread("same")]);

        let threads = ThreadCollector::new(&forum).collect().await.unwrap();
        assert_eq!(threads.len(), 2);
    }

    #[tokio::test]
    async fn test_archive_failure_propagates() {
        let forum = MockForum::new()
            .with_active(vec![thread("a1")])
            .with_archived(vec![thread("x1")])
            .failing_archive_after(1);

        let err = ThreadCollector::new(&forum).collect().await.unwrap_err();
        assert!(matches!(err, AppError::Source { .. }));
    }

    #[tokio::test]
    async fn test_archive_restartable() {
        let forum = MockForum::new().with_archived(vec![thread("x1"), thread("x2")]);
        let collector = ThreadCollector::new(&forum);

        assert_eq!(collector.collect().await.unwrap().len(), 2);
        assert_eq!(collector.collect().await.unwrap().len(), 2);
    }
}
