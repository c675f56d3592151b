//! Storage abstractions for the forum export.
//!
//! The export is a single pretty-printed JSON array of posts, replaced as a
//! whole on every run:
//!
//! ```text
//! data/
//! └── forum-posts.json
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PostExport;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about an export write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of posts written
    pub count: usize,
    /// Where the posts ended up, for logging
    pub location: String,
}

/// Trait for export storage backends.
#[async_trait]
pub trait ExportStorage: Send + Sync {
    /// Replace the export with `posts`. Readers never see a partial file.
    async fn write_posts(&self, posts: &[PostExport]) -> Result<WriteSummary>;

    /// Load the current export, or an empty list when none exists yet.
    async fn load_posts(&self) -> Result<Vec<PostExport>>;
}
