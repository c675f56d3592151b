//! Forum export for the blog frontend.

use crate::error::Result;
use crate::models::{PostExport, ThreadRecord};
use crate::pipeline::RunContext;
use crate::services::{ThreadCollector, ThumbnailResolver};
use crate::storage::{ExportStorage, WriteSummary};

/// Export every thread of the forum with its preview image.
///
/// Threads whose starter message is gone are skipped. Any other source
/// error aborts before the previous export is replaced.
pub async fn run_export(ctx: &RunContext, storage: &dyn ExportStorage) -> Result<WriteSummary> {
    let threads = ThreadCollector::new(ctx.forum.as_ref()).collect().await?;

    let mut records = Vec::with_capacity(threads.len());
    for thread in threads {
        match ctx.forum.starter_message(&thread.id).await? {
            Some(starter) => records.push(ThreadRecord::new(thread, starter)),
            None => log::warn!("Starter message of '{}' not found. Skipping.", thread.title),
        }
    }

    let resolver = ThumbnailResolver::standard(ctx.fetcher.clone());
    let thumbnails = resolver
        .resolve_all(&records, ctx.config.thumbnail.max_concurrent)
        .await;

    let posts: Vec<PostExport> = records
        .iter()
        .zip(thumbnails)
        .map(|(record, thumbnail)| PostExport::from_record(record, thumbnail))
        .collect();

    log::info!(
        "{} posts exported, {} with a thumbnail",
        posts.len(),
        posts.iter().filter(|p| p.thumbnail.is_some()).count()
    );

    storage.write_posts(&posts).await
}
