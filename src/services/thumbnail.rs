//! Thumbnail resolution service.
//!
//! A thread's preview image is looked up through an ordered chain of
//! strategies; the first one that yields a URL wins:
//!
//! 1. `AttachmentImage`: first image attachment of the starter message
//! 2. `LinkPreview`: `og:image` of the first page linked from the content
//!
//! Resolution never fails. Every miss is logged and yields `None`.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};

use crate::models::ThreadRecord;
use crate::utils::extract_first_url;
use crate::utils::http::PageFetcher;

static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#).expect("og:image selector is valid")
});

/// First image attachment URL, in attachment order.
pub fn attachment_image(record: &ThreadRecord) -> Option<String> {
    record
        .attachments
        .iter()
        .find(|a| a.is_image())
        .map(|a| a.url.clone())
}

/// Content of the first `og:image` meta tag, when non-empty.
pub fn open_graph_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let tag = document.select(&OG_IMAGE).next()?;
    let content = tag.value().attr("content")?.trim();
    (!content.is_empty()).then(|| content.to_string())
}

/// One way of finding a thumbnail.
#[async_trait]
pub trait ThumbnailStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve(&self, record: &ThreadRecord) -> Option<String>;
}

/// Uses an image attached to the starter message. No network access.
pub struct AttachmentImage;

#[async_trait]
impl ThumbnailStrategy for AttachmentImage {
    fn name(&self) -> &'static str {
        "attachment"
    }

    async fn resolve(&self, record: &ThreadRecord) -> Option<String> {
        attachment_image(record)
    }
}

/// Fetches the first linked page and reads its Open Graph image.
pub struct LinkPreview {
    fetcher: Arc<dyn PageFetcher>,
}

impl LinkPreview {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ThumbnailStrategy for LinkPreview {
    fn name(&self) -> &'static str {
        "link-preview"
    }

    async fn resolve(&self, record: &ThreadRecord) -> Option<String> {
        let Some(url) = extract_first_url(&record.content) else {
            log::debug!("'{}' has no link to preview", record.title);
            return None;
        };

        log::info!(
            "No attachment thumbnail for '{}'. Looking up {}",
            record.title,
            url
        );

        let html = match self.fetcher.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("Thumbnail lookup failed for {}: {}", url, e);
                return None;
            }
        };

        let image = open_graph_image(&html);
        match &image {
            Some(image) => log::info!("  -> Thumbnail found: {}", image),
            None => log::info!("  -> No og:image on {}", url),
        }
        image
    }
}

/// Ordered chain of thumbnail strategies.
pub struct ThumbnailResolver {
    strategies: Vec<Box<dyn ThumbnailStrategy>>,
}

impl ThumbnailResolver {
    pub fn new(strategies: Vec<Box<dyn ThumbnailStrategy>>) -> Self {
        Self { strategies }
    }

    /// Attachment first, then link preview.
    pub fn standard(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::new(vec![
            Box::new(AttachmentImage),
            Box::new(LinkPreview::new(fetcher)),
        ])
    }

    /// First strategy result, or `None` when every strategy misses.
    pub async fn resolve(&self, record: &ThreadRecord) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(url) = strategy.resolve(record).await {
                log::debug!("Thumbnail for '{}' from {}", record.title, strategy.name());
                return Some(url);
            }
        }
        None
    }

    /// Resolve many records, at most `concurrency` at a time. Output order
    /// matches input order.
    pub async fn resolve_all(
        &self,
        records: &[ThreadRecord],
        concurrency: usize,
    ) -> Vec<Option<String>> {
        stream::iter(records)
            .map(|record| self.resolve(record))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
