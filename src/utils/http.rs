// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use crate::error::{AppError, Result};
use crate::models::ThumbnailConfig;

/// Maximum redirects followed for one page.
const MAX_REDIRECTS: usize = 10;

/// Bytes of a page read before the rest is dropped. `og:image` lives in `<head>`.
pub const MAX_PAGE_BYTES: usize = 1024 * 1024;

/// Create a configured asynchronous HTTP client for third-party pages.
pub fn create_async_client(config: &ThumbnailConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(client)
}

/// Fetches the body of a web page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// `PageFetcher` over a reqwest client.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ThumbnailConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    /// Accepts 2xx and 3xx final statuses with an HTML body; anything else
    /// is an error. At most `MAX_PAGE_BYTES` of the body are read.
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(content_type) = content_type.filter(|ct| !ct.contains("html")) {
            return Err(AppError::source(url, format!("not an HTML page ({content_type})")));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = MAX_PAGE_BYTES - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                log::debug!("Page {} truncated at {} bytes", url, MAX_PAGE_BYTES);
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
