//! Discord REST (API v10) implementation of the source capabilities.
//!
//! - `DiscordClient`: authenticated HTTP core, also the `MessageDelivery`
//! - `DiscordForum`: one forum channel as a `ForumSource`
//! - `DiscordDirectory`: preloaded guild members as a `MemberDirectory`

mod delivery;
mod forum;
mod members;
mod wire;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::DiscordConfig;

pub use forum::DiscordForum;
pub use members::DiscordDirectory;

/// Upper bound for a single rate-limit wait.
const MAX_RETRY_AFTER_SECS: f64 = 60.0;

/// Authenticated Discord REST client.
#[derive(Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    api_base: String,
    max_retries: u32,
}

impl DiscordClient {
    /// Create a client that authenticates as the bot owning `token`.
    pub fn new(config: &DiscordConfig, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| AppError::config("DISCORD_TOKEN contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Check the token and return the bot's username.
    pub async fn verify(&self) -> Result<String> {
        let user: wire::CurrentUser = self.get_json("/users/@me", &[]).await?;
        log::info!("Logged in as {} ({})", user.username, user.id);
        Ok(user.username)
    }

    /// Look up `channel_id` and make sure it is a forum.
    pub async fn open_forum(&self, channel_id: &str) -> Result<DiscordForum> {
        let channel: wire::Channel = self
            .get_json(&format!("/channels/{channel_id}"), &[])
            .await
            .map_err(|e| {
                if e.is_missing() {
                    AppError::ChannelNotFound(channel_id.to_string())
                } else {
                    e
                }
            })?;

        if channel.kind != wire::GUILD_FORUM {
            return Err(AppError::NotAForum {
                id: channel.id,
                kind: channel.kind,
            });
        }

        let guild_id = channel.guild_id.ok_or_else(|| {
            AppError::source(format!("channel {channel_id}"), "forum has no guild id")
        })?;
        let name = channel.name.unwrap_or_else(|| channel_id.to_string());

        Ok(DiscordForum::new(self.clone(), channel.id, guild_id, name))
    }

    /// Load every member of `guild_id` into an in-memory directory.
    pub async fn load_members(&self, guild_id: &str) -> Result<DiscordDirectory> {
        DiscordDirectory::load(self, guild_id).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        let response = self
            .execute(path, || self.http.get(&url).query(query))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .execute(path, || self.http.post(&url).json(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Send a request, waiting out 429 responses up to `max_retries` times.
    async fn execute(&self, context: &str, build: impl Fn() -> RequestBuilder) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let response = build().send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS && attempt < self.max_retries {
                let wait = response
                    .json::<wire::RateLimited>()
                    .await
                    .map(|r| r.retry_after)
                    .unwrap_or(1.0)
                    .clamp(0.0, MAX_RETRY_AFTER_SECS);
                log::warn!("Rate limited on {}; retrying in {:.2}s", context, wait);
                tokio::time::sleep(Duration::from_secs_f64(wait)).await;
                attempt += 1;
                continue;
            }

            return check_status(response, context).await;
        }
    }
}

/// Turn a non-success response into the matching error.
async fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<wire::ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    let message = format!("{context}: {message}");

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::Auth(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Api {
            status: status.as_u16(),
            message,
        },
    })
}
