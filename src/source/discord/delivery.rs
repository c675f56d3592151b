//! Direct messages and channel posts.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::DiscordClient;
use super::wire::{CreateDm, DmChannel};
use crate::error::Result;
use crate::models::{Member, Notification};
use crate::source::MessageDelivery;

#[async_trait]
impl MessageDelivery for DiscordClient {
    async fn send_direct(&self, recipient: &Member, message: &str) -> Result<()> {
        let dm: DmChannel = self
            .post_json(
                "/users/@me/channels",
                &CreateDm {
                    recipient_id: &recipient.id,
                },
            )
            .await?;

        let _: Value = self
            .post_json(
                &format!("/channels/{}/messages", dm.id),
                &json!({ "content": message }),
            )
            .await?;
        Ok(())
    }

    async fn send_notification(
        &self,
        channel_id: &str,
        notification: &Notification,
    ) -> Result<()> {
        let _: Value = self
            .post_json(
                &format!("/channels/{channel_id}/messages"),
                &json!({ "embeds": [notification] }),
            )
            .await?;
        Ok(())
    }
}
