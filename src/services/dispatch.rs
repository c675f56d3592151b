//! Rate-limited direct message dispatch.

use std::time::Duration;

use crate::models::Member;
use crate::source::MessageDelivery;

/// Outcome of a dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub success: usize,
    pub failure: usize,
}

/// Sends one message per recipient, one at a time.
pub struct NotificationDispatcher<'a> {
    delivery: &'a dyn MessageDelivery,
    delay: Duration,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(delivery: &'a dyn MessageDelivery, delay: Duration) -> Self {
        Self { delivery, delay }
    }

    /// Deliver in order, pausing `delay` after each send. Failures are
    /// logged and counted; delivery continues with the next recipient.
    pub async fn dispatch(&self, messages: &[(Member, String)]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for (recipient, message) in messages {
            match self.delivery.send_direct(recipient, message).await {
                Ok(()) => {
                    summary.success += 1;
                    log::info!("DM sent: {}", recipient.display_name);
                }
                Err(e) => {
                    summary.failure += 1;
                    log::warn!("DM failed: {} - {}", recipient.display_name, e);
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        log::info!(
            "DM results: {} sent, {} failed",
            summary.success,
            summary.failure
        );
        summary
    }
}
