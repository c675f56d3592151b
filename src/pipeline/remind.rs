//! Mid-week reminder: DM roster members who have not posted yet.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Member, Roster, WindowKind};
use crate::pipeline::RunContext;
use crate::services::{
    AuthorshipAnalyzer, DispatchSummary, NotificationDispatcher, ThreadCollector, in_window,
};

/// Remind everyone on `roster` who has not opened a thread since Monday.
pub async fn run_reminder(
    ctx: &RunContext,
    roster: &Roster,
    now: DateTime<Utc>,
) -> Result<DispatchSummary> {
    let calculator = ctx.week_calculator()?;
    let window = calculator.window(now, WindowKind::CurrentWeekToDate);

    log::info!(
        "Reminder check for {} ({} members)",
        window.date_range(calculator.offset()),
        roster.len()
    );

    let threads = ThreadCollector::new(ctx.forum.as_ref()).collect().await?;
    let owners: Vec<Option<Member>> = in_window(&threads, &window)
        .into_iter()
        .map(|thread| ctx.thread_owner(thread))
        .collect();
    log::info!("{} threads posted this week", owners.len());

    let classification = AuthorshipAnalyzer::new(ctx.directory.as_ref())
        .classify(roster, owners.iter().map(Option::as_ref));

    if classification.non_authors.is_empty() {
        log::info!("Everyone has posted this week. No reminders to send.");
        return Ok(DispatchSummary::default());
    }

    let text = ctx.renderer()?.reminder_text(window.start);
    let messages: Vec<(Member, String)> = classification
        .non_authors
        .into_values()
        .map(|member| (member, text.clone()))
        .collect();

    log::info!("Sending reminders to {} members", messages.len());
    let delay = Duration::from_millis(ctx.config.dispatch.delay_ms);
    Ok(NotificationDispatcher::new(ctx.delivery.as_ref(), delay)
        .dispatch(&messages)
        .await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration as TimeDelta, TimeZone};

    use super::*;
    use crate::models::Config;
    use crate::testing::{
        MockDelivery, MockDirectory, MockFetcher, MockForum, member, mid_week, thread_by,
    };

    fn context(forum: MockForum, delivery: Arc<MockDelivery>) -> RunContext {
        let mut config = Config::default();
        config.dispatch.delay_ms = 0;
        RunContext {
            forum: Arc::new(forum),
            directory: Arc::new(MockDirectory::new(vec![
                member("1", "alice"),
                member("2", "bob"),
                member("3", "carol"),
            ])),
            delivery,
            fetcher: Arc::new(MockFetcher::new()),
            config: Arc::new(config),
        }
    }

    #[tokio::test]
    async fn test_reminds_only_missing_members() {
        // Posted this week by alice; bob's post is from last week
        let forum = MockForum::new().with_active(vec![
            thread_by("a", Some("1"), mid_week() - TimeDelta::hours(1)),
            thread_by("b", Some("2"), mid_week() - TimeDelta::days(7)),
        ]);
        let delivery = Arc::new(MockDelivery::new().failing_for("carol"));
        let ctx = context(forum, delivery.clone());

        let summary = run_reminder(&ctx, &Roster::parse("alice,bob,carol"), mid_week())
            .await
            .unwrap();

        assert_eq!(
            summary,
            DispatchSummary {
                success: 1,
                failure: 1
            }
        );
        let sent = delivery.direct.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "bob");
        assert!(sent[0].1.contains("이번주 (2026-10-05 월요일부터)"));
    }

    #[tokio::test]
    async fn test_everyone_posted_sends_nothing() {
        let monday = Utc.with_ymd_and_hms(2026, 10, 4, 15, 0, 0).unwrap();
        let forum = MockForum::new().with_archived(vec![
            thread_by("a", Some("1"), monday),
            thread_by("b", Some("2"), mid_week()),
        ]);
        let delivery = Arc::new(MockDelivery::new());
        let ctx = context(forum, delivery.clone());

        let summary = run_reminder(&ctx, &Roster::parse("alice, bob"), mid_week())
            .await
            .unwrap();

        assert_eq!(summary, DispatchSummary::default());
        assert!(delivery.direct_recipients().is_empty());
    }
}
