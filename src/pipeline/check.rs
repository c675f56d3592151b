//! Weekly status check: report last week's authors and hot threads.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Roster, ThreadInfo, WindowKind};
use crate::pipeline::RunContext;
use crate::services::{AuthorshipAnalyzer, StatsExtractor, ThreadCollector, in_window, top_hot};

/// What a weekly check did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Threads in the window
    pub threads: usize,
    pub authors: usize,
    pub non_authors: usize,
    pub hot_sent: usize,
    pub hot_failed: usize,
}

/// Run the weekly check for the week before `now`.
///
/// Fails when threads cannot be listed or the status report cannot be
/// delivered. Hot thread announcements that fail are only counted.
pub async fn run_weekly_check(
    ctx: &RunContext,
    roster: &Roster,
    channel_id: &str,
    now: DateTime<Utc>,
) -> Result<CheckSummary> {
    let calculator = ctx.week_calculator()?;
    let renderer = ctx.renderer()?;
    let window = calculator.window(now, WindowKind::PriorWeek);

    log::info!(
        "Weekly check for {} ({} members)",
        window.date_range(calculator.offset()),
        roster.len()
    );

    let threads = ThreadCollector::new(ctx.forum.as_ref()).collect().await?;
    let extractor = StatsExtractor::new(ctx.forum.as_ref());

    let mut infos = Vec::new();
    for thread in in_window(&threads, &window) {
        let stats = extractor.stats(thread).await;
        let owner = ctx.thread_owner(thread);
        log::info!(
            "'{}' by {} (messages: {}, reactions: {}, hot: {})",
            thread.title,
            owner.as_ref().map_or("Unknown", |m| m.display_name.as_str()),
            stats.message_count,
            stats.reaction_count,
            stats.hot_score()
        );
        infos.push(ThreadInfo {
            thread: thread.clone(),
            owner,
            stats,
        });
    }

    if infos.is_empty() {
        log::warn!("No threads were posted last week");
    }

    let classification = AuthorshipAnalyzer::new(ctx.directory.as_ref())
        .classify(roster, infos.iter().map(|i| i.owner.as_ref()));
    let hot = top_hot(&infos, ctx.config.report.top_n);

    let report = renderer.status_report(&classification, &window, now);
    ctx.delivery.send_notification(channel_id, &report).await?;
    log::info!("Status report sent to channel {}", channel_id);

    let mut summary = CheckSummary {
        threads: infos.len(),
        authors: classification.authors.len(),
        non_authors: classification.non_authors.len(),
        ..CheckSummary::default()
    };

    for (i, info) in hot.iter().enumerate() {
        let rank = i + 1;
        let notification = renderer.hot_thread(info, rank, now);
        match ctx.delivery.send_notification(channel_id, &notification).await {
            Ok(()) => {
                summary.hot_sent += 1;
                log::info!("Hot #{} sent: {}", rank, info.thread.title);
            }
            Err(e) => {
                summary.hot_failed += 1;
                log::warn!("Hot #{} failed: {} - {}", rank, info.thread.title, e);
            }
        }
    }

    Ok(summary)
}
