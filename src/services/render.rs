//! Report and reminder rendering.

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::notification::{Author, Field, Footer, Image, colors};
use crate::models::{Notification, ThreadInfo, TimeWindow};
use crate::services::authorship::Classification;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];
const RANK_COLORS: [u32; 3] = [colors::GOLD, colors::SILVER, colors::BRONZE];

/// Builds the notifications and direct messages of a run.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    offset: FixedOffset,
    brand: String,
}

impl ReportRenderer {
    pub fn new(offset: FixedOffset, brand: impl Into<String>) -> Self {
        Self {
            offset,
            brand: brand.into(),
        }
    }

    /// Weekly status: who has not posted in `window`.
    pub fn status_report(
        &self,
        classification: &Classification,
        window: &TimeWindow,
        now: DateTime<Utc>,
    ) -> Notification {
        let missing = classification.non_authors_by_display_name();

        let color = if missing.is_empty() {
            colors::GREEN
        } else {
            colors::ORANGE
        };

        let value = if missing.is_empty() {
            "모두 작성했습니다! 🎉".to_string()
        } else {
            missing
                .iter()
                .map(|m| format!("- {}", m.display_name))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Notification {
            title: "📝 주간 블로그 작성 현황".into(),
            description: Some(format!(
                "**기간**: {} ({})",
                window.date_range(self.offset),
                self.zone_label()
            )),
            color,
            fields: vec![Field {
                name: format!("⚠️ 미작성 ({}명)", missing.len()),
                value,
                inline: false,
            }],
            footer: Some(Footer {
                text: format!("{} Weekly Check", self.brand),
            }),
            timestamp: Some(now),
            ..Default::default()
        }
    }

    fn zone_label(&self) -> String {
        if self.offset.local_minus_utc() == 9 * 3600 {
            "KST".to_string()
        } else {
            format!("UTC{}", self.offset)
        }
    }

    /// One hot thread announcement. `rank` starts at 1.
    pub fn hot_thread(&self, info: &ThreadInfo, rank: usize, now: DateTime<Utc>) -> Notification {
        let index = rank.saturating_sub(1);
        let medal = MEDALS
            .get(index)
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("{rank}위"));
        let color = RANK_COLORS.get(index).copied().unwrap_or(colors::BLUE);

        let author = info.owner.as_ref().map(|owner| Author {
            name: owner.display_name.clone(),
            icon_url: Some(owner.avatar_url.clone()),
        });
        let thumbnail = info.owner.as_ref().map(|owner| Image {
            url: owner.avatar_url.clone(),
        });

        Notification {
            title: format!("{} {}", medal, info.thread.title),
            description: Some(format!("이번 주 HOT 글 {rank}위")),
            url: Some(info.thread.url.clone()),
            color,
            fields: vec![
                Field {
                    name: "💬 댓글".into(),
                    value: info.stats.message_count.to_string(),
                    inline: true,
                },
                Field {
                    name: "❤️ 반응".into(),
                    value: info.stats.reaction_count.to_string(),
                    inline: true,
                },
            ],
            author,
            thumbnail,
            footer: Some(Footer {
                text: format!("{} | HOT 글 Top {}", self.brand, rank),
            }),
            timestamp: Some(now),
        }
    }

    /// Direct message for members who have not posted since `week_start`.
    pub fn reminder_text(&self, week_start: DateTime<Utc>) -> String {
        let date = week_start.with_timezone(&self.offset).format("%Y-%m-%d");
        format!(
            "안녕하세요! 👋\n\n\
             이번주 ({date} 월요일부터) 아직 블로그 포스트를 작성하지 않으셨네요.\n\n\
             {brand} 챌린지를 진행 중이니, 이번 주 일요일까지 블로그를 작성해주세요! 💪\n\n\
             화이팅! 🔥",
            brand = self.brand
        )
    }
}
