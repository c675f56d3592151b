//! Exported forum post shape consumed by the blog frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ThreadRecord;
use crate::utils::extract_first_url;

/// One forum post in `forum-posts.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostExport {
    pub id: String,
    pub title: String,

    /// Full starter message text
    pub content: String,

    pub author: Option<String>,
    pub author_avatar: Option<String>,

    /// First link found in the content
    pub url: Option<String>,

    pub thumbnail: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl PostExport {
    pub fn from_record(record: &ThreadRecord, thumbnail: Option<String>) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            author: record.owner.as_ref().map(|m| m.name.clone()),
            author_avatar: record.owner.as_ref().map(|m| m.avatar_url.clone()),
            url: extract_first_url(&record.content).map(str::to_string),
            thumbnail,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{member, mid_week, starter, thread};
    use chrono::TimeZone;

    #[test]
    fn test_from_record() {
        let mut message = starter("new post https://blog.example.com/a\nthanks");
        message.author = Some(member("9", "alice"));
        let record = ThreadRecord::new(thread("42"), message);

        let post = PostExport::from_record(&record, Some("https://cdn/x.png".into()));
        assert_eq!(post.id, "42");
        assert_eq!(post.author.as_deref(), Some("alice"));
        assert_eq!(
            post.author_avatar.as_deref(),
            Some("https://cdn.example.com/avatars/9.png")
        );
        assert_eq!(post.url.as_deref(), Some("https://blog.example.com/a"));
        assert_eq!(post.thumbnail.as_deref(), Some("https://cdn/x.png"));
        assert_eq!(post.created_at, mid_week());
    }

    #[test]
    fn test_serialized_field_names() {
        let post = PostExport {
            id: "1".into(),
            title: "Hello".into(),
            content: "see https://example.com".into(),
            author: Some("alice".into()),
            author_avatar: None,
            url: Some("https://example.com".into()),
            thumbnail: None,
            created_at: Utc.with_ymd_and_hms(2026, 10, 5, 1, 2, 3).unwrap(),
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["createdAt"], "2026-10-05T01:02:03Z");
        assert_eq!(value["author_avatar"], serde_json::Value::Null);
        assert_eq!(value["url"], "https://example.com");
        assert!(value.get("created_at").is_none());
    }
}
