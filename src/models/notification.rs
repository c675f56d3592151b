//! Rendered channel notification (a Discord embed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod colors {
    pub const GREEN: u32 = 0x2ECC71;
    pub const ORANGE: u32 = 0xE67E22;
    pub const GOLD: u32 = 0xF1C40F;
    pub const SILVER: u32 = 0xC0C0C0;
    pub const BRONZE: u32 = 0xCD7F32;
    pub const BLUE: u32 = 0x3498DB;
}

/// A rich notification posted to a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub color: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub text: String,
}
