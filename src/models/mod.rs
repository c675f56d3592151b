// src/models/mod.rs

//! Domain models for the digest application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod export;
mod member;
pub mod notification;
mod thread;
mod window;

// Re-export all public types
pub use config::{
    Config, DiscordConfig, DispatchConfig, PathsConfig, ReportConfig, ThumbnailConfig,
};
pub use export::PostExport;
pub use member::{Member, Roster};
pub use notification::Notification;
pub use thread::{Attachment, ForumThread, StarterMessage, ThreadInfo, ThreadRecord, ThreadStats};
pub use window::{TimeWindow, WindowKind};
