//! Service layer for the digest.
//!
//! This module contains the business logic for:
//! - Week boundaries (`WeekCalculator`)
//! - Thread listing (`ThreadCollector`)
//! - Engagement counters (`StatsExtractor`)
//! - Roster classification (`AuthorshipAnalyzer`)
//! - Hot thread ranking (`top_hot`)
//! - Preview images (`ThumbnailResolver`)
//! - Direct message delivery (`NotificationDispatcher`)
//! - Report and reminder text (`ReportRenderer`)

pub mod authorship;
mod collector;
mod dispatch;
mod ranking;
mod render;
mod stats;
pub mod thumbnail;
pub mod window;

pub use authorship::{AuthorshipAnalyzer, Classification};
pub use collector::ThreadCollector;
pub use dispatch::{DispatchSummary, NotificationDispatcher};
pub use ranking::top_hot;
pub use render::ReportRenderer;
pub use stats::{StatsExtractor, in_window};
pub use thumbnail::ThumbnailResolver;
pub use window::WeekCalculator;
