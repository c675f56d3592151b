//! Pipeline entry points for digest operations.
//!
//! - `run_weekly_check`: Report last week's authors and hot threads
//! - `run_reminder`: DM members who have not posted this week
//! - `run_export`: Write every forum post to the export file

pub mod check;
mod context;
pub mod export;
pub mod remind;

pub use check::{CheckSummary, run_weekly_check};
pub use context::RunContext;
pub use export::run_export;
pub use remind::run_reminder;
