//! Per-run dependencies.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Config, ForumThread, Member};
use crate::services::{ReportRenderer, WeekCalculator};
use crate::source::{ForumSource, MemberDirectory, MessageDelivery};
use crate::utils::http::PageFetcher;

/// Capabilities and settings for one invocation.
///
/// Built once in `main` and dropped at the end of the run; nothing here is
/// shared between runs.
#[derive(Clone)]
pub struct RunContext {
    pub forum: Arc<dyn ForumSource>,
    pub directory: Arc<dyn MemberDirectory>,
    pub delivery: Arc<dyn MessageDelivery>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub config: Arc<Config>,
}

impl RunContext {
    pub fn week_calculator(&self) -> Result<WeekCalculator> {
        let offset = self.config.report.offset().ok_or_else(|| {
            AppError::validation(format!(
                "report.utc_offset_hours out of range: {}",
                self.config.report.utc_offset_hours
            ))
        })?;
        Ok(WeekCalculator::new(offset))
    }

    pub fn renderer(&self) -> Result<ReportRenderer> {
        let calculator = self.week_calculator()?;
        Ok(ReportRenderer::new(
            calculator.offset(),
            self.config.report.brand.clone(),
        ))
    }

    /// Member who opened `thread`, when the directory knows them.
    pub fn thread_owner(&self, thread: &ForumThread) -> Option<Member> {
        let owner = thread
            .owner_id
            .as_deref()
            .and_then(|id| self.directory.find_by_id(id));
        if owner.is_none() {
            log::warn!("Owner of '{}' could not be resolved", thread.title);
        }
        owner
    }
}
