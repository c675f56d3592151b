//! Hot thread ranking.

use crate::models::ThreadInfo;

/// The `n` threads with the highest hot score, best first.
///
/// The sort is stable, so equal scores keep their collection order.
pub fn top_hot(threads: &[ThreadInfo], n: usize) -> Vec<&ThreadInfo> {
    let mut ranked: Vec<&ThreadInfo> = threads.iter().collect();
    ranked.sort_by(|a, b| b.stats.hot_score().cmp(&a.stats.hot_score()));
    ranked.truncate(n);
    ranked
}
