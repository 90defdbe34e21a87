//! Community feed ordering

use crate::cluster::{Located, Point};
use crate::error::AnalysisError;
use crate::proximity::rank_by_distance;
use crate::report::Report;
use std::cmp::Reverse;

/// How the community feed is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FeedOrder {
    /// Newest report first; events by date
    Recent,
    /// Closest to the viewer first
    Closest,
}

/// Indices of `reports`, newest date first; same-day reports keep file order
pub fn most_recent(reports: &[Report]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..reports.len()).collect();
    order.sort_by_key(|&i| Reverse(reports[i].date));
    order
}

/// Indices of `records`, closest to `origin` first
pub fn closest_first<T: Located>(
    origin: &Point,
    records: &[T],
) -> Result<Vec<usize>, AnalysisError> {
    Ok(rank_by_distance(origin, records)?
        .into_iter()
        .map(|(i, _)| i)
        .collect())
}

/// Feed order for the viewer
///
/// Without a viewer location `Closest` cannot be honoured and the feed
/// falls back to file order; the returned flag is `false` in that case.
pub fn arrange(
    reports: &[Report],
    order: FeedOrder,
    viewer: Option<&Point>,
) -> Result<(Vec<usize>, bool), AnalysisError> {
    match (order, viewer) {
        (FeedOrder::Recent, _) => Ok((most_recent(reports), true)),
        (FeedOrder::Closest, Some(origin)) => Ok((closest_first(origin, reports)?, true)),
        (FeedOrder::Closest, None) => Ok(((0..reports.len()).collect(), false)),
    }
}
