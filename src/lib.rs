//! Hotspot analysis for citizen reports of illegal waste dumps
//!
//! Reports live in an append-only CSV store ([`store::ReportStore`]). Each
//! analysis pass takes a snapshot of the reports and works on it without
//! keeping any state between calls:
//!
//! - [`cluster::cluster`] groups nearby reports into hotspots with DBSCAN over
//!   haversine distance,
//! - [`proximity::nearest`] and [`proximity::largest`] pick a cleanup target,
//! - [`trend`] and [`feed`] back the chart and community pages.
//!
//! Coordinates are degrees with true signed longitude (west negative)
//! everywhere.

pub mod cleanup;
pub mod cluster;
pub mod error;
pub mod feed;
pub mod proximity;
pub mod report;
pub mod store;
pub mod trend;

#[cfg(test)]
mod cleanup_test;
#[cfg(test)]
mod store_test;
#[cfg(test)]
mod trend_test;

pub use cluster::{Clustering, Hotspot, HotspotParams, Located, NOISE_LABEL, Point, cluster};
pub use error::{AnalysisError, DateError, StoreError};
pub use proximity::{Nearest, largest, nearest};
pub use report::{Report, ReportDate};
pub use store::ReportStore;
