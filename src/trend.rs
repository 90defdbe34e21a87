//! Report counts over time and coordinate summary

use crate::report::{Report, ReportDate};
use std::collections::BTreeMap;

/// Number of reports filed on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: ReportDate,
    pub count: usize,
}

/// Reports per day, oldest day first; days without reports are absent
pub fn daily_counts(reports: &[Report]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<ReportDate, usize> = BTreeMap::new();
    for report in reports {
        *counts.entry(report.date).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Min / max / mean of one numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<ColumnStats> {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            n += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (n > 0).then(|| ColumnStats {
            min,
            max,
            mean: sum / n as f64,
        })
    }
}

/// Summary table over a report snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub lat: ColumnStats,
    pub lon: ColumnStats,
    pub first_date: ReportDate,
    pub last_date: ReportDate,
}

/// Summarizes a snapshot; `None` when there are no reports
pub fn summarize(reports: &[Report]) -> Option<Summary> {
    let lat = ColumnStats::from_values(reports.iter().map(|r| r.location.lat()))?;
    let lon = ColumnStats::from_values(reports.iter().map(|r| r.location.lon()))?;
    let first_date = reports.iter().map(|r| r.date).min()?;
    let last_date = reports.iter().map(|r| r.date).max()?;

    Some(Summary {
        count: reports.len(),
        lat,
        lon,
        first_date,
        last_date,
    })
}
