//! Cleanup event planning: pick a target dump and log the event

use crate::cluster::{HotspotParams, Located, Point, cluster};
use crate::error::{AnalysisError, StoreError};
use crate::proximity::{largest, nearest};
use crate::report::{Report, ReportDate};
use crate::store::{Loaded, append_row, has_header, number_field, read_rows, text_field};
use chrono::{NaiveDate, NaiveTime};
use csv::StringRecord;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which dump a cleanup goes after
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CleanupTarget {
    /// The single report closest to the organiser
    Closest(Point),
    /// The centroid of the hotspot with the most reports
    Biggest,
}

/// Where the cleanup goes and why that spot was picked
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSite {
    Closest {
        location: Point,
        report_index: usize,
        distance_km: f64,
    },
    Biggest {
        location: Point,
        label: i32,
        reports: usize,
    },
}

impl TargetSite {
    pub fn location(&self) -> Point {
        match self {
            TargetSite::Closest { location, .. } | TargetSite::Biggest { location, .. } => {
                *location
            }
        }
    }
}

/// Resolves a cleanup target against the current reports
///
/// `Biggest` over a snapshot too small to cluster reports
/// [`AnalysisError::NoClustersFound`] just like an all-noise snapshot; use
/// [`cluster`] directly to tell the two apart.
pub fn select_target(
    target: CleanupTarget,
    reports: &[Report],
    params: &HotspotParams,
) -> Result<TargetSite, AnalysisError> {
    match target {
        CleanupTarget::Closest(origin) => {
            let hit = nearest(&origin, reports)?;
            Ok(TargetSite::Closest {
                location: hit.record.location,
                report_index: hit.index,
                distance_km: hit.distance_km,
            })
        }
        CleanupTarget::Biggest => {
            let clustering = cluster(reports, params)?;
            let hotspot = largest(&clustering.hotspots)?;
            Ok(TargetSite::Biggest {
                location: hotspot.centroid,
                label: hotspot.label,
                reports: hotspot.len(),
            })
        }
    }
}

/// Accessibility accommodation offered at an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum AccessFeature {
    Wheelchair,
    Interpreter,
    ChildFriendly,
    SeniorTransport,
}

impl AccessFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessFeature::Wheelchair => "wheelchair",
            AccessFeature::Interpreter => "interpreter",
            AccessFeature::ChildFriendly => "child_friendly",
            AccessFeature::SeniorTransport => "senior_transport",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AccessFeature::Wheelchair => "♿",
            AccessFeature::Interpreter => "👐",
            AccessFeature::ChildFriendly => "🧒",
            AccessFeature::SeniorTransport => "🚌",
        }
    }
}

impl Display for AccessFeature {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wheelchair" => Ok(AccessFeature::Wheelchair),
            "interpreter" => Ok(AccessFeature::Interpreter),
            "child_friendly" => Ok(AccessFeature::ChildFriendly),
            "senior_transport" => Ok(AccessFeature::SeniorTransport),
            other => Err(other.to_string()),
        }
    }
}

/// A scheduled community cleanup
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupEvent {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: Point,
    pub description: Option<String>,
    pub access: Vec<AccessFeature>,
    pub special_requirements: Option<String>,
}

impl CleanupEvent {
    /// Access feature icons separated by spaces
    pub fn access_icons(&self) -> String {
        self.access
            .iter()
            .map(AccessFeature::icon)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Located for CleanupEvent {
    fn location(&self) -> Point {
        self.location
    }
}

/// Indices of `events` by date and time; an event without a time leads its day
pub fn by_schedule(events: &[CleanupEvent]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| (events[i].date, events[i].time));
    order
}

/// Column names of the event log, in order
pub const EVENT_HEADER: [&str; 7] = [
    "date",
    "time",
    "lat",
    "lon",
    "description",
    "access_features",
    "special_requirements",
];

/// Append-only CSV log of cleanup events
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> EventLog {
        EventLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all events in file order, skipping malformed rows
    pub fn load(&self) -> Result<Loaded<CleanupEvent>, StoreError> {
        let Some(rows) = read_rows(&self.path)? else {
            return Ok(Loaded::default());
        };

        let skip = usize::from(has_header(&rows, &EVENT_HEADER));

        let mut loaded = Loaded::default();
        for (i, record) in rows.iter().enumerate().skip(skip) {
            match parse_event(i + 1 - skip, record) {
                Ok(event) => loaded.records.push(event),
                Err(e) => {
                    log::warn!("{}: {}", self.path.display(), e);
                    loaded.errors.push(e);
                }
            }
        }
        Ok(loaded)
    }

    pub fn append(&self, event: &CleanupEvent) -> Result<(), StoreError> {
        Point::checked(event.location.lat(), event.location.lon())?;

        let access = event
            .access
            .iter()
            .map(AccessFeature::as_str)
            .collect::<Vec<_>>()
            .join(",");

        append_row(
            &self.path,
            &EVENT_HEADER,
            &[
                event.date.format("%Y-%m-%d").to_string(),
                event
                    .time
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_default(),
                event.location.lat().to_string(),
                event.location.lon().to_string(),
                event.description.clone().unwrap_or_default(),
                access,
                event.special_requirements.clone().unwrap_or_default(),
            ],
        )
    }
}

fn parse_event(row: usize, record: &StringRecord) -> Result<CleanupEvent, StoreError> {
    let date = text_field(record, 0).ok_or(StoreError::MissingField { row, field: "date" })?;
    let date = date
        .parse::<ReportDate>()
        .map(|d| d.0)
        .map_err(|_| StoreError::InvalidDate {
            row,
            value: date.to_string(),
        })?;

    let time = match text_field(record, 1) {
        None => None,
        Some(t) => Some(
            NaiveTime::parse_from_str(t, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
                .map_err(|_| StoreError::InvalidTime {
                    row,
                    value: t.to_string(),
                })?,
        ),
    };

    let lat = number_field(row, record, 2, "lat")?;
    let lon = number_field(row, record, 3, "lon")?;
    let location = Point::new(lat, lon);
    if !location.is_valid() {
        return Err(StoreError::InvalidCoordinate { row, lat, lon });
    }

    let access = text_field(record, 5)
        .map(|list| {
            list.split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.parse::<AccessFeature>()
                        .map_err(|value| StoreError::UnknownAccessFeature { row, value })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(CleanupEvent {
        date,
        time,
        location,
        description: text_field(record, 4).map(str::to_string),
        access,
        special_requirements: text_field(record, 6).map(str::to_string),
    })
}
