//! Waste reports as stored by the report store

use crate::cluster::{Located, Point};
use crate::error::DateError;
use chrono::NaiveDate;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Calendar date of a report, stored as an 8 digit `YYYYMMDD` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(pub NaiveDate);

impl ReportDate {
    const STORED: &'static str = "%Y%m%d";

    pub fn today() -> ReportDate {
        ReportDate(chrono::Local::now().date_naive())
    }

    /// ISO `YYYY-MM-DD` rendering for display
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

/// Accepts exactly `YYYYMMDD` or `YYYY-MM-DD`, zero padded
impl FromStr for ReportDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digit_or_dash = |dashes: &[usize]| {
            s.bytes().enumerate().all(|(i, b)| {
                if dashes.contains(&i) {
                    b == b'-'
                } else {
                    b.is_ascii_digit()
                }
            })
        };

        // chrono alone would read "2024031" as March 1st
        let parsed = match s.len() {
            8 if digit_or_dash(&[]) => NaiveDate::parse_from_str(s, Self::STORED).ok(),
            10 if digit_or_dash(&[4, 7]) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        };
        parsed.map(ReportDate).ok_or_else(|| DateError(s.to_string()))
    }
}

/// Renders the stored `YYYYMMDD` form
impl Display for ReportDate {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::STORED))
    }
}

/// One user-submitted observation of illegal dumping
///
/// A report has no durable id: its identity is its row position within
/// one load of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub location: Point,
    pub date: ReportDate,
    pub description: Option<String>,
    /// Reference to an externally stored photo; the file may be gone
    pub image: Option<PathBuf>,
}

impl Report {
    pub fn new(lat: f64, lon: f64, date: ReportDate) -> Report {
        Report {
            location: Point::new(lat, lon),
            date,
            description: None,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Report {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Report {
        self.image = Some(image.into());
        self
    }

    /// Image path, only when the file is actually there
    pub fn existing_image(&self) -> Option<&Path> {
        self.image.as_deref().filter(|p| p.is_file())
    }
}

impl Located for Report {
    fn location(&self) -> Point {
        self.location
    }
}
