//! Append-only CSV report store
//!
//! Row layout: `lat,lon,date,description,image`. Longitude is the true
//! signed value (west negative) and is written back exactly as given.

use crate::cluster::Point;
use crate::error::StoreError;
use crate::report::{Report, ReportDate};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Column names of the report store, in order
pub const REPORT_HEADER: [&str; 5] = ["lat", "lon", "date", "description", "image"];

/// Records read from a CSV file together with the rows that were skipped
///
/// Each error carries the 1-based data row it came from.
#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub errors: Vec<StoreError>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Loaded {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// CSV-backed report store
///
/// Reads always return the whole file in file order; writes only ever add
/// one row at the end.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> ReportStore {
        ReportStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every report in file order
    ///
    /// A missing file is an empty store. Malformed rows are returned in
    /// [`Loaded::errors`] and do not stop the load.
    pub fn load(&self) -> Result<Loaded<Report>, StoreError> {
        let Some(rows) = read_rows(&self.path)? else {
            return Ok(Loaded::default());
        };

        let skip = usize::from(has_header(&rows, &REPORT_HEADER));

        let mut loaded = Loaded::default();
        for (i, record) in rows.iter().enumerate().skip(skip) {
            match parse_report(i + 1 - skip, record) {
                Ok(report) => loaded.records.push(report),
                Err(e) => {
                    log::warn!("{}: {}", self.path.display(), e);
                    loaded.errors.push(e);
                }
            }
        }

        log::debug!(
            "loaded {} reports from {} ({} rows skipped)",
            loaded.records.len(),
            self.path.display(),
            loaded.errors.len()
        );
        Ok(loaded)
    }

    /// Adds one report at the end of the store
    ///
    /// The file is created with a header row when it does not exist yet.
    pub fn append(&self, report: &Report) -> Result<(), StoreError> {
        Point::checked(report.location.lat(), report.location.lon())?;

        let description = report.description.as_deref().unwrap_or_default();
        let image = report
            .image
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        append_row(
            &self.path,
            &REPORT_HEADER,
            &[
                report.location.lat().to_string(),
                report.location.lon().to_string(),
                report.date.to_string(),
                description.to_string(),
                image,
            ],
        )
    }
}

fn parse_report(row: usize, record: &StringRecord) -> Result<Report, StoreError> {
    let lat = number_field(row, record, 0, "lat")?;
    let lon = number_field(row, record, 1, "lon")?;

    let date = text_field(record, 2).ok_or(StoreError::MissingField { row, field: "date" })?;
    let date = date.parse::<ReportDate>().map_err(|_| StoreError::InvalidDate {
        row,
        value: date.to_string(),
    })?;

    let location = Point::new(lat, lon);
    if !location.is_valid() {
        return Err(StoreError::InvalidCoordinate { row, lat, lon });
    }

    Ok(Report {
        location,
        date,
        description: text_field(record, 3).map(str::to_string),
        image: text_field(record, 4).map(PathBuf::from),
    })
}

/// Non-empty, trimmed field at `idx`
pub(crate) fn text_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn number_field(
    row: usize,
    record: &StringRecord,
    idx: usize,
    field: &'static str,
) -> Result<f64, StoreError> {
    let value = text_field(record, idx).ok_or(StoreError::MissingField { row, field })?;
    value.parse::<f64>().map_err(|_| StoreError::InvalidNumber {
        row,
        field,
        value: value.to_string(),
    })
}

/// Reads all rows of a headerless view of the file; `None` if it does not exist
pub(crate) fn read_rows(path: &Path) -> Result<Option<Vec<StringRecord>>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }
    Ok(Some(rows))
}

/// Header row is optional; the first row is one only when it spells out
/// the column names. Anything else is data and gets parsed and reported.
pub(crate) fn has_header(rows: &[StringRecord], header: &[&str]) -> bool {
    rows.first().is_some_and(|first| {
        !first.is_empty()
            && first.len() <= header.len()
            && first
                .iter()
                .zip(header)
                .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
    })
}

/// Appends one row, writing `header` first if the file is new or empty
pub(crate) fn append_row(path: &Path, header: &[&str], row: &[String]) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)?;

    let len = file.metadata()?.len();
    if len > 0 {
        // Don't glue the new row onto a last line that lacks its newline
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if len == 0 {
        writer.write_record(header)?;
    }
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}
