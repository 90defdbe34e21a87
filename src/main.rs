//! Waste dump report tool
//!
//! Files geotagged waste reports into a CSV store, finds hotspots with
//! DBSCAN, and picks targets for cleanup events.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use csv::WriterBuilder;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use waste_hotspots::cleanup::{
    AccessFeature, CleanupEvent, CleanupTarget, EventLog, TargetSite, by_schedule,
};
use waste_hotspots::cluster::{
    DEFAULT_EPSILON_KM, DEFAULT_MAX_RADIUS_KM, DEFAULT_MIN_SAMPLES, haversine_km,
};
use waste_hotspots::feed::{FeedOrder, arrange, closest_first};
use waste_hotspots::trend::{daily_counts, summarize};
use waste_hotspots::{
    Clustering, HotspotParams, Point, Report, ReportDate, ReportStore, cluster, largest, nearest,
};


#[derive(Parser)]
#[command(name = "waste_hotspots")]
#[command(about = "Illegal waste dump reports and hotspot analysis", long_about = None)]
struct Args {
    /// Report store CSV (lat,lon,date,description,image)
    #[arg(
        short,
        long,
        env = "WASTE_REPORTS",
        default_value = "waste_reports.csv",
        global = true
    )]
    reports: PathBuf,

    /// Cleanup event log CSV
    #[arg(
        long,
        env = "WASTE_EVENTS",
        default_value = "cleanup_events.csv",
        global = true
    )]
    events: PathBuf,

    /// DBSCAN epsilon parameter (clustering radius in km)
    #[arg(short, long, default_value_t = DEFAULT_EPSILON_KM, global = true)]
    eps_km: f64,

    /// DBSCAN minPoints parameter (minimum reports around a core report)
    #[arg(short = 'm', long, default_value_t = DEFAULT_MIN_SAMPLES, global = true)]
    min_samples: usize,

    /// Ceiling for a hotspot radius in km
    #[arg(long, default_value_t = DEFAULT_MAX_RADIUS_KM, global = true)]
    max_radius_km: f64,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// File a new waste report
    Report {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Signed longitude, west negative
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// YYYYMMDD or YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Path of an already stored photo
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List hotspots as CSV: label,reports,lat,lon,radius_km
    Hotspots {
        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Closest reported dump to a location
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Hotspot with the most reports
    Largest,

    /// Reports per day and a coordinate summary
    Trend,

    /// Community feed of reports
    Feed {
        #[arg(long, value_enum, default_value_t = FeedOrder::Recent)]
        sort: FeedOrder,
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
    },

    /// Scheduled cleanup events
    Events {
        #[arg(long, value_enum, default_value_t = FeedOrder::Recent)]
        sort: FeedOrder,
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
    },

    /// Schedule a cleanup at the closest dump or the biggest hotspot
    Cleanup {
        #[arg(long, value_enum)]
        target: TargetKind,
        /// Organiser latitude, required for `--target closest`
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        /// Event date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Event time, HH:MM
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(long)]
        description: Option<String>,
        /// Accessibility features, comma separated
        #[arg(long, value_enum, value_delimiter = ',')]
        access: Vec<AccessFeature>,
        /// Special requirements (dietary needs, religious accommodations, ...)
        #[arg(long)]
        special: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetKind {
    Closest,
    Biggest,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Error initializing logger: {}", e);
    }

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = HotspotParams {
        epsilon_km: args.eps_km,
        min_samples: args.min_samples,
        max_radius_km: args.max_radius_km,
    };
    params.validate()?;

    let store = ReportStore::new(&args.reports);

    match args.command {
        Command::Report {
            lat,
            lon,
            date,
            description,
            image,
        } => {
            let date = match date {
                Some(d) => d.parse::<ReportDate>()?,
                None => ReportDate::today(),
            };
            let report = Report {
                location: Point::checked(lat, lon)?,
                date,
                description,
                image,
            };
            store.append(&report)?;
            log::info!("Report submitted to {:?}", store.path());
        }

        Command::Hotspots { output } => {
            let reports = load_reports(&store)?;
            log::debug!(
                "Running DBSCAN with eps={:.4} km, minPoints={}",
                params.epsilon_km,
                params.min_samples
            );
            let clustering = cluster(&reports, &params)?;
            report_clustering(&clustering, &params);

            match output {
                None => write_hotspots(io::stdout().lock(), &clustering)?,
                Some(output_file) => {
                    write_hotspots(File::create(&output_file)?, &clustering)?;
                    log::debug!("Hotspots written to {:?}", output_file);
                }
            }
        }

        Command::Nearest { lat, lon } => {
            let reports = load_reports(&store)?;
            let origin = Point::checked(lat, lon)?;
            let hit = nearest(&origin, &reports)?;
            println!("Closest dump: {}", describe_report(hit.record));
            println!("Distance from you: {:.2} km", hit.distance_km);
        }

        Command::Largest => {
            let reports = load_reports(&store)?;
            let clustering = cluster(&reports, &params)?;
            report_clustering(&clustering, &params);
            if clustering.insufficient_data {
                return Err("not enough reports to identify clusters".into());
            }
            let hotspot = largest(&clustering.hotspots)?;
            println!("Cluster label: {}", hotspot.label);
            println!("Number of reports: {}", hotspot.len());
            println!(
                "Centroid location: {:.5}, {:.5}",
                hotspot.centroid.lat(),
                hotspot.centroid.lon()
            );
            println!("Radius: {:.3} km", hotspot.radius_km);
        }

        Command::Trend => {
            let reports = load_reports(&store)?;
            let Some(summary) = summarize(&reports) else {
                log::warn!("No reports to analyze");
                return Ok(());
            };
            println!("Reports over time");
            for day in daily_counts(&reports) {
                println!("{}  {}", day.date.iso(), day.count);
            }
            println!();
            println!("Reports: {}", summary.count);
            println!(
                "Dates: {} .. {}",
                summary.first_date.iso(),
                summary.last_date.iso()
            );
            println!(
                "Latitude:  min {:.5}  max {:.5}  mean {:.5}",
                summary.lat.min, summary.lat.max, summary.lat.mean
            );
            println!(
                "Longitude: min {:.5}  max {:.5}  mean {:.5}",
                summary.lon.min, summary.lon.max, summary.lon.mean
            );
        }

        Command::Feed { sort, lat, lon } => {
            let reports = load_reports(&store)?;
            if reports.is_empty() {
                log::info!("No reports submitted yet");
                return Ok(());
            }
            let viewer = location_arg(lat, lon)?;
            let (order, honoured) = arrange(&reports, sort, viewer.as_ref())?;
            if !honoured {
                log::warn!("Cannot sort by distance without a location, showing file order");
            }
            for i in order {
                let distance = viewer.map(|v| haversine_km(&v, &reports[i].location));
                println!("{}", feed_entry(&reports[i], distance));
            }
        }

        Command::Events { sort, lat, lon } => {
            let event_log = EventLog::new(&args.events);
            let loaded = event_log.load()?;
            if !loaded.errors.is_empty() {
                log::warn!(
                    "Skipped {} malformed rows in {:?}",
                    loaded.errors.len(),
                    event_log.path()
                );
            }
            let events = loaded.records;
            if events.is_empty() {
                log::info!("No cleanup events organized yet");
                return Ok(());
            }

            let viewer = location_arg(lat, lon)?;
            let order = match (sort, viewer.as_ref()) {
                (FeedOrder::Recent, _) => by_schedule(&events),
                (FeedOrder::Closest, Some(origin)) => closest_first(origin, &events)?,
                (FeedOrder::Closest, None) => {
                    log::warn!("Cannot sort by distance without a location, showing file order");
                    (0..events.len()).collect()
                }
            };
            for i in order {
                let distance = viewer.map(|v| haversine_km(&v, &events[i].location));
                println!("{}", event_entry(&events[i], distance));
            }
        }

        Command::Cleanup {
            target,
            lat,
            lon,
            date,
            time,
            description,
            access,
            special,
        } => {
            let reports = load_reports(&store)?;
            let target = match (target, location_arg(lat, lon)?) {
                (TargetKind::Closest, Some(origin)) => CleanupTarget::Closest(origin),
                (TargetKind::Closest, None) => {
                    return Err("--target closest needs --lat and --lon".into());
                }
                (TargetKind::Biggest, _) => CleanupTarget::Biggest,
            };

            let site = waste_hotspots::cleanup::select_target(target, &reports, &params)?;
            match &site {
                TargetSite::Closest {
                    report_index,
                    distance_km,
                    ..
                } => log::info!(
                    "Closest dump: {} ({:.2} km away)",
                    describe_report(&reports[*report_index]),
                    distance_km
                ),
                TargetSite::Biggest {
                    label,
                    reports: count,
                    ..
                } => log::info!("Biggest hotspot: label {} with {} reports", label, count),
            }

            let event = CleanupEvent {
                date,
                time,
                location: site.location(),
                description,
                access,
                special_requirements: special,
            };
            let log_file = EventLog::new(&args.events);
            log_file.append(&event)?;
            log::info!(
                "Cleanup event organized at ({:.5}, {:.5}) {}",
                event.location.lat(),
                event.location.lon(),
                event.access_icons()
            );
        }
    }

    Ok(())
}

/// Loads the store, logging rows that had to be skipped
fn load_reports(store: &ReportStore) -> Result<Vec<Report>, Box<dyn Error>> {
    let loaded = store.load()?;
    if !loaded.errors.is_empty() {
        log::warn!(
            "Skipped {} malformed rows in {:?}",
            loaded.errors.len(),
            store.path()
        );
    }
    log::debug!("Read {} reports from {:?}", loaded.records.len(), store.path());
    Ok(loaded.records)
}

fn report_clustering(clustering: &Clustering, params: &HotspotParams) {
    if clustering.insufficient_data {
        log::warn!(
            "Need at least {} reports to analyze hotspots",
            params.min_samples
        );
    }
    for rejected in &clustering.rejected {
        log::warn!("Report {} left out: {}", rejected.index, rejected.error);
    }
    log::debug!("Clustered {} reports", clustering.input_len);
    for hotspot in &clustering.hotspots {
        log::trace!(
            "Hotspot {} has {} reports, radius {:.3} km",
            hotspot.label,
            hotspot.len(),
            hotspot.radius_km
        );
    }
    log::debug!("Found {} hotspots", clustering.hotspots.len());
    log::debug!("Found {} noise reports", clustering.noise.len());
}

/// Both or neither of `--lat` / `--lon`; clap enforces the pairing
fn location_arg(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Point>, Box<dyn Error>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Point::checked(lat, lon)?)),
        _ => Ok(None),
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

/// Writes one CSV row per hotspot: label,reports,lat,lon,radius_km
fn write_hotspots<W: Write>(out: W, clustering: &Clustering) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["label", "reports", "lat", "lon", "radius_km"])?;
    for hotspot in &clustering.hotspots {
        writer.write_record(&[
            hotspot.label.to_string(),
            hotspot.len().to_string(),
            format!("{:.6}", hotspot.centroid.lat()),
            format!("{:.6}", hotspot.centroid.lon()),
            format!("{:.4}", hotspot.radius_km),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn describe_report(report: &Report) -> String {
    format!(
        "({}, {}) reported on {}",
        report.location.lat(),
        report.location.lon(),
        report.date.iso()
    )
}

/// One feed line; missing descriptions and images degrade to placeholders
fn feed_entry(report: &Report, distance_km: Option<f64>) -> String {
    let mut line = format!(
        "📍 ({:.4}, {:.4})  🗓 {}  📝 {}",
        report.location.lat(),
        report.location.lon(),
        report.date.iso(),
        report
            .description
            .as_deref()
            .unwrap_or("No description provided.")
    );
    if let Some(d) = distance_km {
        line.push_str(&format!("  ({:.2} km)", d));
    }
    if let Some(image) = report.existing_image() {
        line.push_str(&format!("  🖼 {}", image.display()));
    }
    line
}

/// One event line; accessibility features show as icons
fn event_entry(event: &CleanupEvent, distance_km: Option<f64>) -> String {
    let mut line = format!(
        "📍 ({:.4}, {:.4})  🗓 {}",
        event.location.lat(),
        event.location.lon(),
        event.date.format("%Y-%m-%d")
    );
    if let Some(time) = event.time {
        line.push_str(&format!("  ⏰ {}", time.format("%H:%M")));
    }
    line.push_str(&format!(
        "  📝 {}",
        event
            .description
            .as_deref()
            .unwrap_or("No description provided.")
    ));
    if !event.access.is_empty() {
        line.push_str(&format!("  {}", event.access_icons()));
    }
    if let Some(special) = &event.special_requirements {
        line.push_str(&format!("  ‼️ {}", special));
    }
    if let Some(d) = distance_km {
        line.push_str(&format!("  ({:.2} km)", d));
    }
    line
}
