#[cfg(test)]
mod tests {
    use crate::cleanup::{
        AccessFeature, CleanupEvent, CleanupTarget, EventLog, TargetSite, by_schedule,
        select_target,
    };
    use crate::feed::closest_first;
    use crate::cluster::{HotspotParams, Point};
    use crate::error::{AnalysisError, StoreError};
    use crate::report::{Report, ReportDate};
    use chrono::{NaiveDate, NaiveTime};
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "waste_hotspots_events_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::remove_file(&path).ok();
        path
    }

    fn reports() -> Vec<Report> {
        let day: ReportDate = "20240101".parse().unwrap();
        let mut reports: Vec<Report> = [
            (43.70, -79.40),
            (43.7001, -79.4001),
            (43.7002, -79.3999),
            (43.7000, -79.4002),
            (43.7001, -79.3998),
        ]
        .iter()
        .map(|&(lat, lon)| Report::new(lat, lon, day))
        .collect();
        reports.push(Report::new(45.0, -80.0, day));
        reports
    }

    fn params() -> HotspotParams {
        HotspotParams {
            epsilon_km: 0.1,
            ..Default::default()
        }
    }

    #[test]
    fn test_closest_target() {
        let site = select_target(
            CleanupTarget::Closest(Point::new(44.9, -80.0)),
            &reports(),
            &params(),
        )
        .unwrap();
        match site {
            TargetSite::Closest {
                location,
                report_index,
                distance_km,
            } => {
                assert_eq!(report_index, 5);
                assert_eq!(location, Point::new(45.0, -80.0));
                assert!((distance_km - 11.12).abs() < 0.01);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_biggest_target_is_hotspot_centroid() {
        let site = select_target(CleanupTarget::Biggest, &reports(), &params()).unwrap();
        match site {
            TargetSite::Biggest {
                location, reports, ..
            } => {
                assert_eq!(reports, 5);
                assert!((location.lat() - 43.70008).abs() < 1e-9);
                assert!((location.lon() - -79.4).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_biggest_target_without_hotspots() {
        let spread: Vec<Report> = reports()
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.location = Point::new(40.0 + i as f64, -79.4);
                r
            })
            .collect();
        assert_eq!(
            select_target(CleanupTarget::Biggest, &spread, &params()).unwrap_err(),
            AnalysisError::NoClustersFound
        );
        assert_eq!(
            select_target(CleanupTarget::Closest(Point::new(0.0, 0.0)), &[], &params())
                .unwrap_err(),
            AnalysisError::EmptyDataset
        );
    }

    #[test]
    fn test_event_log_round_trip() {
        let path = temp_csv("round_trip");
        let log = EventLog::new(&path);

        let event = CleanupEvent {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            location: Point::new(43.70008, -79.4),
            description: Some("Bring gloves".to_string()),
            access: vec![AccessFeature::Wheelchair, AccessFeature::SeniorTransport],
            special_requirements: Some("Halal lunch".to_string()),
        };
        let bare = CleanupEvent {
            date: NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
            time: None,
            location: Point::new(45.0, -80.0),
            description: None,
            access: vec![],
            special_requirements: None,
        };
        log.append(&event).unwrap();
        log.append(&bare).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(
            "date,time,lat,lon,description,access_features,special_requirements\n"
        ));
        assert!(text.contains("\"wheelchair,senior_transport\""));

        let loaded = log.load().unwrap();
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.records, vec![event, bare]);
        assert_eq!(loaded.records[0].access_icons(), "♿ 🚌");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_event_log_skips_unknown_access_feature() {
        let path = temp_csv("unknown_access");
        fs::write(
            &path,
            "date,time,lat,lon,description,access_features,special_requirements\n\
             2024-06-01,09:30,43.7,-79.4,,\"wheelchair,jetpack\",\n\
             2024-06-02,,43.7,-79.4,,interpreter,\n",
        )
        .unwrap();

        let loaded = EventLog::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].access, vec![AccessFeature::Interpreter]);
        assert!(matches!(
            &loaded.errors[0],
            StoreError::UnknownAccessFeature { row: 1, value } if value == "jetpack"
        ));

        fs::remove_file(&path).ok();
    }

    fn event(day: u32, time: Option<(u32, u32)>, lat: f64) -> CleanupEvent {
        CleanupEvent {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: time.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            location: Point::new(lat, -79.4),
            description: None,
            access: vec![],
            special_requirements: None,
        }
    }

    #[test]
    fn test_events_by_schedule() {
        let events = vec![
            event(8, Some((9, 0)), 43.70),
            event(1, Some((14, 0)), 43.71),
            event(1, None, 43.72),
            event(1, Some((9, 30)), 43.73),
            event(8, Some((9, 0)), 43.74),
        ];
        assert_eq!(by_schedule(&events), vec![2, 3, 1, 0, 4]);
    }

    #[test]
    fn test_events_closest_first() {
        let events = vec![event(1, None, 43.80), event(2, None, 43.71), event(3, None, 43.75)];
        let order = closest_first(&Point::new(43.70, -79.4), &events).unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_event_log_rejects_truncated_date() {
        let path = temp_csv("short_date");
        fs::write(
            &path,
            "2024061,,43.7,-79.4,,,\n20240602,,43.7,-79.4,,,\n",
        )
        .unwrap();

        let loaded = EventLog::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(
            loaded.records[0].date,
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
        );
        assert!(matches!(
            &loaded.errors[0],
            StoreError::InvalidDate { row: 1, value } if value == "2024061"
        ));

        fs::remove_file(&path).ok();
    }
}
