#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::report::{Report, ReportDate};
    use crate::store::ReportStore;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "waste_hotspots_store_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::remove_file(&path).ok();
        path
    }

    fn date(s: &str) -> ReportDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_report_date_formats() {
        assert_eq!(date("20240315"), date("2024-03-15"));
        assert_eq!(date("20240315").to_string(), "20240315");
        assert_eq!(date("20240315").iso(), "2024-03-15");
        assert_eq!(date(" 20240315 "), date("20240315"));
        assert!("20241315".parse::<ReportDate>().is_err());
    }

    #[test]
    fn test_report_date_needs_all_digits() {
        for bad in [
            "2024031", "202403150", "2024-3-15", "2024-03-5", "2024/03/15", "+2024315", "2024 315",
            "",
        ] {
            assert!(bad.parse::<ReportDate>().is_err(), "{:?} parsed", bad);
        }
    }

    #[test]
    fn test_truncated_date_row_is_reported() {
        let path = temp_csv("short_date");
        fs::write(&path, "43.7,-79.4,2024031,,\n43.7,-79.4,20240301,,\n").unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert!(matches!(
            &loaded.errors[0],
            StoreError::InvalidDate { row: 1, value } if value == "2024031"
        ));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_first_row_is_not_taken_for_a_header() {
        let path = temp_csv("bad_first_row");
        fs::write(
            &path,
            "abc,-79.4,20240101,,\n,-79.4,20240101,,\n43.7,-79.4,20240101,,\n",
        )
        .unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.errors.len(), 2);
        assert!(matches!(
            loaded.errors[0],
            StoreError::InvalidNumber { row: 1, field: "lat", .. }
        ));
        assert!(matches!(
            loaded.errors[1],
            StoreError::MissingField { row: 2, field: "lat" }
        ));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_header_match_ignores_case_and_spaces() {
        let path = temp_csv("loose_header");
        fs::write(&path, " LAT , Lon,Date\n43.7,-79.4,20240101\n").unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.records.len(), 1);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = ReportStore::new(temp_csv("missing"));
        let loaded = store.load().unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.errors.is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let path = temp_csv("append");
        let store = ReportStore::new(&path);

        let first = Report::new(43.7, -79.4, date("20240101"))
            .with_description("Piles of garbage, near the park bench")
            .with_image("images/20240101_43.7_-79.4.jpg");
        let second = Report::new(43.71, -79.41, date("20240102"));
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("lat,lon,date,description,image\n"));
        assert_eq!(text.lines().count(), 3);

        let loaded = store.load().unwrap();
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.records, vec![first, second]);
        // Longitude comes back with the sign it was stored with
        assert_eq!(loaded.records[0].location.lon(), -79.4);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_append_rejects_bad_coordinate() {
        let path = temp_csv("append_bad");
        let store = ReportStore::new(&path);
        let err = store
            .append(&Report::new(43.7, -190.0, date("20240101")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_headerless_and_short_rows() {
        let path = temp_csv("headerless");
        fs::write(
            &path,
            "43.7,-79.4,20240101\n43.71,-79.41,20240102,Old tyres,\n43.72,-79.42,2024-01-03,,",
        )
        .unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.records[0].description, None);
        assert_eq!(loaded.records[1].description.as_deref(), Some("Old tyres"));
        assert_eq!(loaded.records[1].image, None);
        assert_eq!(loaded.records[2].date, date("20240103"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_rows_are_skipped_and_reported() {
        let path = temp_csv("bad_rows");
        fs::write(
            &path,
            "lat,lon,date,description,image\n\
             43.7,-79.4,20240101,ok,\n\
             abc,-79.4,20240101,,\n\
             43.7,-79.4,2024-13-01,,\n\
             91.0,-79.4,20240101,,\n\
             43.7\n\
             43.8,-79.5,20240102,also ok,\n",
        )
        .unwrap();

        let loaded = ReportStore::new(&path).load().unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.errors.len(), 4);
        assert!(matches!(
            loaded.errors[0],
            StoreError::InvalidNumber { row: 2, field: "lat", .. }
        ));
        assert!(matches!(loaded.errors[1], StoreError::InvalidDate { row: 3, .. }));
        assert!(matches!(
            loaded.errors[2],
            StoreError::InvalidCoordinate { row: 4, .. }
        ));
        assert!(matches!(
            loaded.errors[3],
            StoreError::MissingField { row: 5, field: "lon" }
        ));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let path = temp_csv("no_newline");
        fs::write(&path, "lat,lon,date,description,image\n43.7,-79.4,20240101,,").unwrap();

        let store = ReportStore::new(&path);
        store
            .append(&Report::new(43.8, -79.5, date("20240102")))
            .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.records.len(), 2);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_image_degrades_to_none() {
        let report = Report::new(43.7, -79.4, date("20240101"))
            .with_image("/definitely/not/here/photo.jpg");
        assert!(report.image.is_some());
        assert!(report.existing_image().is_none());

        let path = temp_csv("image");
        fs::write(&path, b"jpeg").unwrap();
        let report = report.with_image(&path);
        assert_eq!(report.existing_image(), Some(path.as_path()));
        fs::remove_file(&path).ok();
    }
}
