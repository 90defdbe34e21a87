#[cfg(test)]
mod tests {
    use crate::report::{Report, ReportDate};
    use crate::trend::{DailyCount, daily_counts, summarize};

    fn date(s: &str) -> ReportDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_daily_counts_sorted_by_day() {
        let reports = vec![
            Report::new(43.7, -79.4, date("20240103")),
            Report::new(43.7, -79.4, date("20240101")),
            Report::new(43.7, -79.4, date("20240103")),
            Report::new(43.7, -79.4, date("20240102")),
            Report::new(43.7, -79.4, date("20240103")),
        ];
        assert_eq!(
            daily_counts(&reports),
            vec![
                DailyCount {
                    date: date("20240101"),
                    count: 1
                },
                DailyCount {
                    date: date("20240102"),
                    count: 1
                },
                DailyCount {
                    date: date("20240103"),
                    count: 3
                },
            ]
        );
        assert!(daily_counts(&[]).is_empty());
    }

    #[test]
    fn test_summary() {
        let reports = vec![
            Report::new(43.0, -80.0, date("20240105")),
            Report::new(44.0, -79.0, date("20240101")),
            Report::new(45.0, -78.0, date("20240110")),
        ];
        let summary = summarize(&reports).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.lat.min, 43.0);
        assert_eq!(summary.lat.max, 45.0);
        assert!((summary.lat.mean - 44.0).abs() < 1e-12);
        assert_eq!(summary.lon.min, -80.0);
        assert_eq!(summary.lon.max, -78.0);
        assert!((summary.lon.mean - -79.0).abs() < 1e-12);
        assert_eq!(summary.first_date, date("20240101"));
        assert_eq!(summary.last_date, date("20240110"));

        assert!(summarize(&[]).is_none());
    }
}
