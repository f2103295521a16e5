/// Calendar and Julian date conversion
/// Round trips on both sides of the 1582 calendar reform and agreement with chrono for modern dates
#[cfg(test)]
mod calendar_tests {
    use astro_events::CalendarDate;
    use chrono::{Datelike, TimeZone, Timelike, Utc};

    fn assert_round_trip(date: CalendarDate) {
        let back = CalendarDate::from_julian_date(date.to_julian_date());
        assert_eq!(
            (back.year, back.month, back.day, back.hour, back.minute),
            (date.year, date.month, date.day, date.hour, date.minute),
            "round trip of {date}"
        );
        assert!(
            (back.second - date.second).abs() < 1.0,
            "seconds drifted from {} to {}",
            date.second,
            back.second
        );
    }

    #[test]
    fn test_round_trip_across_reform() {
        assert_round_trip(CalendarDate::new(1582, 10, 4, 23, 59, 59.5));
        assert_round_trip(CalendarDate::new(1582, 10, 15, 0, 0, 0.25));
        assert_round_trip(CalendarDate::new(1066, 10, 14, 9, 30, 0.0));
        assert_round_trip(CalendarDate::new(1900, 2, 28, 12, 0, 0.0));
        assert_round_trip(CalendarDate::new(2000, 2, 29, 18, 45, 30.125));
        assert_round_trip(CalendarDate::new(2100, 3, 1, 6, 7, 8.0));
    }

    #[test]
    fn test_reform_days_are_consecutive() {
        let thursday = CalendarDate::new(1582, 10, 4, 12, 0, 0.0);
        let friday = CalendarDate::new(1582, 10, 15, 12, 0, 0.0);
        assert_eq!(friday.to_julian_date() - thursday.to_julian_date(), 1.0);
        assert_eq!(thursday.weekday, 4);
        assert_eq!(friday.weekday, 5);
    }

    #[test]
    fn test_known_julian_dates() {
        assert_eq!(CalendarDate::new(2000, 1, 1, 12, 0, 0.0).to_julian_date(), 2_451_545.0);
        assert_eq!(CalendarDate::new(1858, 11, 17, 0, 0, 0.0).to_julian_date(), 2_400_000.5);
        assert_eq!(CalendarDate::new(1970, 1, 1, 0, 0, 0.0).to_julian_date(), 2_440_587.5);
    }

    #[test]
    fn test_epoch_seconds_agree_with_chrono() {
        for &seconds in &[0_i64, 951_782_400, 1_234_567_890, 1_700_000_000, 4_102_444_799] {
            let expected = Utc.timestamp_opt(seconds, 0).unwrap();
            let date = CalendarDate::from_epoch_seconds(seconds as f64);
            assert_eq!(date.year, expected.year());
            assert_eq!(date.month, expected.month());
            assert_eq!(date.day, expected.day());
            assert_eq!(date.hour, expected.hour());
            assert_eq!(date.minute, expected.minute());
            assert!((date.second - expected.second() as f64).abs() < 1e-3);
            assert_eq!(date.weekday, expected.weekday().num_days_from_sunday());

            let back = date.to_epoch_seconds();
            assert!((back - seconds as f64).abs() < 1e-3, "{back} vs {seconds}");
        }
    }

    #[test]
    fn test_iso8601_and_json() {
        let date = CalendarDate::from_epoch_seconds(1_234_567_890.5);
        assert_eq!(date.to_iso8601(), "2009-02-13T23:31:30.50000Z");

        let json = serde_json::to_string(&date).unwrap();
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }
}
