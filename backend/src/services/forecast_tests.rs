#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde_json::json;

    use crate::models::{CalendarDate, ForecastSample};
    use crate::services::forecast::{
        bucketize, normalize_icon, samples_from_payload, FALLBACK_ICON, MAX_FORECAST_DAYS,
    };

    fn today() -> CalendarDate {
        // Wednesday
        CalendarDate::from_ymd(2024, 5, 1).unwrap()
    }

    fn sample(ts: &str, min: f64, max: f64, icon: Option<&str>) -> ForecastSample {
        ForecastSample {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            temp_min: min,
            temp_max: max,
            icon_code: icon.map(str::to_string),
        }
    }

    /// Eight 3-hourly samples per day for `days` days starting at `today`.
    fn week_of_samples(days: u64) -> Vec<ForecastSample> {
        let mut out = Vec::new();
        for d in 0..days {
            let date = today().plus_days(d);
            for slot in 0..8u32 {
                let ts = format!("{} {:02}:00:00", date, slot * 3);
                let base = d as f64 * 10.0 + slot as f64;
                out.push(sample(&ts, base - 1.0, base + 1.0, Some("02d")));
            }
        }
        out
    }

    #[test]
    fn test_today_is_excluded_and_output_capped() {
        let summaries = bucketize(&week_of_samples(7), today());

        assert_eq!(summaries.len(), MAX_FORECAST_DAYS);
        assert!(summaries.iter().all(|s| s.date != today()));
        assert_eq!(summaries[0].date, today().plus_days(1));
        assert_eq!(summaries[4].date, today().plus_days(5));
        for pair in summaries.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_bounds_cover_every_sample_of_the_day() {
        let samples = week_of_samples(7);
        let summaries = bucketize(&samples, today());

        for summary in &summaries {
            for s in samples.iter().filter(|s| s.date() == summary.date) {
                assert!(summary.temp_max >= s.temp_max);
                assert!(summary.temp_min <= s.temp_min);
            }
        }
        // day 1: slots 0..7 give min 9.0 and max 18.0
        assert_eq!(summaries[0].temp_min, 9.0);
        assert_eq!(summaries[0].temp_max, 18.0);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let mut samples = week_of_samples(4);
        let forward = bucketize(&samples, today());
        samples.reverse();
        let backward = bucketize(&samples, today());

        for (a, b) in forward.iter().zip(&backward) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.temp_min, b.temp_min);
            assert_eq!(a.temp_max, b.temp_max);
        }
    }

    #[test]
    fn test_extremes_after_first_sample_are_not_lost() {
        let samples = vec![
            sample("2024-05-02 09:00:00", 20.0, 25.0, Some("02d")),
            sample("2024-05-02 03:00:00", 12.0, 14.0, Some("02n")),
            sample("2024-05-02 12:00:00", 22.0, 33.0, Some("01d")),
        ];
        let summaries = bucketize(&samples, today());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].temp_min, 12.0);
        assert_eq!(summaries[0].temp_max, 33.0);
    }

    #[test]
    fn test_afternoon_icon_overrides_and_night_suffix_normalized() {
        let samples = vec![
            sample("2024-05-02 12:00:00", 24.0, 29.0, Some("04d")),
            sample("2024-05-02 15:00:00", 25.0, 31.0, Some("01n")),
        ];
        let summaries = bucketize(&samples, today());

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].icon_code, "01d");
        assert_eq!(summaries[0].temp_min, 24.0);
        assert_eq!(summaries[0].temp_max, 31.0);
        assert_eq!(summaries[0].day_name, "Thu");
    }

    #[test]
    fn test_first_sample_seeds_icon_without_afternoon_slot() {
        let samples = vec![
            sample("2024-05-02 18:00:00", 20.0, 22.0, Some("10n")),
            sample("2024-05-02 21:00:00", 19.0, 21.0, Some("13d")),
        ];
        let summaries = bucketize(&samples, today());
        assert_eq!(summaries[0].icon_code, "10d");
    }

    #[test]
    fn test_last_afternoon_sample_wins() {
        let samples = vec![
            sample("2024-05-02 15:00:00", 20.0, 22.0, Some("09d")),
            sample("2024-05-02 09:00:00", 20.0, 22.0, Some("01d")),
            sample("2024-05-02 15:00:00", 20.0, 22.0, Some("11n")),
        ];
        let summaries = bucketize(&samples, today());
        assert_eq!(summaries[0].icon_code, "11d");
    }

    #[test]
    fn test_groups_by_date_not_position() {
        let samples = vec![
            sample("2024-05-03 00:00:00", 1.0, 2.0, None),
            sample("2024-05-02 21:00:00", 3.0, 4.0, None),
            sample("2024-05-03 03:00:00", 0.0, 5.0, None),
        ];
        let summaries = bucketize(&samples, today());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].date, CalendarDate::from_ymd(2024, 5, 2).unwrap());
        assert_eq!(summaries[1].temp_min, 0.0);
        assert_eq!(summaries[1].temp_max, 5.0);
        assert_eq!(summaries[1].icon_code, FALLBACK_ICON);
    }

    #[test]
    fn test_past_samples_are_dropped() {
        let samples = vec![
            sample("2024-04-30 12:00:00", 1.0, 2.0, Some("01d")),
            sample("2024-05-01 12:00:00", 1.0, 2.0, Some("01d")),
        ];
        assert!(bucketize(&samples, today()).is_empty());
    }

    #[test]
    fn test_normalize_icon() {
        assert_eq!(normalize_icon(Some(" 01n ")), "01d");
        assert_eq!(normalize_icon(Some("04d")), "04d");
        assert_eq!(normalize_icon(Some("")), FALLBACK_ICON);
        assert_eq!(normalize_icon(Some("sunny")), FALLBACK_ICON);
        assert_eq!(normalize_icon(Some("1n")), FALLBACK_ICON);
        assert_eq!(normalize_icon(Some("01x")), FALLBACK_ICON);
        assert_eq!(normalize_icon(None), FALLBACK_ICON);
    }

    #[test]
    fn test_samples_from_payload() {
        let payload = json!({
            "cod": "200",
            "list": [
                {
                    "dt_txt": "2024-05-02 15:00:00",
                    "main": {"temp": 28.0, "temp_min": 26.5, "temp_max": 29.1},
                    "weather": [{"id": 800, "icon": "01d"}]
                },
                {
                    "dt_txt": "2024-05-02 18:00:00",
                    "main": {"temp_min": 25.0, "temp_max": 27.0},
                    "weather": []
                },
                {
                    "dt_txt": "2024-05-02 21:00:00",
                    "main": {"temp_min": 24.0, "temp_max": 26.0},
                    "weather": [{"icon": 42}]
                },
                {"dt_txt": "not a time", "main": {"temp_min": 1.0, "temp_max": 2.0}},
                {"dt_txt": "2024-05-03 00:00:00"}
            ]
        });

        let samples = samples_from_payload(&payload);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].icon_code.as_deref(), Some("01d"));
        assert_eq!(samples[0].temp_max, 29.1);
        assert!(samples[1].icon_code.is_none());
        assert!(samples[2].icon_code.is_none());
    }

    #[test]
    fn test_payload_without_list() {
        assert!(samples_from_payload(&json!({"cod": "404"})).is_empty());
    }
}
