//! Forecast bucketizer.
//!
//! Collapses the provider's 3-hourly forecast list into one row per future
//! calendar day for the five-day card.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{CalendarDate, DailyForecastSummary, ForecastSample};

/// Maximum number of days in the summary.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Generic daytime cloud cover; used for missing or malformed icons.
pub const FALLBACK_ICON: &str = "03d";

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The sample whose icon represents the day.
fn afternoon_slot() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Sanitize an icon code for a daytime summary.
///
/// Valid codes are two digits plus `d` or `n` after trimming; the night
/// variant maps to the day variant. Anything else becomes [`FALLBACK_ICON`].
pub fn normalize_icon(raw: Option<&str>) -> String {
    let Some(icon) = raw.map(str::trim) else {
        return FALLBACK_ICON.to_string();
    };

    let bytes = icon.as_bytes();
    let valid = bytes.len() == 3
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && matches!(bytes[2], b'd' | b'n');

    if valid {
        format!("{}d", &icon[..2])
    } else {
        FALLBACK_ICON.to_string()
    }
}

/// Running aggregate for one calendar day.
struct DayBucket {
    temp_min: f64,
    temp_max: f64,
    icon: String,
}

impl DayBucket {
    fn seed(sample: &ForecastSample) -> Self {
        Self {
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
            icon: normalize_icon(sample.icon_code.as_deref()),
        }
    }

    fn absorb(&mut self, sample: &ForecastSample) {
        self.temp_min = self.temp_min.min(sample.temp_min);
        self.temp_max = self.temp_max.max(sample.temp_max);
        if sample.timestamp.time() == afternoon_slot() {
            self.icon = normalize_icon(sample.icon_code.as_deref());
        }
    }
}

/// Group samples per future day and summarize each.
///
/// Samples on or before `today` are ignored. Min/max are a full fold over
/// every sample of the day regardless of input order; the icon starts from
/// the first sample seen and is overridden by the 15:00 sample (last one wins
/// if several claim that slot). At most [`MAX_FORECAST_DAYS`] rows, date
/// ascending.
pub fn bucketize(samples: &[ForecastSample], today: CalendarDate) -> Vec<DailyForecastSummary> {
    let mut buckets: BTreeMap<CalendarDate, DayBucket> = BTreeMap::new();

    for sample in samples {
        let date = sample.date();
        if date <= today {
            continue;
        }
        match buckets.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert(DayBucket::seed(sample));
            }
            Entry::Occupied(mut slot) => slot.get_mut().absorb(sample),
        }
    }

    buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, bucket)| DailyForecastSummary {
            date,
            day_name: date.short_weekday(),
            temp_min: bucket.temp_min,
            temp_max: bucket.temp_max,
            icon_code: bucket.icon,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt_txt: Option<String>,
    main: Option<RawMain>,
    #[serde(default)]
    weather: Value,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp_min: Option<f64>,
    temp_max: Option<f64>,
}

/// Extract samples from a provider forecast payload (`{"list": [...]}`).
///
/// Entries without a readable `dt_txt` or temperatures are skipped; a
/// missing `list` yields no samples.
pub fn samples_from_payload(payload: &Value) -> Vec<ForecastSample> {
    let Some(list) = payload.get("list").and_then(Value::as_array) else {
        warn!("Forecast payload has no list");
        return Vec::new();
    };

    list.iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let sample = parse_entry(entry);
            if sample.is_none() {
                warn!(index, "Skipping unreadable forecast entry");
            }
            sample
        })
        .collect()
}

fn parse_entry(entry: &Value) -> Option<ForecastSample> {
    let raw: RawEntry = serde_json::from_value(entry.clone()).ok()?;
    let timestamp = NaiveDateTime::parse_from_str(raw.dt_txt?.trim(), DT_TXT_FORMAT).ok()?;
    let main = raw.main?;
    let icon_code = raw
        .weather
        .get(0)
        .and_then(|condition| condition.get("icon"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ForecastSample {
        timestamp,
        temp_min: main.temp_min?,
        temp_max: main.temp_max?,
        icon_code,
    })
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;
