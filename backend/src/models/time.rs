use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Absolute calendar day.
///
/// Only the date component carries meaning. On the wire it is rendered as an
/// ISO-8601 date-time at midnight UTC (`2024-05-01T00:00:00.000Z`), the shape
/// the chart layer parses with `new Date(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wrap a chrono date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` when the triple is not a real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Current UTC day.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Underlying chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Shift forward by `days`, saturating at the calendar bounds.
    pub fn plus_days(&self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// Shift backward by `days`, saturating at the calendar bounds.
    pub fn minus_days(&self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        (self.0 - other.0).num_days()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// English three-letter weekday label (`Mon`, `Tue`, ...).
    pub fn short_weekday(&self) -> String {
        self.0.format("%a").to_string()
    }

    /// Midnight-normalized ISO-8601 rendering used in every API response.
    pub fn to_iso_string(&self) -> String {
        format!("{}T00:00:00.000Z", self.0.format("%Y-%m-%d"))
    }

    /// Parse the date forms found in stored documents.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 date-times and `YYYY-MM-DD HH:MM:SS`.
    /// Date-times keep their own calendar day; no timezone shifting happens
    /// for the naive form.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Self(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc).date_naive()));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| Self(dt.date()))
    }

    /// Interpret a unix timestamp in seconds.
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|dt| Self(dt.date_naive()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDate::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid calendar date: {}", raw)))
    }
}
