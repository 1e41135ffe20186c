//! Per-series storage conventions.
//!
//! The two historical collections were populated independently and disagree
//! on field-name casing and on how city names are written. All of that is
//! captured here so no call site hard-codes a field name.

use crate::models::Series;

/// How a series writes city names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityCase {
    /// `bangalore`, `new york`
    Lower,
    /// `Bengaluru`, `New York`
    Title,
}

impl CityCase {
    /// Fold `raw` into this convention. Whitespace runs collapse to one space.
    pub fn apply(&self, raw: &str) -> String {
        let words = raw.split_whitespace();
        match self {
            CityCase::Lower => words
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
            CityCase::Title => words.map(title_word).collect::<Vec<_>>().join(" "),
        }
    }
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Storage descriptor for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSchema {
    pub series: Series,
    /// Collection name in the store
    pub collection: &'static str,
    /// Field holding the city key
    pub city_field: &'static str,
    /// Field holding the record date
    pub date_field: &'static str,
    /// The measurement charts are drawn from; defaults to zero when missing
    pub primary_field: &'static str,
    pub city_case: CityCase,
}

pub const WEATHER_SCHEMA: SeriesSchema = SeriesSchema {
    series: Series::Weather,
    collection: "weatherHistory",
    city_field: "city",
    date_field: "date",
    primary_field: "temperature_2m_max",
    city_case: CityCase::Lower,
};

pub const AIR_QUALITY_SCHEMA: SeriesSchema = SeriesSchema {
    series: Series::AirQuality,
    collection: "aqiHistory",
    city_field: "City",
    date_field: "Date",
    primary_field: "AQI",
    city_case: CityCase::Title,
};

impl SeriesSchema {
    pub fn for_series(series: Series) -> &'static SeriesSchema {
        match series {
            Series::Weather => &WEATHER_SCHEMA,
            Series::AirQuality => &AIR_QUALITY_SCHEMA,
        }
    }

    /// Fields that identify a record rather than measure something.
    pub fn is_key_field(&self, field: &str) -> bool {
        field == self.city_field || field == self.date_field
    }
}
