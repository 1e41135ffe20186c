//! City identity resolution across the two historical series.
//!
//! The weather series stores `bangalore`, the air-quality series stores
//! `Bengaluru`. Only that pair is known to drift; other cities with similar
//! drift are not handled and are simply case-folded.

use crate::db::schema::SeriesSchema;
use crate::models::Series;

/// Two spellings of one real-world city, stored lowercase.
struct CityAlias {
    weather: &'static str,
    air_quality: &'static str,
}

impl CityAlias {
    fn spelling_for(&self, series: Series) -> &'static str {
        match series {
            Series::Weather => self.weather,
            Series::AirQuality => self.air_quality,
        }
    }
}

const CITY_ALIASES: &[CityAlias] = &[CityAlias {
    weather: "bangalore",
    air_quality: "bengaluru",
}];

/// Map a user-supplied city onto the key `series` stores it under.
///
/// Case-insensitive, total and idempotent: unknown names are only folded to
/// the series' case convention.
pub fn resolve_city(raw: &str, series: Series) -> String {
    let schema = SeriesSchema::for_series(series);
    let folded = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

    let name = CITY_ALIASES
        .iter()
        .find(|alias| alias.weather == folded || alias.air_quality == folded)
        .map(|alias| alias.spelling_for(series))
        .unwrap_or(folded.as_str());

    schema.city_case.apply(name)
}
