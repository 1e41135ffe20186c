//! History views: resolve the city, fetch the window, relabel the dates.

use crate::db::repository::{HistoryRepository, RepositoryResult};
use crate::db::schema::SeriesSchema;
use crate::db::services::fetch_recent;
use crate::models::{AqiPoint, CalendarDate, DatedRecord, Series};
use crate::services::city::resolve_city;
use crate::services::reindex::reindex_to_today;

/// Weather history for a user-supplied city, ending today.
pub async fn weather_history(
    repo: &dyn HistoryRepository,
    city: &str,
    window: usize,
    today: CalendarDate,
) -> RepositoryResult<Vec<DatedRecord>> {
    let key = resolve_city(city, Series::Weather);
    let records = fetch_recent(repo, Series::Weather, &key, window).await?;
    Ok(reindex_to_today(records, today))
}

/// Air-quality history as `{date, aqi}` points, ending today.
pub async fn aqi_history(
    repo: &dyn HistoryRepository,
    city: &str,
    window: usize,
    today: CalendarDate,
) -> RepositoryResult<Vec<AqiPoint>> {
    let schema = SeriesSchema::for_series(Series::AirQuality);
    let key = resolve_city(city, Series::AirQuality);
    let records = fetch_recent(repo, Series::AirQuality, &key, window).await?;

    Ok(reindex_to_today(records, today)
        .into_iter()
        .map(|record| AqiPoint {
            date: record.date,
            aqi: record.measurement(schema.primary_field),
        })
        .collect())
}

/// Recent weather records to seed the predictor.
///
/// "No history" is an empty vector here, not an error: the prediction view
/// shows nothing rather than a 404.
pub async fn prediction_baseline(
    repo: &dyn HistoryRepository,
    city: &str,
    window: usize,
) -> RepositoryResult<Vec<DatedRecord>> {
    let key = resolve_city(city, Series::Weather);
    match fetch_recent(repo, Series::Weather, &key, window).await {
        Ok(records) => Ok(records),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
