//! Service layer over the history repository.
//!
//! [`fetch_recent`] is the one place stored documents become
//! [`DatedRecord`]s. It applies the series' [`SeriesSchema`] so the store's
//! field casing never leaks past this module.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::repository::{
    Document, DocumentQuery, ErrorContext, HistoryRepository, RepositoryError, RepositoryResult,
};
use super::schema::SeriesSchema;
use crate::models::{CalendarDate, DatedRecord, Series};

/// Store health as seen by the health endpoint.
pub async fn health_check(repo: &dyn HistoryRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Per-collection document counts.
pub async fn collection_sizes(
    repo: &dyn HistoryRepository,
) -> RepositoryResult<BTreeMap<String, usize>> {
    repo.collection_sizes().await
}

/// Fetch up to `limit` most recent records for `canonical_city`, oldest first.
///
/// `canonical_city` must already be in the series' own spelling and case.
/// Recency is decided on the parsed calendar date, whatever form the store
/// keeps it in. Duplicate dates collapse before truncation, the document
/// stored last winning, so the window stays full while older unique dates
/// exist. Documents without a date field are not part of any window.
///
/// # Errors
/// * `NotFound` when the city has no dated records in this series
/// * `ValidationError` when `limit` is zero or a stored date cannot be read
/// * whatever the repository reports when the store itself fails
pub async fn fetch_recent(
    repo: &dyn HistoryRepository,
    series: Series,
    canonical_city: &str,
    limit: usize,
) -> RepositoryResult<Vec<DatedRecord>> {
    let schema = SeriesSchema::for_series(series);
    let context = || {
        ErrorContext::new("fetch_recent")
            .with_entity(series.as_str())
            .with_entity_id(canonical_city)
    };

    if limit == 0 {
        return Err(RepositoryError::validation_with_context(
            "limit must be positive",
            context(),
        ));
    }

    let query = DocumentQuery::new(schema.collection).where_eq(schema.city_field, canonical_city);

    let docs = repo
        .find(&query)
        .await
        .map_err(|e| e.with_operation("fetch_recent"))?;

    let mut records = Vec::with_capacity(docs.len());
    for (position, doc) in docs.iter().enumerate() {
        if !doc.contains_key(schema.date_field) {
            debug!(series = %series, city = canonical_city, position, "Skipping undated history document");
            continue;
        }
        let record = extract_record(schema, canonical_city, doc).map_err(|details| {
            RepositoryError::validation_with_context(
                "Malformed history record",
                context().with_details(details),
            )
        })?;
        records.push((position, record));
    }

    if records.is_empty() {
        return Err(RepositoryError::not_found_with_context(
            format!("No {} history found for '{}'", series, canonical_city),
            context(),
        ));
    }

    // Newest date first; within a date, the document stored last first.
    records.sort_by(|(pa, a), (pb, b)| b.date.cmp(&a.date).then(pb.cmp(pa)));

    let mut seen = HashSet::new();
    let mut window: Vec<DatedRecord> = records
        .into_iter()
        .filter_map(|(_, record)| {
            if seen.insert(record.date) {
                Some(record)
            } else {
                debug!(series = %series, city = canonical_city, date = %record.date, "Dropping duplicate history date");
                None
            }
        })
        .take(limit)
        .collect();
    window.reverse();

    debug!(series = %series, city = canonical_city, count = window.len(), "Fetched history window");
    Ok(window)
}

/// Turn one stored document into a record following `schema`.
fn extract_record(
    schema: &SeriesSchema,
    canonical_city: &str,
    doc: &Document,
) -> Result<DatedRecord, String> {
    let raw_date = doc
        .get(schema.date_field)
        .ok_or_else(|| format!("missing '{}' field", schema.date_field))?;
    let date = parse_stored_date(raw_date)
        .ok_or_else(|| format!("unreadable '{}' value: {}", schema.date_field, raw_date))?;

    let city = doc
        .get(schema.city_field)
        .and_then(Value::as_str)
        .unwrap_or(canonical_city);

    let mut record = DatedRecord::new(city, date);
    for (field, value) in doc {
        if schema.is_key_field(field) {
            continue;
        }
        if let Some(number) = numeric_value(value) {
            record.measurements.insert(field.clone(), number);
        }
    }
    record
        .measurements
        .entry(schema.primary_field.to_string())
        .or_insert(0.0);

    Ok(record)
}

/// Dates appear as strings, unix seconds, or exported timestamp objects
/// (`{"_seconds": ..}` / `{"seconds": ..}`).
fn parse_stored_date(value: &Value) -> Option<CalendarDate> {
    match value {
        Value::String(s) => CalendarDate::parse(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))
            .and_then(CalendarDate::from_unix_seconds),
        Value::Object(map) => map
            .get("_seconds")
            .or_else(|| map.get("seconds"))
            .and_then(Value::as_i64)
            .and_then(CalendarDate::from_unix_seconds),
        _ => None,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
