//! Placeholder short-range predictor.
//!
//! Produces a plausible-looking noisy continuation of recent readings. This is
//! not a forecasting model.

use rand::distributions::Open01;
use rand::Rng;

use crate::models::{CalendarDate, DatedRecord, PredictedDay};

/// Days predicted after today.
pub const PREDICTION_HORIZON_DAYS: u64 = 7;

/// Predict `PREDICTION_HORIZON_DAYS` temperatures from `history`.
///
/// `history` is oldest first. Day `i` (1-based) uses `history[i % len]` as its
/// baseline, wrapping when fewer records exist, plus uniform noise in the open
/// interval (-1, 1), rounded to one decimal. Empty history predicts nothing.
pub fn predict<R: Rng>(
    history: &[DatedRecord],
    field: &str,
    today: CalendarDate,
    rng: &mut R,
) -> Vec<PredictedDay> {
    if history.is_empty() {
        return Vec::new();
    }

    (1..=PREDICTION_HORIZON_DAYS)
        .map(|i| {
            let baseline = history[i as usize % history.len()].measurement(field);
            let unit: f64 = rng.sample(Open01);
            let noise = (unit - 0.5) * 2.0;
            PredictedDay {
                date: today.plus_days(i),
                temperature: round_one_decimal(baseline + noise),
            }
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
