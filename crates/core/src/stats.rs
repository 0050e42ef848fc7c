//! Pure helpers for the aggregation endpoints.
//!
//! The heavy lifting (counts and sums) happens in SQL; this module shapes
//! the results: money rendering and the zero-filled monthly series.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Number of months shown in the dashboard contract history, current month
/// included.
pub const HISTORY_MONTHS: u32 = 6;

/// Short French month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// Render a money amount with exactly two decimals (`130` -> `"130.00"`).
pub fn format_revenue(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// One point of the contract history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub contracts: i64,
}

/// A `(year, month, count)` bucket as returned by a `date_trunc('month', ..)`
/// group-by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// First day of the oldest month covered by a `months`-long window ending
/// with the month of `today`.
pub fn series_start(today: NaiveDate, months: u32) -> NaiveDate {
    let (year, month) = shift_month(today.year(), today.month(), -(months.saturating_sub(1) as i32));
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

/// Build the zero-filled series for the `months` months ending with the month
/// of `today`, oldest first. Buckets outside the window are ignored.
pub fn monthly_series(today: NaiveDate, months: u32, buckets: &[MonthBucket]) -> Vec<MonthlyCount> {
    let offset = -(months.saturating_sub(1) as i32);
    (0..months as i32)
        .map(|i| {
            let (year, month) = shift_month(today.year(), today.month(), offset + i);
            let contracts = buckets
                .iter()
                .filter(|b| b.year == year && b.month == month)
                .map(|b| b.count)
                .sum();
            MonthlyCount {
                month: MONTH_LABELS[(month - 1) as usize].to_string(),
                contracts,
            }
        })
        .collect()
}

/// Move `(year, month)` by `delta` months. `month` is 1-based.
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + (month as i32 - 1) + delta;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}
