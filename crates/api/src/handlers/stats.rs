//! Handler for the public dashboard statistics.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveTime, Utc};
use minicrm_core::stats::{
    format_revenue, monthly_series, series_start, MonthBucket, MonthlyCount, HISTORY_MONTHS,
};
use minicrm_db::repositories::StatsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Flat payload consumed by the dashboard page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub client_count: i64,
    /// Contracts whose status is `actif` or `en_cours`.
    pub contract_count: i64,
    /// Summed amount of those contracts, with exactly two decimals.
    pub revenue: String,
    pub contracts_history: Vec<MonthlyCount>,
}

/// GET /api/stats/dashboard
///
/// Public: no token required.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let totals = StatsRepo::dashboard_totals(&state.pool).await?;

    let today = Utc::now().date_naive();
    let since = series_start(today, HISTORY_MONTHS)
        .and_time(NaiveTime::default())
        .and_utc();
    let buckets: Vec<MonthBucket> = StatsRepo::monthly_contract_counts(&state.pool, since)
        .await?
        .into_iter()
        .filter_map(|row| {
            Some(MonthBucket {
                year: row.year,
                month: u32::try_from(row.month).ok()?,
                count: row.count,
            })
        })
        .collect();

    Ok(Json(DashboardStats {
        client_count: totals.client_count,
        contract_count: totals.contract_count,
        revenue: format_revenue(totals.revenue),
        contracts_history: monthly_series(today, HISTORY_MONTHS, &buckets),
    }))
}
