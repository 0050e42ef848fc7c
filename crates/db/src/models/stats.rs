//! Row types for the aggregation queries.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Headline dashboard figures.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardTotals {
    pub client_count: i64,
    /// Contracts whose status is open (`actif` or `en_cours`).
    pub contract_count: i64,
    /// Sum of `amount` over the same open contracts.
    pub revenue: Decimal,
}

/// Contracts created per calendar month.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyContractCount {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

/// Per-service assignment aggregates.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceStats {
    pub clients_count: i64,
    pub revenue_total: Decimal,
}
