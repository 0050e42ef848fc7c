//! Aggregate queries behind the dashboard and per-service statistics.

use minicrm_core::contract::ContractStatus;
use minicrm_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::stats::{DashboardTotals, MonthlyContractCount, ServiceStats};

pub struct StatsRepo;

impl StatsRepo {
    /// Client count plus count and summed amount of open contracts.
    pub async fn dashboard_totals(pool: &PgPool) -> Result<DashboardTotals, sqlx::Error> {
        sqlx::query_as::<_, DashboardTotals>(
            "SELECT
                (SELECT COUNT(*) FROM clients) AS client_count,
                (SELECT COUNT(*) FROM contracts WHERE status = ANY($1)) AS contract_count,
                (SELECT COALESCE(SUM(amount), 0) FROM contracts WHERE status = ANY($1)) AS revenue",
        )
        .bind(ContractStatus::open_values())
        .fetch_one(pool)
        .await
    }

    /// Contracts created since `since`, grouped by UTC calendar month.
    pub async fn monthly_contract_counts(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<MonthlyContractCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyContractCount>(
            "SELECT
                EXTRACT(YEAR FROM created_at AT TIME ZONE 'UTC')::INT AS year,
                EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::INT AS month,
                COUNT(*) AS count
             FROM contracts
             WHERE created_at >= $1
             GROUP BY 1, 2
             ORDER BY 1, 2",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Assignment count and summed contribution for one service.
    ///
    /// Returns `None` if the service does not exist.
    pub async fn service_stats(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Option<ServiceStats>, sqlx::Error> {
        sqlx::query_as::<_, ServiceStats>(
            "SELECT COUNT(a.id) AS clients_count,
                    COALESCE(SUM(a.revenue_contribution), 0) AS revenue_total
             FROM services s
             LEFT JOIN service_assignments a ON a.service_id = s.id
             WHERE s.id = $1
             GROUP BY s.id",
        )
        .bind(service_id)
        .fetch_optional(pool)
        .await
    }
}
