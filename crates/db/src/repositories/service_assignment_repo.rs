//! Repository for the `service_assignments` table.

use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::service_assignment::{
    AssignmentWithClient, CreateAssignment, ServiceAssignment,
};
use crate::repositories::lock_client;
use crate::RepoError;

const COLUMNS: &str = "id, service_id, client_id, assigned_at, revenue_contribution";

/// Links clients to services.
pub struct ServiceAssignmentRepo;

impl ServiceAssignmentRepo {
    /// Assign a client to a service.
    ///
    /// Both parents are locked `FOR SHARE`. Fails with `NotFound` if either is
    /// missing, `Validation` if the service is inactive, and `Conflict` if the
    /// pair is already assigned. When no contribution is given the service's
    /// `prix` (or zero) is used.
    pub async fn create(
        pool: &PgPool,
        service_id: DbId,
        input: &CreateAssignment,
    ) -> Result<ServiceAssignment, RepoError> {
        let mut tx = pool.begin().await?;

        let service: Option<(bool, Option<Decimal>)> =
            sqlx::query_as("SELECT is_active, prix FROM services WHERE id = $1 FOR SHARE")
                .bind(service_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (is_active, prix) = service.ok_or(RepoError::not_found("Service", service_id))?;
        if !is_active {
            return Err(CoreError::Validation(format!("Service {service_id} is inactive")).into());
        }

        lock_client(&mut tx, input.client_id).await?;

        let contribution = input
            .revenue_contribution
            .or(prix)
            .unwrap_or(Decimal::ZERO);

        let query = format!(
            "INSERT INTO service_assignments (service_id, client_id, revenue_contribution)
             VALUES ($1, $2, $3)
             ON CONFLICT (service_id, client_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, ServiceAssignment>(&query)
            .bind(service_id)
            .bind(input.client_id)
            .bind(contribution)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "Client {} is already assigned to service {service_id}",
                    input.client_id
                ))
            })?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// List a service's assignments with client names, most recent first.
    pub async fn list_by_service(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Vec<AssignmentWithClient>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentWithClient>(
            "SELECT a.id, a.service_id, a.client_id, cl.name AS client_name,
                    a.assigned_at, a.revenue_contribution
             FROM service_assignments a
             JOIN clients cl ON cl.id = a.client_id
             WHERE a.service_id = $1
             ORDER BY a.assigned_at DESC, a.id DESC",
        )
        .bind(service_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a client from a service. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        service_id: DbId,
        client_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM service_assignments WHERE service_id = $1 AND client_id = $2",
        )
        .bind(service_id)
        .bind(client_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
