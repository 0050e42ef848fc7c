//! Repository for the `services` table.
//!
//! There is no hard delete: [`ServiceRepo::deactivate`] is what `DELETE`
//! maps to.

use minicrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, ServiceWithStats, UpdateService};

const COLUMNS: &str = "id, nom, type, description, prix, duree_mois, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (nom, type, description, prix, duree_mois, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.nom.trim())
            .bind(input.service_type.trim())
            .bind(&input.description)
            .bind(input.prix)
            .bind(input.duree_mois)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services with their assignment count and revenue, ordered by name.
    ///
    /// Inactive services are included unless `include_inactive` is false.
    pub async fn list_with_stats(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<ServiceWithStats>, sqlx::Error> {
        sqlx::query_as::<_, ServiceWithStats>(
            "SELECT s.id, s.nom, s.type, s.description, s.prix, s.duree_mois, s.is_active,
                    COUNT(a.id) AS clients_count,
                    COALESCE(SUM(a.revenue_contribution), 0) AS revenue_total,
                    s.created_at, s.updated_at
             FROM services s
             LEFT JOIN service_assignments a ON a.service_id = s.id
             WHERE $1 OR s.is_active
             GROUP BY s.id
             ORDER BY s.nom, s.id",
        )
        .bind(include_inactive)
        .fetch_all(pool)
        .await
    }

    /// Update a service. Only non-`None` fields in `input` are applied.
    ///
    /// `None` when the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                nom = COALESCE($2, nom),
                type = COALESCE($3, type),
                description = COALESCE($4, description),
                prix = COALESCE($5, prix),
                duree_mois = COALESCE($6, duree_mois),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(input.nom.as_deref().map(str::trim))
            .bind(input.service_type.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.prix)
            .bind(input.duree_mois)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Mark a service inactive. Idempotent: deactivating an inactive service
    /// returns it unchanged. Returns `None` if the service does not exist.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET is_active = false
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
