//! Repository for the `dossiers` table.

use minicrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::dossier::{CreateDossier, Dossier, UpdateDossier};
use crate::repositories::lock_client;
use crate::RepoError;

const COLUMNS: &str = "id, client_id, title, description, created_at, updated_at";

/// Provides CRUD operations for dossiers.
pub struct DossierRepo;

impl DossierRepo {
    /// Insert a new dossier for an existing client.
    pub async fn create(pool: &PgPool, input: &CreateDossier) -> Result<Dossier, RepoError> {
        let mut tx = pool.begin().await?;
        lock_client(&mut tx, input.client_id).await?;

        let query = format!(
            "INSERT INTO dossiers (client_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let dossier = sqlx::query_as::<_, Dossier>(&query)
            .bind(input.client_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(dossier)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dossier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dossiers WHERE id = $1");
        sqlx::query_as::<_, Dossier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List dossiers, newest first, optionally restricted to one client.
    pub async fn list(pool: &PgPool, client_id: Option<DbId>) -> Result<Vec<Dossier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dossiers
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Dossier>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a dossier. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDossier,
    ) -> Result<Option<Dossier>, sqlx::Error> {
        let query = format!(
            "UPDATE dossiers SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dossier>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dossier by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dossiers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
