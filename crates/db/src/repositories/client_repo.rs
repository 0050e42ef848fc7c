//! Repository for the `clients` table.

use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient, UpdateClient};
use crate::RepoError;

const COLUMNS: &str = "id, name, email, phone, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.name.trim())
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a client by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name, id");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// `None` when the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client that has no dependents.
    ///
    /// The row is locked `FOR UPDATE` first, which waits for any transaction
    /// holding a `FOR SHARE` lock while inserting a child row. Returns
    /// `Ok(false)` if the client does not exist and `Conflict` if contracts,
    /// dossiers or service assignments still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        let found: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM clients WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if found.is_none() {
            return Ok(false);
        }

        let (contracts, dossiers, assignments): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM contracts WHERE client_id = $1),
                (SELECT COUNT(*) FROM dossiers WHERE client_id = $1),
                (SELECT COUNT(*) FROM service_assignments WHERE client_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if contracts + dossiers + assignments > 0 {
            return Err(CoreError::Conflict(format!(
                "Client {id} still has {contracts} contract(s), {dossiers} dossier(s) \
                 and {assignments} service assignment(s)"
            ))
            .into());
        }

        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
