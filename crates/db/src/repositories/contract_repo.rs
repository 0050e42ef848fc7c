//! Repository for the `contracts` table.

use chrono::NaiveDate;
use minicrm_core::error::CoreError;
use minicrm_core::types::DbId;
use minicrm_core::validation::date_range;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractWithClient, CreateContract, UpdateContract};
use crate::repositories::lock_client;
use crate::RepoError;

const COLUMNS: &str = "id, client_id, title, amount, start_date, end_date, status, \
                       created_at, updated_at";

/// Column list for queries joining `clients` (aliased `c` and `cl`).
const JOINED_COLUMNS: &str = "c.id, c.client_id, cl.name AS client_name, c.title, c.amount, \
                              c.start_date, c.end_date, c.status, c.created_at, c.updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract, returning the created row.
    ///
    /// The referenced client is locked for the duration of the insert; a
    /// missing client yields `NotFound` and nothing is written.
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, RepoError> {
        let mut tx = pool.begin().await?;
        lock_client(&mut tx, input.client_id).await?;

        let query = format!(
            "INSERT INTO contracts (client_id, title, amount, start_date, end_date, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let contract = sqlx::query_as::<_, Contract>(&query)
            .bind(input.client_id)
            .bind(input.title.trim())
            .bind(input.amount)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.unwrap_or_default().as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contract)
    }

    /// Find a contract by internal ID, with its client's name.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContractWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM contracts c
             JOIN clients cl ON cl.id = c.client_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, ContractWithClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contracts, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContractWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM contracts c
             JOIN clients cl ON cl.id = c.client_id
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, ContractWithClient>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a contract. Only non-`None` fields in `input` are applied.
    ///
    /// The row is locked first so a date sent alone is checked against the
    /// stored one (`Validation` if the merged range is inverted). A new
    /// `client_id` is re-validated and locked in the same transaction.
    /// `None` when the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, RepoError> {
        let mut tx = pool.begin().await?;

        let stored: Option<(Option<NaiveDate>, Option<NaiveDate>)> =
            sqlx::query_as("SELECT start_date, end_date FROM contracts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((stored_start, stored_end)) = stored else {
            return Ok(None);
        };
        let start = input.start_date.or(stored_start);
        let end = input.end_date.or(stored_end);
        if let Err(e) = date_range(start, end) {
            let reason = e.message.map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string());
            return Err(CoreError::Validation(reason).into());
        }

        if let Some(client_id) = input.client_id {
            lock_client(&mut tx, client_id).await?;
        }

        let query = format!(
            "UPDATE contracts SET
                client_id = COALESCE($2, client_id),
                title = COALESCE($3, title),
                amount = COALESCE($4, amount),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let contract = sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.amount)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contract)
    }

    /// Delete a contract by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
