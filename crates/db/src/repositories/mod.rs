//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod client_repo;
pub mod contract_repo;
pub mod dossier_repo;
pub mod service_assignment_repo;
pub mod service_repo;
pub mod stats_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use client_repo::ClientRepo;
pub use contract_repo::ContractRepo;
pub use dossier_repo::DossierRepo;
pub use service_assignment_repo::ServiceAssignmentRepo;
pub use service_repo::ServiceRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;

use sqlx::{Postgres, Transaction};

use minicrm_core::types::DbId;

use crate::RepoError;

/// Lock a client row with `FOR SHARE` inside `tx` so it cannot be deleted
/// before the transaction commits. Fails with `NotFound` if it does not exist.
pub(crate) async fn lock_client(
    tx: &mut Transaction<'_, Postgres>,
    client_id: DbId,
) -> Result<(), RepoError> {
    let found: Option<(DbId,)> = sqlx::query_as("SELECT id FROM clients WHERE id = $1 FOR SHARE")
        .bind(client_id)
        .fetch_optional(&mut **tx)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepoError::not_found("Client", client_id)),
    }
}
