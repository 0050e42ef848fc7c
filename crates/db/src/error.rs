//! Error type for repository operations that enforce domain rules.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Methods that resolve
//! references or guard deletes inside a transaction also need to report
//! domain outcomes (missing parent, dependents still present), so they
//! return [`RepoError`] instead.

use minicrm_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: minicrm_core::types::DbId) -> Self {
        RepoError::Core(CoreError::NotFound { entity, id })
    }
}
