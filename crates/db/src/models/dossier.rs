//! Dossier (per-client case file) model and DTOs.

use minicrm_core::types::{DbId, Timestamp};
use minicrm_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `dossiers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dossier {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dossier.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDossier {
    pub client_id: DbId,
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing dossier. The owning client cannot change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDossier {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
}
