//! Client entity model and DTOs.

use minicrm_core::types::{DbId, Timestamp};
use minicrm_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
}
