//! Service entity model and DTOs.
//!
//! Services are soft-deleted only: `DELETE` flips `is_active` to false so
//! historical assignments keep a valid parent.

use minicrm_core::types::{DbId, Timestamp};
use minicrm_core::validation::{non_negative, not_blank};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub nom: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: Option<String>,
    pub prix: Option<Decimal>,
    pub duree_mois: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A service row plus its assignment aggregates, as returned by list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceWithStats {
    pub id: DbId,
    pub nom: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: Option<String>,
    pub prix: Option<Decimal>,
    pub duree_mois: Option<i32>,
    pub is_active: bool,
    pub clients_count: i64,
    pub revenue_total: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateService {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub nom: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub service_type: String,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub prix: Option<Decimal>,
    #[validate(range(min = 1))]
    pub duree_mois: Option<i32>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing service. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateService {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub nom: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub service_type: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub prix: Option<Decimal>,
    #[validate(range(min = 1))]
    pub duree_mois: Option<i32>,
    pub is_active: Option<bool>,
}
