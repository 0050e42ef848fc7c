//! Activity feed entries. Immutable once created (no updated_at).

use minicrm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub actor: String,
    pub status: String,
    pub description: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

/// DTO for appending an activity.
#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub activity_type: &'static str,
    pub actor: String,
    pub status: &'static str,
    pub description: String,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<DbId>,
}
