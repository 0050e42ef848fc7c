//! Service assignment (client <-> service link) model and DTOs.

use minicrm_core::types::{DbId, Timestamp};
use minicrm_core::validation::non_negative;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `service_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceAssignment {
    pub id: DbId,
    pub service_id: DbId,
    pub client_id: DbId,
    pub assigned_at: Timestamp,
    pub revenue_contribution: Decimal,
}

/// An assignment joined with its client's name, for per-service listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentWithClient {
    pub id: DbId,
    pub service_id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub assigned_at: Timestamp,
    pub revenue_contribution: Decimal,
}

/// DTO for assigning a client to a service. The service id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssignment {
    pub client_id: DbId,
    /// Defaults to the service's `prix` (or 0 when the service has no price).
    #[validate(custom(function = "non_negative"))]
    pub revenue_contribution: Option<Decimal>,
}
