//! Query string parameters.

use minicrm_core::types::DbId;
use serde::Deserialize;

/// `?include_inactive=` on list endpoints of soft-deactivated entities.
///
/// Defaults to `true` so the full catalogue is listed unless a caller asks
/// for active rows only.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default = "default_true")]
    pub include_inactive: bool,
}

/// `?limit=` on feed-style endpoints. Clamped by the handler.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?client_id=` filter.
#[derive(Debug, Deserialize)]
pub struct ClientFilterParams {
    pub client_id: Option<DbId>,
}

fn default_true() -> bool {
    true
}
