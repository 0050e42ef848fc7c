//! Activity feed vocabulary.
//!
//! Mutating handlers append one activity row per change; the dashboard
//! reads the newest ones back. Recording is best-effort.

/// Known activity types.
pub mod activity_types {
    pub const LOGIN: &str = "login";
    pub const CLIENT_CREATE: &str = "client_create";
    pub const CLIENT_UPDATE: &str = "client_update";
    pub const CLIENT_DELETE: &str = "client_delete";
    pub const CONTRACT_CREATE: &str = "contract_create";
    pub const CONTRACT_UPDATE: &str = "contract_update";
    pub const CONTRACT_DELETE: &str = "contract_delete";
    pub const SERVICE_CREATE: &str = "service_create";
    pub const SERVICE_UPDATE: &str = "service_update";
    pub const SERVICE_DEACTIVATE: &str = "service_deactivate";
    pub const SERVICE_ASSIGN: &str = "service_assign";
    pub const SERVICE_UNASSIGN: &str = "service_unassign";
    pub const DOSSIER_CREATE: &str = "dossier_create";
    pub const DOSSIER_UPDATE: &str = "dossier_update";
    pub const DOSSIER_DELETE: &str = "dossier_delete";
    pub const USER_CREATE: &str = "user_create";
    pub const USER_ROLE_CHANGE: &str = "user_role_change";
    pub const USER_PASSWORD_RESET: &str = "user_password_reset";
}

/// Outcome recorded alongside an activity.
pub mod activity_status {
    pub const SUCCESS: &str = "success";
}

/// Default number of entries returned by the recent-activity feed.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Hard cap on the recent-activity feed.
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Clamp a caller-supplied feed size into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_recent_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}
