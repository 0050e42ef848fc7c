//! Best-effort recording of mutations into the activity feed.

use minicrm_core::activity::activity_status;
use minicrm_core::types::DbId;
use minicrm_db::models::activity::CreateActivity;
use minicrm_db::repositories::ActivityRepo;
use minicrm_db::DbPool;

use crate::middleware::auth::AuthUser;

/// The record an activity points at.
#[derive(Debug, Clone, Copy)]
pub struct Subject {
    pub entity_type: &'static str,
    pub entity_id: DbId,
}

impl Subject {
    pub fn new(entity_type: &'static str, entity_id: DbId) -> Self {
        Self {
            entity_type,
            entity_id,
        }
    }
}

/// Append an activity for a completed mutation. Failures are logged and
/// swallowed: the mutation itself has already been committed.
pub async fn record(
    pool: &DbPool,
    actor: &AuthUser,
    activity_type: &'static str,
    subject: Subject,
    description: String,
) {
    record_as(pool, &actor.login, activity_type, Some(subject), description).await;
}

/// Like [`record`], for callers identified only by login.
pub async fn record_as(
    pool: &DbPool,
    actor: &str,
    activity_type: &'static str,
    subject: Option<Subject>,
    description: String,
) {
    let input = CreateActivity {
        activity_type,
        actor: actor.to_string(),
        status: activity_status::SUCCESS,
        description,
        entity_type: subject.map(|s| s.entity_type),
        entity_id: subject.map(|s| s.entity_id),
    };

    if let Err(e) = ActivityRepo::record(pool, &input).await {
        tracing::warn!(error = %e, activity_type, actor, "Failed to record activity");
    }
}
