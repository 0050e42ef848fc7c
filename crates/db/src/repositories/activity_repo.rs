//! Repository for the append-only `activities` table.

use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity};

const COLUMNS: &str = "id, activity_type, actor, status, description, entity_type, entity_id, \
                       created_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity, returning the stored row.
    pub async fn record(pool: &PgPool, input: &CreateActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities
                (activity_type, actor, status, description, entity_type, entity_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.activity_type)
            .bind(&input.actor)
            .bind(input.status)
            .bind(&input.description)
            .bind(input.entity_type)
            .bind(input.entity_id)
            .fetch_one(pool)
            .await
    }

    /// The `limit` newest activities, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
