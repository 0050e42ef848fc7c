//! Accounts allowed to sign in.

use minicrm_core::roles::Role;
use minicrm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row of `users`.
///
/// Not `Serialize`: it carries the password hash. Handlers return
/// [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub login: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outward view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub login: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub login: String,
    pub password_hash: String,
    pub role: Role,
}
