//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token.
//! - [`rbac::Authorized`] -- Requires the policy to allow a named operation.
//! - [`rbac::RequireAuth`]: any valid token.

pub mod auth;
pub mod rbac;
