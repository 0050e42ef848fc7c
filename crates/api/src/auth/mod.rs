//! Authentication primitives.
//!
//! - [`password`] -- the [`password::PasswordHasher`] capability and its Argon2id implementation.
//! - [`jwt`] -- the [`jwt::TokenCodec`] capability and its HS256 JWT implementation.
//! - [`service`] -- [`service::AuthService`], which combines them with a credential store.

pub mod jwt;
pub mod password;
pub mod service;
