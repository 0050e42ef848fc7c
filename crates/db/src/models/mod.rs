//! Row structs and input DTOs, one module per table.
//!
//! Update DTOs are all-`Option`: an absent field keeps the stored value.

pub mod activity;
pub mod client;
pub mod contract;
pub mod dossier;
pub mod service;
pub mod service_assignment;
pub mod stats;
pub mod user;
