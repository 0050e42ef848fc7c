//! Domain types and pure logic for the Mini CRM backend.
//!
//! Nothing in this crate performs I/O, so it can be shared by the
//! repository layer, the HTTP layer and the maintenance binaries alike.

pub mod activity;
pub mod authorization;
pub mod clock;
pub mod contract;
pub mod error;
pub mod identity;
pub mod roles;
pub mod stats;
pub mod types;
pub mod validation;
