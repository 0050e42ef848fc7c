pub mod activities;
pub mod ai;
pub mod auth;
pub mod clients;
pub mod contracts;
pub mod dossiers;
pub mod services;
pub mod stats;
pub mod users;
