//! Domain layer for the internet users admin screen.
//!
//! This crate contains:
//! - Domain models (UserRecord, ReferenceEntry, FilterState, EditForm)
//! - The in-memory user collection, derived statistics and filtering
//! - The edit session state machine and the screen controller
//! - The remote store and auth provider abstractions

pub mod models;
pub mod services;
