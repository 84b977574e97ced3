//! Shared utilities and common types for the internet users admin workspace.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic for edit forms
//! - Case-insensitive text matching used by search
//! - The locally persisted session object holding the bearer token

pub mod session;
pub mod text;
pub mod validation;
