//! Console front end for the internet users admin screen.
//!
//! This crate contains:
//! - Layered configuration and logging setup
//! - The session-file token provider
//! - The command line definition and table rendering
//! - Command execution over `UsersScreen`

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod session;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::CliError;
