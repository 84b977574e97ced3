//! Common test utilities for console integration tests.
//!
//! Runs console commands against a mock API server.

// Helpers used by some tests only.
#![allow(dead_code)]

use std::path::PathBuf;

use domain::services::UsersScreen;
use internet_users_console::prompt::ScriptedPrompter;
use internet_users_console::session::SessionFileAuth;
use internet_users_console::{App, Cli, CliError, Config};
use mockito::{Mock, ServerGuard};
use remote::HttpUserStore;
use serde_json::json;
use tempfile::TempDir;

/// A mock API plus a session directory.
pub struct TestEnv {
    pub server: ServerGuard,
    pub dir: TempDir,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Persist a session object holding `token`.
    pub fn login(&self, token: &str) {
        let body = json!({ "token": token, "user": { "name": "admin" } });
        std::fs::write(self.session_path(), body.to_string()).expect("Failed to write session");
    }

    pub fn config(&self) -> Config {
        let base_url = self.server.url();
        Config::from_toml(
            "[logging]\nlevel = \"debug\"",
            &[("api.base_url", base_url.as_str())],
        )
        .expect("Failed to build config")
    }

    /// Mock the three load endpoints with the standard fixture.
    pub async fn mock_load(&mut self) -> Vec<Mock> {
        self.mock_load_with(users_fixture()).await
    }

    /// Mock the three load endpoints, serving `users` from `/internet`.
    pub async fn mock_load_with(&mut self, users: serde_json::Value) -> Vec<Mock> {
        vec![
            self.server
                .mock("GET", "/internet")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(users.to_string())
                .create_async()
                .await,
            self.server
                .mock("GET", "/directorate")
                .with_status(200)
                .with_body(directorates_fixture().to_string())
                .expect_at_least(1)
                .create_async()
                .await,
            self.server
                .mock("GET", "/employment-type")
                .with_status(200)
                .with_body(json!([{ "id": 1, "name": "Permanent" }, { "id": 2, "name": "Contract" }]).to_string())
                .create_async()
                .await,
        ]
    }

    /// Parse `args` and run the command, returning its stdout.
    pub async fn run(&self, args: &[&str], confirm: bool) -> (Result<(), CliError>, String) {
        let mut argv = vec!["internet-users"];
        argv.extend_from_slice(args);
        let cli = <Cli as clap::Parser>::try_parse_from(argv).expect("Failed to parse args");

        let config = self.config();
        let store = HttpUserStore::new(&config.http_config()).expect("Failed to build store");
        let screen = UsersScreen::new(store).with_precedence(config.search_precedence());
        let prompter = ScriptedPrompter {
            confirm,
            choice: None,
        };
        let mut app = App::new(
            screen,
            Box::new(SessionFileAuth::new(self.session_path())),
            Box::new(prompter),
        );

        let mut out = Vec::new();
        let result = app.execute(&cli.command, &mut out).await;
        (result, String::from_utf8(out).expect("Output is not UTF-8"))
    }
}

pub fn users_fixture() -> serde_json::Value {
    json!([
        {
            "id": 1, "name": "Ana", "username": "ana.k", "lastname": "Kovac",
            "email": "ana@example.org", "phone": "0700111", "employment_type": "Permanent",
            "directorate": "Finance", "deputy": "Policy", "position": "Analyst",
            "device_limit": "2", "device_type": "Laptop", "group_type": "Staff",
            "mac_address": "AA:BB:CC:DD:EE:01", "status": 1, "violations_count": "0",
            "violation_type": null, "comment": null
        },
        {
            "id": 2, "name": "Ben", "username": "b.stone", "lastname": "Stone",
            "email": "ben@example.org", "phone": "0700222", "employment_type": "Contract",
            "directorate": "Audit", "deputy": "Finance", "position": "Clerk",
            "device_limit": "1", "device_type": "Phone", "group_type": "Guest",
            "mac_address": "AA:BB:CC:DD:EE:02", "status": 0, "violations_count": "2",
            "violation_type": "Torrenting", "comment": "Second warning"
        }
    ])
}

pub fn directorates_fixture() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Finance" },
        { "id": 2, "name": "Policy" },
        { "id": 3, "name": "Audit" },
        { "id": 6, "name": "Information Technology" },
        { "id": 7, "name": "Legal" }
    ])
}
