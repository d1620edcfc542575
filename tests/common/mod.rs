//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::net::TcpListener;

use levelup::app::AppContext;
use levelup::config::{ApiConfig, Config, StorageConfig};
use levelup::token::{Credential, SecureString};
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Config pointing at `base_url`, with a token file inside `dir`.
pub fn test_config(base_url: &str, dir: &TempDir) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        },
        storage: StorageConfig {
            token_path: Some(dir.path().join("tokens.toml")),
        },
    }
}

/// App context wired to `base_url` with an empty token store.
pub fn make_app(base_url: &str) -> (TempDir, AppContext) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(base_url, &dir);
    let app = AppContext::new(&config).expect("Failed to build app context");
    (dir, app)
}

/// App context whose token store already holds a credential for `u1`.
pub fn make_signed_in_app(base_url: &str) -> (TempDir, AppContext) {
    let (dir, app) = make_app(base_url);
    app.token_store()
        .save_credential(&sample_credential())
        .expect("Failed to seed credential");
    (dir, app)
}

pub fn sample_credential() -> Credential {
    Credential {
        access_token: SecureString::new("access-token-1"),
        refresh_token: SecureString::new("refresh-token-1"),
        user_id: "u1".to_string(),
        user_email: "test@example.com".to_string(),
    }
}

pub fn quiz_json(id: i64, name: &str) -> String {
    format!(
        r#"{{"id": {id}, "name": "{name}", "category": "MATHEMATICS", "visibility": "PRIVATE",
            "creatorId": "u1", "createdAt": "2026-01-01T10:00:00Z",
            "updatedAt": "2026-01-01T10:00:00Z", "questions": []}}"#
    )
}

pub fn page_json(quizzes: &[String]) -> String {
    format!(
        r#"{{"content": [{}], "totalElements": {}, "totalPages": 1, "number": 0, "size": 20}}"#,
        quizzes.join(","),
        quizzes.len()
    )
}
