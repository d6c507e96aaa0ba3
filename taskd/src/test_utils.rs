//! Test utilities for unit and integration tests.

use std::time::Duration;

use axum_test::TestServer;
use sqlx::SqlitePool;

use crate::{
    AppState, build_router,
    config::{AuthConfig, Config, PasswordConfig},
};

pub fn create_test_config() -> Config {
    Config {
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: AuthConfig {
            token_ttl: Duration::from_secs(3600),
            password: PasswordConfig {
                // Short test passwords are fine
                min_length: 3,
                max_length: 128,
            },
        },
        ..Default::default()
    }
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::builder().db(pool).config(create_test_config()).build()
}

pub fn create_test_app(pool: SqlitePool) -> TestServer {
    create_test_app_with_config(pool, create_test_config())
}

pub fn create_test_app_with_config(pool: SqlitePool, config: Config) -> TestServer {
    let state = AppState::builder().db(pool).config(config).build();
    TestServer::new(build_router(state)).expect("Failed to create test server")
}
