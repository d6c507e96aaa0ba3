//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite.
//! It follows the repository pattern: API handlers talk to repositories
//! ([`handlers`]), repositories map rows into storage-side records
//! ([`models`]), and failures are categorized in [`errors`].
//!
//! Storage records are deliberately separate from the transport structs in
//! [`crate::api::models`]: the password hash only exists on the storage side
//! and the mapping functions between the two cannot carry it across.

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

pub mod errors;
pub mod handlers;
pub mod models;

/// Embedded schema migrations, applied on startup.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open a connection pool to the configured database and bring the schema up
/// to date. The database file is created if it does not exist yet.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    migrator().run(&pool).await?;
    info!("Database ready at {url}");

    Ok(pool)
}
