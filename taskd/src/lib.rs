//! # taskd: a small todo service with bearer-token authentication
//!
//! `taskd` exposes a REST API for user registration, password login with JWT
//! access-token issuance, and CRUD over todos that is gated on ownership.
//!
//! ## Request Flow
//!
//! Unauthenticated clients register at `POST /register/` and exchange their
//! username/password for a signed access token at `POST /token`. Every other
//! endpoint requires `Authorization: Bearer <token>`: the extractor in
//! [`auth::current_user`] verifies the token's signature and expiry, resolves
//! its subject against the users table, and hands the handler a
//! [`api::models::users::CurrentUser`]. Handlers then talk to the database
//! through the repositories in [`db::handlers`], which fold ownership checks
//! into the SQL statements themselves so a non-owner can neither observe nor
//! mutate another user's todos.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use taskd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = taskd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     taskd::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod types;

#[cfg(test)]
mod test;
#[cfg(test)]
pub mod test_utils;

use axum::{
    Json, Router,
    routing::{get, post},
};
use bon::Builder;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;

pub use config::Config;
pub use types::{TodoId, UserId};

use crate::openapi::ApiDoc;

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    /// SQLite connection pool for application data
    pub db: SqlitePool,
    /// Application configuration loaded from file/environment
    pub config: Config,
}

async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Assemble the service router on top of the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/register/", post(api::handlers::auth::register))
        .route("/token", post(api::handlers::auth::login))
        .route("/users/me/", get(api::handlers::users::read_current_user))
        .route(
            "/todos/",
            post(api::handlers::todos::create_todo).get(api::handlers::todos::list_todos),
        )
        .route(
            "/todos/{id}",
            get(api::handlers::todos::get_todo)
                .put(api::handlers::todos::update_todo)
                .delete(api::handlers::todos::delete_todo),
        )
        .route("/health", get(api::handlers::system::health))
        .route("/api-docs/openapi.json", get(serve_openapi))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

/// The assembled application: configuration, database pool, and router.
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized.
    ///
    /// Opens the database (creating and migrating it as needed) and builds
    /// the router. The signing secret and pool live in the state passed to
    /// handlers; there is no ambient global configuration.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting taskd with configuration: {:#?}", config);

        let pool = db::connect(&config.database.url).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    /// Start serving the application until the shutdown future resolves.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("taskd listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
