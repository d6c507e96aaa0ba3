//! Axum route handlers.

pub mod auth;
pub mod system;
pub mod todos;
pub mod users;
