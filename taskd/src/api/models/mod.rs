//! Transport-layer request/response models.

pub mod auth;
pub mod todos;
pub mod users;
