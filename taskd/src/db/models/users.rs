//! Database models for users.

use crate::types::UserId;

/// Database request for creating a new user.
///
/// Only ever constructed with an already-hashed password; the plaintext never
/// reaches the database layer.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub username: String,
    pub password_hash: String,
}

/// Database response for a user.
///
/// This is the only struct in the crate that carries the password hash. It is
/// consumed by the authenticator and mapped into [`crate::api::models::users::UserResponse`]
/// before anything leaves the service.
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub disabled: bool,
}
