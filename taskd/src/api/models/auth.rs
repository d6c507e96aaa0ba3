//! API request/response models for authentication.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request, form-encoded (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token to present in the `Authorization` header
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
}
