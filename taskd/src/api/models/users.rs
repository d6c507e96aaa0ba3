//! API request/response models for users.
//!
//! None of these structs has a field for the password hash; the hash lives
//! only on [`UserDBResponse`] and cannot cross the mapping boundary.

use crate::db::models::users::UserDBResponse;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

/// User as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub disabled: bool,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            disabled: db.disabled,
        }
    }
}

/// The authenticated caller, produced by the bearer-token extractor in
/// [`crate::auth::current_user`]. This is the only source of "who is acting"
/// for protected handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub disabled: bool,
}

impl From<UserDBResponse> for CurrentUser {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            disabled: db.disabled,
        }
    }
}

impl From<CurrentUser> for UserResponse {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            disabled: user.disabled,
        }
    }
}
