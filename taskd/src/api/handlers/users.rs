//! Identity handlers.

use axum::Json;

use crate::{
    api::models::users::{CurrentUser, UserResponse},
    errors::Error,
};

/// Return the authenticated caller's own user record
#[utoipa::path(
    get,
    path = "/users/me/",
    tag = "users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "The current user", body = UserResponse),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn read_current_user(user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    Ok(Json(UserResponse::from(user)))
}
