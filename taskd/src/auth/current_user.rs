//! Request-time resolution of a bearer token into a user identity.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, trace};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::token,
    db::{errors::DbError, handlers::Users},
    errors::{Error, Result},
};

/// Pull the bearer token out of the Authorization header, if one is present.
fn bearer_token(parts: &Parts) -> Result<Option<&str>> {
    let Some(auth_header) = parts.headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header.to_str().map_err(|e| Error::BadRequest {
        message: format!("Invalid authorization header: {e}"),
    })?;

    Ok(auth_str.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    /// Turn an `Authorization: Bearer <token>` header into an active user.
    ///
    /// Missing header, unverifiable or expired token, and a subject that no
    /// longer exists in the store all collapse into the same 401 rejection.
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Some(token) = bearer_token(parts)? else {
            trace!("No bearer token on request");
            return Err(Error::Unauthenticated { message: None });
        };

        let secret = state.config.secret_key.as_ref().ok_or_else(|| Error::Internal {
            operation: "access tokens: secret_key is required".to_string(),
        })?;

        let subject = token::verify_access_token(token, secret).map_err(|e| {
            trace!("Token verification failed: {e}");
            Error::Unauthenticated { message: None }
        })?;

        let mut conn = state.db.acquire().await.map_err(DbError::from)?;
        let user = Users::new(&mut conn)
            .get_by_username(&subject)
            .await?
            .ok_or_else(|| {
                // Token verified but its subject is gone from the store
                trace!("Token subject {subject} has no user record");
                Error::Unauthenticated { message: None }
            })?;

        debug!("Resolved bearer token to user {}", user.id);
        Ok(CurrentUser::from(user))
    }
}
