//! Registration and login handlers.

use axum::{Form, Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::models::{
        auth::{LoginRequest, TokenResponse},
        users::{UserCreate, UserResponse},
    },
    auth::{credentials, password, token},
    db::{errors::DbError, handlers::Users, models::users::UserCreateDBRequest},
    errors::Error,
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register/",
    request_body = UserCreate,
    tag = "users",
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Username already registered or invalid input"),
    )
)]
#[tracing::instrument(skip_all, fields(username = %request.username))]
pub async fn register(State(state): State<AppState>, Json(request): Json<UserCreate>) -> Result<(StatusCode, Json<UserResponse>), Error> {
    if request.username.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Username must not be empty".to_string(),
        });
    }

    let password_config = &state.config.auth.password;
    if request.password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if request.password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let mut user_repo = Users::new(&mut conn);

    if user_repo.get_by_username(&request.username).await?.is_some() {
        return Err(Error::BadRequest {
            message: "Username already registered".to_string(),
        });
    }

    // Hash the password on a blocking thread to avoid blocking the async runtime
    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    // A concurrent registration of the same name loses here instead: the
    // unique constraint maps to the same 400 as the check above.
    let created_user = user_repo
        .create(&UserCreateDBRequest {
            username: request.username,
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created_user))))
}

/// Exchange a username/password pair for a bearer access token
#[utoipa::path(
    post,
    path = "/token",
    tag = "users",
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect username or password"),
    )
)]
#[tracing::instrument(skip_all, fields(username = %form.username))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginRequest>) -> Result<Json<TokenResponse>, Error> {
    let user = match credentials::authenticate_user(&state.db, &form.username, &form.password).await? {
        Ok(user) => user,
        Err(failure) => {
            // One generic signal for both failure modes, so usernames cannot
            // be enumerated through the login endpoint
            tracing::debug!("Login rejected: {failure}");
            return Err(Error::Unauthenticated {
                message: Some("Incorrect username or password".to_string()),
            });
        }
    };

    let secret = state.config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "access tokens: secret_key is required".to_string(),
    })?;
    let access_token = token::issue_access_token(&user.username, state.config.auth.token_ttl, secret)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
