//! Username/password authentication against the credential store.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    auth::password,
    db::{errors::DbError, handlers::Users, models::users::UserDBResponse},
    errors::Error,
};

/// Why a credential pair was rejected.
///
/// The HTTP layer collapses both variants into one generic 401 so a caller
/// cannot tell a wrong password from an unknown username.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("no user with that username")]
    NoSuchUser,

    #[error("password mismatch")]
    BadPassword,
}

/// Verdict of an authentication attempt, distinct from infrastructure errors.
pub type AuthVerdict = std::result::Result<UserDBResponse, AuthFailure>;

/// Check a username/password pair against the credential store.
///
/// The outer `Result` is for infrastructure failures (store unreachable,
/// corrupt stored hash); the inner verdict says whether the credentials were
/// accepted. When the username is unknown we still burn one Argon2
/// computation so the unknown-user path takes as long as the verify path,
/// keeping username enumeration out of the timing side channel.
#[instrument(skip(db, plaintext))]
pub async fn authenticate_user(db: &SqlitePool, username: &str, plaintext: &str) -> Result<AuthVerdict, Error> {
    let mut conn = db.acquire().await.map_err(DbError::from)?;
    let user = Users::new(&mut conn).get_by_username(username).await?;

    // Hashing runs on a blocking thread to avoid stalling the async runtime.
    let plaintext = plaintext.to_string();
    match user {
        None => {
            tokio::task::spawn_blocking(move || {
                let _ = password::hash_string(&plaintext);
            })
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password hashing task: {e}"),
            })?;

            Ok(Err(AuthFailure::NoSuchUser))
        }
        Some(user) => {
            let hash = user.password_hash.clone();
            let matches = tokio::task::spawn_blocking(move || password::verify_string(&plaintext, &hash))
                .await
                .map_err(|e| Error::Internal {
                    operation: format!("spawn password verification task: {e}"),
                })??;

            if matches {
                Ok(Ok(user))
            } else {
                Ok(Err(AuthFailure::BadPassword))
            }
        }
    }
}
