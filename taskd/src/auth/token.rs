//! Access token creation and verification.
//!
//! Tokens are HS256 JWTs carrying the subject (username) and an absolute
//! expiry. They are stateless and self-verifying: there is no revocation
//! list, and rotating the signing secret invalidates everything issued
//! before the rotation.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::Error as ServiceError;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (username). Optional on the wire so that a token missing the
    /// claim can be rejected with a precise error instead of a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (seconds since epoch)
    pub exp: i64,
    /// Issued at (seconds since epoch)
    pub iat: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The token could not be parsed, its signature did not match the current
    /// secret, or it declared a different signing algorithm
    #[error("malformed or wrongly signed token")]
    Malformed,

    /// The token was valid once but its expiry has passed
    #[error("token expired")]
    Expired,

    /// The token verified but carries no subject claim
    #[error("token has no subject")]
    MissingSubject,
}

/// Create a signed access token for the given subject, expiring after `ttl`.
pub fn issue_access_token(subject: &str, ttl: Duration, secret: &str) -> Result<String, ServiceError> {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: Some(subject.to_string()),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| ServiceError::Internal {
        operation: format!("create access token: {e}"),
    })
}

/// Verify a token against the current secret and return its subject.
///
/// Only HS256 is accepted; a token declaring any other algorithm fails with
/// [`VerificationError::Malformed`] regardless of its signature. Expiry is
/// checked with zero leeway.
pub fn verify_access_token(token: &str, secret: &str) -> Result<String, VerificationError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<AccessTokenClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerificationError::Expired,
        _ => VerificationError::Malformed,
    })?;

    match token_data.claims.sub {
        Some(subject) if !subject.is_empty() => Ok(subject),
        _ => Err(VerificationError::MissingSubject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-tokens";

    fn encode_raw(claims: &AccessTokenClaims, secret: &str, header: &Header) -> String {
        encode(header, claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue_access_token("alice", Duration::from_secs(60), SECRET).unwrap();
        assert!(!token.is_empty());

        let subject = verify_access_token(&token, SECRET).unwrap();
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let token = issue_access_token("alice", Duration::from_secs(60), SECRET).unwrap();

        let result = verify_access_token(&token, "a-different-secret");
        assert_eq!(result.unwrap_err(), VerificationError::Malformed);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: Some("alice".to_string()),
            exp: (now - chrono::Duration::seconds(5)).timestamp(),
            iat: (now - chrono::Duration::seconds(65)).timestamp(),
        };
        let token = encode_raw(&claims, SECRET, &Header::default());

        let result = verify_access_token(&token, SECRET);
        assert_eq!(result.unwrap_err(), VerificationError::Expired);
    }

    #[test]
    fn test_token_valid_until_expiry() {
        // A very short but still-live ttl verifies fine
        let token = issue_access_token("alice", Duration::from_secs(2), SECRET).unwrap();
        assert_eq!(verify_access_token(&token, SECRET).unwrap(), "alice");
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: None,
            exp: (now + chrono::Duration::seconds(60)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode_raw(&claims, SECRET, &Header::default());

        let result = verify_access_token(&token, SECRET);
        assert_eq!(result.unwrap_err(), VerificationError::MissingSubject);
    }

    #[test]
    fn test_other_algorithms_are_rejected() {
        // Same secret, but the token declares HS384 - no algorithm confusion
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: Some("alice".to_string()),
            exp: (now + chrono::Duration::seconds(60)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode_raw(&claims, SECRET, &Header::new(Algorithm::HS384));

        let result = verify_access_token(&token, SECRET);
        assert_eq!(result.unwrap_err(), VerificationError::Malformed);
    }

    #[test]
    fn test_garbage_tokens_are_malformed() {
        for token in ["not.a.token", "invalid", "", "too.many.parts.in.this.token"] {
            let result = verify_access_token(token, SECRET);
            assert_eq!(result.unwrap_err(), VerificationError::Malformed, "token: {token}");
        }
    }
}
