//! Authentication: password hashing, access tokens, and the request gate.
//!
//! The pieces compose in one direction: [`credentials`] checks a
//! username/password pair against the store using [`password`], a successful
//! login is turned into a signed access token by [`token`], and
//! [`current_user`] verifies that token on every protected request and
//! resolves it back into a user identity.
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use taskd::api::models::users::CurrentUser;
//!
//! async fn protected_handler(user: CurrentUser) -> String {
//!     format!("Hello, {}!", user.username)
//! }
//! ```
//!
//! The extractor is the only source of caller identity: handlers never trust
//! identity fields supplied in a request body.

pub mod credentials;
pub mod current_user;
pub mod password;
pub mod token;
