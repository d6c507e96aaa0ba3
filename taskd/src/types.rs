//! Shared identifier types.

/// Identifier for a user record, assigned by the store on creation.
pub type UserId = i64;

/// Identifier for a todo record, assigned by the store on creation.
pub type TodoId = i64;
