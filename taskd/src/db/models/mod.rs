//! Storage-side record structures matching the table schemas.

pub mod todos;
pub mod users;
