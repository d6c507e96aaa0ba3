//! Database models for todos.

use crate::api::models::todos::{TodoCreate, TodoUpdate};
use crate::types::{TodoId, UserId};

/// Database request for creating a new todo. The owner is supplied by the
/// handler from the resolved caller identity, never from the request body.
#[derive(Debug, Clone)]
pub struct TodoCreateDBRequest {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TodoCreate> for TodoCreateDBRequest {
    fn from(api: TodoCreate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            completed: api.completed,
        }
    }
}

/// Database request for updating a todo. Overwrites title, description, and
/// completed; the owner can never be reassigned.
#[derive(Debug, Clone)]
pub struct TodoUpdateDBRequest {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TodoUpdate> for TodoUpdateDBRequest {
    fn from(api: TodoUpdate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            completed: api.completed,
        }
    }
}

/// Database response for a todo
#[derive(Debug, Clone)]
pub struct TodoDBResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: UserId,
}
