//! API request/response models for todos.

use crate::db::models::todos::TodoDBResponse;
use crate::types::{TodoId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Todo creation request. The owner is always the authenticated caller and
/// cannot be supplied here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Todo update request: a full overwrite of the mutable fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TodoUpdate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Todo as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: UserId,
}

impl From<TodoDBResponse> for TodoResponse {
    fn from(db: TodoDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            completed: db.completed,
            owner_id: db.owner_id,
        }
    }
}
