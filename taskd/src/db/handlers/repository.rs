//! Base repository trait for owner-scoped database operations.

use crate::db::errors::Result;
use crate::types::UserId;

/// Data access for a table whose rows belong to a single user.
///
/// Every operation takes the owning user's id, and mutations fold the
/// ownership check into the statement itself (`WHERE id = ? AND owner_id = ?`)
/// so there is no window between checking ownership and acting on it. A row
/// that exists but belongs to someone else is indistinguishable from a row
/// that does not exist: `get`/`update` yield `None` and `delete` yields
/// `false` in both cases.
#[async_trait::async_trait]
pub trait OwnedRepository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity owned by the given user
    async fn create(&mut self, owner: UserId, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID, if it exists and is owned by the given user
    async fn get(&mut self, owner: UserId, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List all entities owned by the given user
    async fn list(&mut self, owner: UserId) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID if it is owned by the given user, returning the
    /// updated row or `None` when no owned row matched
    async fn update(&mut self, owner: UserId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>>;

    /// Delete an entity by ID if it is owned by the given user; returns
    /// whether a row was removed
    async fn delete(&mut self, owner: UserId, id: Self::Id) -> Result<bool>;
}
