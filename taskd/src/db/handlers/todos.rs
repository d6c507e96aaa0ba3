//! Database repository for todos.

use crate::{
    db::{
        errors::Result,
        handlers::repository::OwnedRepository,
        models::todos::{TodoCreateDBRequest, TodoDBResponse, TodoUpdateDBRequest},
    },
    types::{TodoId, UserId},
};
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: UserId,
}

impl From<Todo> for TodoDBResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            owner_id: todo.owner_id,
        }
    }
}

pub struct Todos<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Todos<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Get a todo by ID regardless of who owns it. Only used when read
    /// scoping is disabled in the configuration.
    #[instrument(skip(self), err)]
    pub async fn get_any(&mut self, id: TodoId) -> Result<Option<TodoDBResponse>> {
        let todo = sqlx::query_as::<_, Todo>("SELECT id, title, description, completed, owner_id FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(todo.map(Into::into))
    }

    /// List every todo regardless of owner. Only used when read scoping is
    /// disabled in the configuration.
    #[instrument(skip(self), err)]
    pub async fn list_all(&mut self) -> Result<Vec<TodoDBResponse>> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, title, description, completed, owner_id FROM todos ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(todos.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Todos<'c> {
    type CreateRequest = TodoCreateDBRequest;
    type UpdateRequest = TodoUpdateDBRequest;
    type Response = TodoDBResponse;
    type Id = TodoId;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, owner: UserId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, completed, owner_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, completed, owner_id
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.completed)
        .bind(owner)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(todo.into())
    }

    #[instrument(skip(self), err)]
    async fn get(&mut self, owner: UserId, id: Self::Id) -> Result<Option<Self::Response>> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed, owner_id FROM todos WHERE id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(todo.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self, owner: UserId) -> Result<Vec<Self::Response>> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed, owner_id FROM todos WHERE owner_id = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(todos.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, owner: UserId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        // Ownership check and mutation in one statement, so a concurrent
        // owner change cannot slip between the two.
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = ?, description = ?, completed = ?
            WHERE id = ? AND owner_id = ?
            RETURNING id, title, description, completed, owner_id
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.completed)
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(todo.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, owner: UserId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{handlers::Users, models::users::UserCreateDBRequest};
    use sqlx::SqlitePool;

    async fn create_owner(pool: &SqlitePool, username: &str) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        users
            .create(&UserCreateDBRequest {
                username: username.to_string(),
                password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn create_request(title: &str) -> TodoCreateDBRequest {
        TodoCreateDBRequest {
            title: title.to_string(),
            description: Some("details".to_string()),
            completed: false,
        }
    }

    #[sqlx::test]
    async fn test_create_get_list(pool: SqlitePool) {
        let owner = create_owner(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Todos::new(&mut conn);

        let created = repo.create(owner, &create_request("write tests")).await.unwrap();
        assert_eq!(created.owner_id, owner);
        assert!(!created.completed);

        let fetched = repo.get(owner, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "write tests");

        let listed = repo.list(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[sqlx::test]
    async fn test_other_owner_cannot_see_or_touch(pool: SqlitePool) {
        let alice = create_owner(&pool, "alice").await;
        let bob = create_owner(&pool, "bob").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Todos::new(&mut conn);

        let todo = repo.create(alice, &create_request("private")).await.unwrap();

        assert!(repo.get(bob, todo.id).await.unwrap().is_none());
        assert!(repo.list(bob).await.unwrap().is_empty());

        let update = TodoUpdateDBRequest {
            title: "hijacked".to_string(),
            description: None,
            completed: true,
        };
        assert!(repo.update(bob, todo.id, &update).await.unwrap().is_none());
        assert!(!repo.delete(bob, todo.id).await.unwrap());

        // Still untouched for the real owner
        let fetched = repo.get(alice, todo.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "private");

        // But visible through the unscoped accessors
        assert!(repo.get_any(todo.id).await.unwrap().is_some());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[sqlx::test]
    async fn test_update_overwrites_fields_but_not_owner(pool: SqlitePool) {
        let owner = create_owner(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Todos::new(&mut conn);

        let todo = repo.create(owner, &create_request("draft")).await.unwrap();
        let update = TodoUpdateDBRequest {
            title: "final".to_string(),
            description: None,
            completed: true,
        };
        let updated = repo.update(owner, todo.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.title, "final");
        assert_eq!(updated.description, None);
        assert!(updated.completed);
        assert_eq!(updated.owner_id, owner);
    }

    #[sqlx::test]
    async fn test_delete_is_keyed_by_id(pool: SqlitePool) {
        let owner = create_owner(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Todos::new(&mut conn);

        let todo = repo.create(owner, &create_request("ephemeral")).await.unwrap();
        assert!(repo.delete(owner, todo.id).await.unwrap());
        // Second delete of the same id reports nothing removed
        assert!(!repo.delete(owner, todo.id).await.unwrap());
        assert!(repo.get(owner, todo.id).await.unwrap().is_none());
    }
}
