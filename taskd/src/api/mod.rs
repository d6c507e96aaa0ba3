//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! Routes fall into three groups: authentication (`/register/`, `/token`),
//! identity (`/users/me/`), and owner-gated todo CRUD (`/todos/`,
//! `/todos/{id}`). All endpoints carry OpenAPI annotations; the generated
//! document is served at `/api-docs/openapi.json`.

pub mod handlers;
pub mod models;
