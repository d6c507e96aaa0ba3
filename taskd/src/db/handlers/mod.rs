//! Repository implementations for database access.

pub mod repository;
pub mod todos;
pub mod users;

pub use repository::OwnedRepository;
pub use todos::Todos;
pub use users::Users;
