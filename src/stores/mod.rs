pub mod memory_store;
pub mod sqlite_store;

use crate::models::user::{NewUser, User, UserChanges};
use async_trait::async_trait;
use thiserror::Error;

pub use memory_store::MemoryUserStore;
pub use sqlite_store::SqliteUserStore;

/// Failures reported by a [`UserStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user {0} does not exist")]
    NotFound(i64),

    #[error("{0} is not a valid user id")]
    InvalidId(String),

    #[error("unique constraint violated on {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence contract consumed by the request handlers.
///
/// `id` and `username` are unique; the store is the only place that enforces
/// it. Every method is a single atomic operation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// All users, ascending by id
    async fn find_many(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a user and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Apply a non-empty change set. Unknown ids yield [`StoreError::NotFound`].
    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError>;

    /// Unknown ids yield [`StoreError::NotFound`]
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Number of stored users, used for startup logging
    async fn count(&self) -> Result<usize, StoreError>;
}
