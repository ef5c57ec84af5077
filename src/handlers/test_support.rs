// Shared fixtures for handler tests

use crate::core::state::AppState;
use crate::models::user::{NewUser, User, UserChanges};
use crate::stores::{MemoryUserStore, StoreError, UserStore};
use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a memory store and counts every call made through the trait
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryUserStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.hit();
        self.inner.find_by_username(username).await
    }

    async fn find_many(&self) -> Result<Vec<User>, StoreError> {
        self.hit();
        self.inner.find_many().await
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.hit();
        self.inner.create(user).await
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError> {
        self.hit();
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.hit();
        self.inner.delete(id).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.hit();
        self.inner.count().await
    }
}

/// A store whose backend is always down
pub struct FailingStore;

fn backend_down() -> StoreError {
    StoreError::Database(sqlx::Error::PoolClosed)
}

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(backend_down())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(backend_down())
    }

    async fn find_many(&self) -> Result<Vec<User>, StoreError> {
        Err(backend_down())
    }

    async fn create(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(backend_down())
    }

    async fn update(&self, _id: i64, _changes: UserChanges) -> Result<User, StoreError> {
        Err(backend_down())
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Err(backend_down())
    }
}

pub fn create_test_state() -> (Arc<AppState>, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let state = AppState::new(store.clone());
    (Arc::new(state), store)
}

pub fn create_failing_state() -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(FailingStore)))
}

/// Insert a user directly, bypassing the counter
pub async fn seed_user(store: &CountingStore, username: &str, password: &str, is_active: bool) -> User {
    store
        .inner
        .create(NewUser {
            email: format!("{}@example.com", username),
            password: password.to_string(),
            username: username.to_string(),
            is_active,
        })
        .await
        .unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let (_, body) = response.into_parts();
    let bytes = Body::new(body).collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
