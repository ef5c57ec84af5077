use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::{DatabaseConfig, StoreBackend};
use crate::stores::{MemoryUserStore, SqliteUserStore, UserStore};

// this runs at boot time
pub async fn init_store(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match config.backend {
        StoreBackend::Sqlite => {
            let store = SqliteUserStore::connect(&config.url, config.max_connections)
                .await
                .context(format!("Failed to open user database at '{}'", config.url))?;

            info!(
                url = %config.url,
                max_connections = config.max_connections,
                "SQLite user store ready"
            );

            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory user store, data is lost on shutdown");
            Arc::new(MemoryUserStore::new())
        }
    };

    let users = store
        .count()
        .await
        .context("Failed to count users in store")?;

    info!(users = users, "User store initialized");

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::NewUser;

    #[tokio::test]
    async fn test_init_memory_store() {
        let config = DatabaseConfig {
            backend: StoreBackend::Memory,
            url: String::new(),
            max_connections: 1,
        };

        let store = init_store(&config).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_init_sqlite_store_creates_schema() {
        let config = DatabaseConfig {
            backend: StoreBackend::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };

        let store = init_store(&config).await.unwrap();
        let user = store
            .create(NewUser {
                email: "a@b.com".to_string(),
                password: "p".to_string(),
                username: "a".to_string(),
                is_active: true,
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_init_sqlite_store_bad_url() {
        let config = DatabaseConfig {
            backend: StoreBackend::Sqlite,
            url: "sqlite:///nonexistent-dir/deeper/users.db".to_string(),
            max_connections: 1,
        };

        assert!(init_store(&config).await.is_err());
    }
}
