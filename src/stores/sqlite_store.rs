use crate::models::user::{NewUser, User, UserChanges};
use crate::stores::{StoreError, UserStore};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::str::FromStr;
use tracing::debug;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1
    )
"#;

const USER_COLUMNS: &str = "id, email, username, password, is_active";

/// Relational user store backed by SQLite through a sqlx pool
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Open a pool on `url` and make sure the schema exists.
    ///
    /// In-memory databases only live as long as their connections, so for
    /// `:memory:` urls the pool keeps its connections open forever.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if url.contains(":memory:") {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;

        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the users table if it is missing
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        debug!("users table ready");
        Ok(())
    }
}

/// Unique violations become [`StoreError::Conflict`]; everything else stays a database error
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict("username".to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_many(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, username, password, is_active) \
             VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.email)
        .bind(user.username)
        .bind(user.password)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError> {
        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or(StoreError::NotFound(id));
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(email) = changes.email {
                fields.push("email = ").push_bind_unseparated(email);
            }
            if let Some(password) = changes.password {
                fields.push("password = ").push_bind_unseparated(password);
            }
            if let Some(username) = changes.username {
                fields.push("username = ").push_bind_unseparated(username);
            }
            if let Some(is_active) = changes.is_active {
                fields.push("is_active = ").push_bind_unseparated(is_active);
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {USER_COLUMNS}"));

        builder
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }
}
