use eyre::{Result, WrapErr};
use sqlx::types::Uuid;
use sqlx::PgPool;

use crate::domain::auth::UserRecord;

#[cfg_attr(test, faux::create)]
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

// Every call checks a connection out of the pool for its own duration only.
#[cfg_attr(test, faux::methods)]
impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        UserRepository { pool }
    }

    pub async fn find_by_email(&self, email: String) -> Result<Option<UserRecord>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .wrap_err("Failed to acquire database connection")?;
        sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, created_at FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .wrap_err("Failed to look up user")
    }

    /// Returns `None` when the email is already taken.
    pub async fn insert_if_absent(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<Option<UserRecord>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .wrap_err("Failed to acquire database connection")?;
        sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&mut *conn)
        .await
        .wrap_err("Failed to create user")
    }
}

/// Repository double backed by a map, with the same email uniqueness as the table.
#[cfg(test)]
pub fn in_memory_user_repository() -> UserRepository {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    let users: Arc<Mutex<HashMap<String, UserRecord>>> = Arc::default();
    let mut repository = UserRepository::faux();

    let store = users.clone();
    faux::when!(repository.find_by_email)
        .then(move |email| Ok(store.lock().unwrap().get(&email).cloned()));

    let store = users.clone();
    faux::when!(repository.insert_if_absent).then(move |(name, email, password_hash)| {
        let mut users = store.lock().unwrap();
        if users.contains_key(&email) {
            return Ok(None);
        }
        let user = UserRecord {
            id: Uuid::new_v4(),
            name,
            email: email.clone(),
            password_hash,
            created_at: sqlx::types::chrono::Utc::now(),
        };
        users.insert(email, user.clone());
        Ok(Some(user))
    });

    repository
}
