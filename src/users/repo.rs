use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User};

/// Why inserting a user failed.
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("email already registered")]
    EmailTaken,
    #[error("session id already claimed")]
    SessionTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Maps unique violations on `users` to the field that collided.
fn classify_insert_error(e: sqlx::Error) -> CreateUserError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some("users_session_id_key") => CreateUserError::SessionTaken,
                _ => CreateUserError::EmailTaken,
            };
        }
    }
    CreateUserError::Other(anyhow::Error::new(e).context("insert user"))
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Fails with `EmailTaken`/`SessionTaken` when a unique field is already in use.
    async fn create(&self, user: NewUser, session_id: &str) -> Result<User, CreateUserError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, user: NewUser, session_id: &str) -> Result<User, CreateUserError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, session_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(session_id)
        .fetch_one(&self.db)
        .await
        .map_err(classify_insert_error)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_id, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")
    }

    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_id, created_at
            FROM users
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await
        .context("find user by session")
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_id, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")
    }
}
