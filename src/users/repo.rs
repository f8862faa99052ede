use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserRow};
use crate::db::is_unique_violation;

#[derive(Debug, Error)]
pub enum InsertUserError {
    #[error("username already taken")]
    UsernameTaken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. The username uniqueness check is atomic with the write.
    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    /// Remove a user; only used to undo a signup that could not finish.
    async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_digest, image_url, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_digest, image_url, bio
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.password_digest.as_stored())
        .bind(&user.image_url)
        .bind(&user.bio)
        .fetch_one(&self.db)
        .await;

        match row {
            Ok(r) => Ok(r.into()),
            Err(e) if is_unique_violation(&e) => Err(InsertUserError::UsernameTaken),
            Err(e) => Err(anyhow::Error::new(e).context("insert user").into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_digest, image_url, bio
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_digest, image_url, bio
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("find user by username")?;
        Ok(row.map(User::from))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryUserStore;
