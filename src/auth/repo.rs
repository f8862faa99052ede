use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

/// Server-side session bindings, keyed by the SHA-256 of the cookie token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(
        &self,
        token_hash: &[u8],
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()>;
    /// Expired bindings read as absent.
    async fn lookup(&self, token_hash: &[u8]) -> anyhow::Result<Option<Uuid>>;
    /// Deleting a missing binding is not an error.
    async fn delete(&self, token_hash: &[u8]) -> anyhow::Result<()>;
    /// Drop every expired binding, returning how many went.
    async fn delete_expired(&self) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(
        &self,
        token_hash: &[u8],
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.db)
        .await
        .context("insert session")?;
        Ok(())
    }

    async fn lookup(&self, token_hash: &[u8]) -> anyhow::Result<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM sessions
            WHERE session_hash = $1
              AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.db)
        .await
        .context("lookup session")?;
        Ok(user_id)
    }

    async fn delete(&self, token_hash: &[u8]) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE session_hash = $1")
            .bind(token_hash)
            .execute(&self.db)
            .await
            .context("delete session")?;
        Ok(())
    }

    async fn delete_expired(&self) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.db)
            .await
            .context("delete expired sessions")?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
pub use memory::MemorySessionStore;
