//! Cookie-backed server-side sessions.

use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use super::repo::SessionStore;
use crate::{config::SessionConfig, state::AppState};

/// Session context for a single request: the client's token (if it sent one)
/// and the store that resolves it.
pub struct Session {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
    token: Option<String>,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap, state: &AppState) -> Self {
        let config = state.config.session.clone();
        let token = extract_session_token(headers, &config.cookie_name);
        Self {
            store: state.sessions.clone(),
            config,
            token,
        }
    }

    pub async fn current_user_id(&self) -> anyhow::Result<Option<Uuid>> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };
        self.store.lookup(&hash_session_token(token)).await
    }

    /// Bind a fresh token to `user_id`, dropping whatever token the client
    /// presented and any bindings that have already expired. Returns the
    /// `Set-Cookie` value carrying the new token.
    pub async fn start(&mut self, user_id: Uuid) -> anyhow::Result<HeaderValue> {
        if let Some(old) = self.token.take() {
            self.store.delete(&hash_session_token(&old)).await?;
        }
        match self.store.delete_expired().await {
            Ok(0) => {}
            Ok(purged) => debug!(purged, "expired sessions removed"),
            Err(e) => warn!(error = %e, "failed to purge expired sessions"),
        }
        let token = generate_session_token();
        let expires_at = OffsetDateTime::now_utc() + Duration::minutes(self.config.ttl_minutes);
        self.store
            .insert(&hash_session_token(&token), user_id, expires_at)
            .await?;
        debug!(%user_id, "session started");
        let cookie = session_cookie(&self.config, &token)?;
        self.token = Some(token);
        Ok(cookie)
    }

    /// Idempotent; a request without a session ends successfully too.
    pub async fn end(&mut self) -> anyhow::Result<()> {
        if let Some(token) = self.token.take() {
            self.store.delete(&hash_session_token(&token)).await?;
            debug!("session ended");
        }
        Ok(())
    }

    pub fn clear_cookie(&self) -> anyhow::Result<HeaderValue> {
        clear_session_cookie(&self.config)
    }
}

/// 32 random bytes, hex encoded.
pub(crate) fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Only the hash is stored; raw tokens never reach the database.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}

fn session_cookie(config: &SessionConfig, token: &str) -> anyhow::Result<HeaderValue> {
    let max_age = config.ttl_minutes * 60;
    let mut cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        config.cookie_name
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    Ok(HeaderValue::from_str(&cookie)?)
}

fn clear_session_cookie(config: &SessionConfig) -> anyhow::Result<HeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    Ok(HeaderValue::from_str(&cookie)?)
}

fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            let val = val.trim();
            if key.trim() == cookie_name && !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}
