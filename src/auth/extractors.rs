use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;
use uuid::Uuid;

use super::session::Session;
use crate::{error::ApiError, state::AppState};

pub const UNAUTHORIZED: &str = "Unauthorized";

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session::from_headers(&parts.headers, state))
    }
}

/// Resolves the session cookie to the signed-in user's ID, rejecting with
/// 401 before the handler (or its body extractor) runs.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_headers(&parts.headers, state);
        match session.current_user_id().await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => {
                warn!(uri = %parts.uri, "request without session");
                Err(ApiError::Unauthorized(UNAUTHORIZED))
            }
        }
    }
}
