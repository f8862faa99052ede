use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        extractors::{AuthUser, UNAUTHORIZED},
        session::Session,
    },
    error::ApiError,
    state::AppState,
    users::services,
};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", delete(logout))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/check_session", get(check_session))
}

#[instrument(skip(state, session, payload))]
pub async fn signup(
    State(state): State<AppState>,
    mut session: Session,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let user = match services::create(state.users.as_ref(), payload.into()).await {
        Ok(u) => u,
        Err(e) => {
            if let ApiError::Validation(errors) = &e {
                warn!(?errors, "signup rejected");
            }
            return Err(e);
        }
    };

    let cookie = match session.start(user.id).await {
        Ok(c) => c,
        Err(e) => {
            // signup is all-or-nothing
            if let Err(del) = state.users.delete(user.id).await {
                error!(error = %del, user_id = %user.id, "failed to roll back signup");
            }
            return Err(e.into());
        }
    };

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(PublicUser::from(user)),
    ))
}

#[instrument(skip(state))]
pub async fn check_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    match state.users.find_by_id(user_id).await? {
        Some(user) => Ok(Json(PublicUser::from(user))),
        None => {
            warn!(%user_id, "session points at a missing user");
            Err(ApiError::Unauthorized(UNAUTHORIZED))
        }
    }
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "login body rejected");
        ApiError::Unauthorized(INVALID_CREDENTIALS)
    })?;
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let Some(user) = services::authenticate(state.users.as_ref(), &username, &password).await?
    else {
        warn!(%username, "login rejected");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    };

    let cookie = session.start(user.id).await?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(([(SET_COOKIE, cookie)], Json(PublicUser::from(user))))
}

#[instrument(skip(session))]
pub async fn logout(mut session: Session) -> impl IntoResponse {
    if let Err(e) = session.end().await {
        error!(error = %e, "failed to delete session");
    }

    // always clear the cookie, even if there was no session
    let mut headers = HeaderMap::new();
    match session.clear_cookie() {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(e) => error!(error = %e, "failed to build session cookie"),
    }
    (StatusCode::NO_CONTENT, headers)
}
