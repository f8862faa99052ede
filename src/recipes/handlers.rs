use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument, warn};

use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

use super::{dto::CreateRecipeRequest, repo_types::Recipe, services};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = services::list_all(state.recipes.as_ref()).await?;
    debug!(%user_id, count = recipes.len(), "recipes listed");
    Ok(Json(recipes))
}

/// Session is checked before the body is looked at.
#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    match services::create(state.recipes.as_ref(), user_id, payload).await {
        Ok(recipe) => Ok((StatusCode::CREATED, Json(recipe))),
        Err(e) => {
            if let ApiError::Validation(errors) = &e {
                warn!(%user_id, ?errors, "recipe rejected");
            }
            Err(e)
        }
    }
}
