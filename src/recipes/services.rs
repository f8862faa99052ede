use tracing::info;
use uuid::Uuid;

use super::{
    dto::CreateRecipeRequest,
    repo::RecipeStore,
    repo_types::{NewRecipe, Recipe},
};
use crate::error::ApiError;

/// Validate and store a recipe owned by `owner_id`. Nothing is written when
/// validation fails.
pub async fn create(
    recipes: &dyn RecipeStore,
    owner_id: Uuid,
    body: CreateRecipeRequest,
) -> Result<Recipe, ApiError> {
    let new_recipe = NewRecipe::new(
        owner_id,
        body.title.unwrap_or_default(),
        body.instructions.unwrap_or_default(),
        body.minutes_to_complete,
    )?;
    let recipe = recipes.insert(new_recipe).await?;
    info!(recipe_id = %recipe.id, user_id = %owner_id, "recipe created");
    Ok(recipe)
}

pub async fn list_all(recipes: &dyn RecipeStore) -> anyhow::Result<Vec<Recipe>> {
    recipes.list_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::repo::MemoryRecipeStore;

    fn body(title: &str, instructions: String, minutes: Option<i32>) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: Some(title.into()),
            instructions: Some(instructions),
            minutes_to_complete: minutes,
        }
    }

    #[tokio::test]
    async fn create_assigns_owner_and_lists_in_order() {
        let store = MemoryRecipeStore::default();
        let owner = Uuid::new_v4();

        let first = create(&store, owner, body("Recipe 1", "A".repeat(60), Some(10)))
            .await
            .unwrap();
        let second = create(&store, owner, body("Recipe 2", "B".repeat(50), None))
            .await
            .unwrap();
        assert_eq!(first.user_id, owner);

        let all = list_all(&store).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(all[0].title, "Recipe 1");
        assert_eq!(all[0].minutes_to_complete, Some(10));
    }

    #[tokio::test]
    async fn invalid_recipe_is_not_written() {
        let store = MemoryRecipeStore::default();
        let err = create(&store, Uuid::new_v4(), body("", "short".into(), Some(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref errors) if errors.len() == 2));
        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let store = MemoryRecipeStore::default();
        let empty = CreateRecipeRequest {
            title: None,
            instructions: None,
            minutes_to_complete: None,
        };
        let err = create(&store, Uuid::new_v4(), empty).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
