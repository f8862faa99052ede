use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewRecipe, Recipe};

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert(&self, recipe: NewRecipe) -> anyhow::Result<Recipe>;
    /// Every recipe, oldest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Recipe>>;
}

#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> anyhow::Result<Recipe> {
        let row = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, title, instructions, minutes_to_complete, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, instructions, minutes_to_complete, user_id
            "#,
        )
        .bind(recipe.id())
        .bind(recipe.title())
        .bind(recipe.instructions())
        .bind(recipe.minutes_to_complete())
        .bind(recipe.user_id())
        .fetch_one(&self.db)
        .await
        .context("insert recipe")?;
        Ok(row)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, instructions, minutes_to_complete, user_id
            FROM recipes
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list recipes")?;
        Ok(rows)
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: tokio::sync::RwLock<Vec<Recipe>>,
}

#[cfg(test)]
#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = Recipe::from(recipe);
        self.recipes.write().await.push(recipe.clone());
        Ok(recipe)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }
}
