use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;

pub const MIN_INSTRUCTIONS_LEN: usize = 50;
pub const TITLE_BLANK: &str = "Title can't be blank";
pub const INSTRUCTIONS_TOO_SHORT: &str = "Instructions must be at least 50 characters long";

/// Recipe record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user_id: Uuid,
}

/// A recipe that has passed validation and may be written.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    id: Uuid,
    user_id: Uuid,
    title: String,
    instructions: String,
    minutes_to_complete: Option<i32>,
}

impl NewRecipe {
    /// Checks every field up front and reports all failures together.
    pub fn new(
        user_id: Uuid,
        title: String,
        instructions: String,
        minutes_to_complete: Option<i32>,
    ) -> Result<Self, ApiError> {
        let mut errors = Vec::new();
        if title.trim().is_empty() {
            errors.push(TITLE_BLANK.to_string());
        }
        // characters, not bytes
        if instructions.chars().count() < MIN_INSTRUCTIONS_LEN {
            errors.push(INSTRUCTIONS_TOO_SHORT.to_string());
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            instructions,
            minutes_to_complete,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn minutes_to_complete(&self) -> Option<i32> {
        self.minutes_to_complete
    }
}

impl From<NewRecipe> for Recipe {
    fn from(n: NewRecipe) -> Self {
        Self {
            id: n.id,
            title: n.title,
            instructions: n.instructions,
            minutes_to_complete: n.minutes_to_complete,
            user_id: n.user_id,
        }
    }
}
