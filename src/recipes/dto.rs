use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub minutes_to_complete: Option<i32>,
}
