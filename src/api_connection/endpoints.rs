use serde::Deserialize;

/// Recipe search endpoint.
pub const RECIPE_SEARCH_URL: &str = "https://api.edamam.com/api/recipes/v2";

/// Environment variable holding the application id credential.
pub const APP_ID_ENV_VAR: &str = "EDAMAM_APP_ID";
/// Environment variable holding the application key credential.
pub const APP_KEY_ENV_VAR: &str = "EDAMAM_APP_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeSearchResponse {
    #[serde(default)]
    pub hits: Vec<RecipeHit>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeHit {
    pub recipe: OnlineRecipe,
}

/// A recipe record as returned by the search endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct OnlineRecipe {
    pub label: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "yield", default)]
    pub servings: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(rename = "totalWeight", default)]
    pub total_weight: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}
