use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{
    OnlineRecipe, RecipeSearchResponse, APP_ID_ENV_VAR, APP_KEY_ENV_VAR, RECIPE_SEARCH_URL,
};

#[derive(Debug)]
pub enum RecipeApiError {
    MissingCredential(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for RecipeApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeApiError::MissingCredential(key_name) => {
                write!(f, "API credential not found in environment: {}", key_name)
            }
            RecipeApiError::NetworkError(err) => write!(f, "Network error: {}", err),
            RecipeApiError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            RecipeApiError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for RecipeApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecipeApiError::NetworkError(err) => Some(err),
            RecipeApiError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RecipeApiError {
    fn from(err: reqwest::Error) -> Self {
        RecipeApiError::NetworkError(err)
    }
}

impl From<serde_json::Error> for RecipeApiError {
    fn from(err: serde_json::Error) -> Self {
        RecipeApiError::SerializationError(err)
    }
}

/// Client for the remote recipe search. Credentials are read from the
/// environment on each call so a missing key is reported per request
/// rather than at startup.
#[derive(Debug, Default)]
pub struct RecipeSearchClient {
    client: Client,
}

impl RecipeSearchClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Searches for recipes matching a comma-joined ingredient list.
    pub async fn search_by_ingredients(
        &self,
        ingredient_names: &[String],
    ) -> Result<Vec<OnlineRecipe>, RecipeApiError> {
        dotenv().ok();
        let app_id = env::var(APP_ID_ENV_VAR)
            .map_err(|_| RecipeApiError::MissingCredential(APP_ID_ENV_VAR.to_string()))?;
        let app_key = env::var(APP_KEY_ENV_VAR)
            .map_err(|_| RecipeApiError::MissingCredential(APP_KEY_ENV_VAR.to_string()))?;

        let query = ingredient_names.join(",");
        tracing::debug!(%query, "requesting recipe search");

        let response = self
            .client
            .get(RECIPE_SEARCH_URL)
            .query(&[
                ("type", "public"),
                ("q", query.as_str()),
                ("app_id", app_id.as_str()),
                ("app_key", app_key.as_str()),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let parsed = response.json::<RecipeSearchResponse>().await?;
            Ok(parsed.hits.into_iter().map(|hit| hit.recipe).collect())
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(RecipeApiError::ApiError { status, error_body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes_expected_shape() {
        let payload = r#"{
            "hits": [
                {
                    "recipe": {
                        "label": "Garlic Butter Pasta",
                        "image": "https://example.com/p.jpg",
                        "source": "Example Kitchen",
                        "url": "https://example.com/pasta",
                        "yield": 4,
                        "calories": 1200.5,
                        "totalWeight": 800.0,
                        "ingredients": ["pasta", "butter", "garlic"]
                    }
                }
            ]
        }"#;
        let parsed: RecipeSearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.hits.len(), 1);
        let recipe = &parsed.hits[0].recipe;
        assert_eq!(recipe.label, "Garlic Butter Pasta");
        assert_eq!(recipe.servings, 4.0);
        assert_eq!(recipe.ingredients.len(), 3);
    }

    #[test]
    fn test_search_response_tolerates_missing_optional_fields() {
        let payload = r#"{ "hits": [ { "recipe": { "label": "Bare" } } ] }"#;
        let parsed: RecipeSearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.hits[0].recipe.label, "Bare");
        assert!(parsed.hits[0].recipe.ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_error() {
        // Guarantee the variables are absent for this process.
        env::remove_var(APP_ID_ENV_VAR);
        env::remove_var(APP_KEY_ENV_VAR);
        let client = RecipeSearchClient::new();
        let result = client
            .search_by_ingredients(&["milk".to_string()])
            .await;
        assert!(matches!(result, Err(RecipeApiError::MissingCredential(_))));
    }
}
