pub mod connection;
pub mod endpoints;

pub use connection::{RecipeApiError, RecipeSearchClient};
pub use endpoints::OnlineRecipe;
