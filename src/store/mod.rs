pub mod kv;

pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

/// Storage key for the pantry collection.
pub const INGREDIENTS_KEY: &str = "ingredients";
/// Storage key for the shopping list collection.
pub const SHOPPING_LIST_KEY: &str = "shoppingList";
