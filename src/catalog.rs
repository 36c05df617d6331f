//! Read-only recipe catalog consumed by the planner.
//!
//! Recipes are reference data: never created or mutated by the user. A
//! built-in set ships with the crate and a catalog can be loaded from a
//! JSON file instead; consumers receive whichever as a plain slice.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Required ingredient names, in recipe order.
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine: String,
    pub meal_type: String,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cook_time: u32,
    pub difficulty: String,
    pub servings: u32,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }
}

/// Loads a catalog from a JSON file holding an array of recipes.
pub fn load_catalog(path: &Path) -> Result<Vec<Recipe>> {
    if !path.exists() {
        anyhow::bail!("Recipe catalog file not found at: {:?}", path);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe catalog at {:?}", path))?;
    let recipes: Vec<Recipe> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse recipe catalog at {:?}", path))?;
    Ok(recipes)
}

/// The catalog compiled into the binary.
pub fn builtin_catalog() -> Vec<Recipe> {
    fn recipe(
        id: &str,
        name: &str,
        ingredients: &[&str],
        instructions: &str,
        cuisine: &str,
        meal_type: &str,
        prep_time: u32,
        cook_time: u32,
        difficulty: &str,
        servings: u32,
    ) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.to_string(),
            cuisine: cuisine.to_string(),
            meal_type: meal_type.to_string(),
            prep_time,
            cook_time,
            difficulty: difficulty.to_string(),
            servings,
        }
    }

    vec![
        recipe(
            "1",
            "Cheesy Pasta",
            &["pasta", "butter", "parmesan", "garlic", "salt", "pepper"],
            "1. Cook pasta according to package instructions\n\
             2. Melt butter in a pan\n\
             3. Add minced garlic and cook until fragrant\n\
             4. Add cooked pasta and toss\n\
             5. Add parmesan, salt, and pepper\n\
             6. Stir until cheese is melted",
            "Italian",
            "Dinner",
            10,
            15,
            "Easy",
            2,
        ),
        recipe(
            "2",
            "Scrambled Eggs",
            &["eggs", "butter", "milk", "salt", "pepper"],
            "1. Whisk eggs with milk, salt, and pepper\n\
             2. Melt butter in a nonstick pan over low heat\n\
             3. Pour in eggs and stir gently until just set",
            "American",
            "Breakfast",
            5,
            5,
            "Easy",
            2,
        ),
        recipe(
            "3",
            "Chicken Stir Fry",
            &["chicken", "rice", "soy sauce", "garlic", "vegetables", "oil"],
            "1. Cook rice\n\
             2. Slice chicken and stir-fry in oil until cooked through\n\
             3. Add vegetables and garlic, cook until tender-crisp\n\
             4. Stir in soy sauce and serve over rice",
            "Chinese",
            "Dinner",
            15,
            15,
            "Medium",
            4,
        ),
        recipe(
            "4",
            "Garden Salad",
            &["lettuce", "tomato", "cucumber", "olive oil", "vinegar", "salt"],
            "1. Chop lettuce, tomato, and cucumber\n\
             2. Toss with olive oil, vinegar, and salt",
            "Mediterranean",
            "Lunch",
            10,
            0,
            "Easy",
            2,
        ),
        recipe(
            "5",
            "Beef Tacos",
            &["beef", "tortillas", "cheese", "lettuce", "tomato", "onion"],
            "1. Brown the beef with diced onion\n\
             2. Warm the tortillas\n\
             3. Fill tortillas with beef, cheese, lettuce, and tomato",
            "Mexican",
            "Dinner",
            10,
            15,
            "Easy",
            4,
        ),
        recipe(
            "6",
            "Banana Pancakes",
            &["flour", "milk", "eggs", "banana", "sugar", "butter"],
            "1. Mash the banana and whisk with milk and eggs\n\
             2. Fold in flour and sugar\n\
             3. Cook spoonfuls in butter until golden on both sides",
            "American",
            "Breakfast",
            10,
            10,
            "Easy",
            3,
        ),
        recipe(
            "7",
            "Tomato Soup",
            &["tomato", "onion", "garlic", "cream", "salt", "pepper"],
            "1. Soften onion and garlic in a pot\n\
             2. Add chopped tomatoes and simmer 20 minutes\n\
             3. Blend, stir in cream, season and serve",
            "American",
            "Lunch",
            10,
            25,
            "Easy",
            4,
        ),
        recipe(
            "8",
            "Vegetable Curry",
            &["vegetables", "rice", "curry powder", "onion", "garlic", "cream"],
            "1. Soften onion and garlic\n\
             2. Add curry powder and vegetables, cook 5 minutes\n\
             3. Stir in cream and simmer until tender\n\
             4. Serve over rice",
            "Indian",
            "Dinner",
            15,
            25,
            "Medium",
            4,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_ids_are_unique() {
        let catalog = builtin_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_load_catalog_from_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let json = serde_json::to_string(&builtin_catalog())?;
        file.write_all(json.as_bytes())?;
        file.flush()?;

        let loaded = load_catalog(file.path())?;
        assert_eq!(loaded.len(), builtin_catalog().len());
        assert_eq!(loaded[0].name, "Cheesy Pasta");
        assert_eq!(loaded[0].total_time(), 25);
        Ok(())
    }

    #[test]
    fn test_load_catalog_file_not_found() {
        let result = load_catalog(Path::new("this_catalog_does_not_exist.json"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Recipe catalog file not found"));
    }

    #[test]
    fn test_load_catalog_rejects_malformed_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"{ not json")?;
        file.flush()?;
        assert!(load_catalog(file.path()).is_err());
        Ok(())
    }
}
