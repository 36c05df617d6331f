use anyhow::{Context, Result};
use std::path::Path;

use pantry_tracker::api_connection::RecipeSearchClient;
use pantry_tracker::catalog::{builtin_catalog, load_catalog, Recipe};
use pantry_tracker::cli::{parse_args, Cli, Command, PantryAction, ShoppingAction};
use pantry_tracker::matcher;
use pantry_tracker::pantry::{AddOutcome, Ingredient, IngredientDraft, Pantry};
use pantry_tracker::planner::{self, RecipeFilters};
use pantry_tracker::shopping::{PromoteOutcome, ShoppingItemDraft, ShoppingList};
use pantry_tracker::store::JsonFileStore;

fn open_pantry(data_dir: &str) -> Result<Pantry<JsonFileStore>> {
    let store = JsonFileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory '{}'", data_dir))?;
    Pantry::load(store).context("Failed to load the pantry")
}

fn open_shopping_list(data_dir: &str) -> Result<ShoppingList<JsonFileStore>> {
    let store = JsonFileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory '{}'", data_dir))?;
    ShoppingList::load(store).context("Failed to load the shopping list")
}

fn resolve_catalog(catalog_path: Option<&str>) -> Result<Vec<Recipe>> {
    match catalog_path {
        Some(path) => load_catalog(Path::new(path)),
        None => Ok(builtin_catalog()),
    }
}

fn print_ingredient(item: &Ingredient) {
    let expires = match item.expiration_date {
        Some(date) => format!("  expires {}", date),
        None => String::new(),
    };
    println!(
        "{}  {} - {} {}  [{}]{}",
        item.id, item.name, item.quantity, item.unit, item.category, expires
    );
}

fn run_add(data_dir: &str, draft: IngredientDraft, combine: bool, as_new: bool) -> Result<()> {
    let mut pantry = open_pantry(data_dir)?;

    let suggestions: Vec<&str> = matcher::suggest(&draft.name, matcher::COMMON_INGREDIENTS)
        .into_iter()
        .filter(|s| !s.eq_ignore_ascii_case(&draft.name))
        .collect();
    if !suggestions.is_empty() {
        println!("Related names: {}", suggestions.join(", "));
    }

    let outcome = if as_new {
        AddOutcome::Added(pantry.add_new(draft)?)
    } else {
        pantry.add(draft)?
    };
    match outcome {
        AddOutcome::Added(item) => {
            println!("Added {} ({} {})", item.name, item.quantity, item.unit);
        }
        AddOutcome::SimilarFound { existing, draft } => {
            if combine {
                let merged = pantry.combine_into(&existing.id, draft)?;
                println!(
                    "Combined with existing {}: now {} {}",
                    merged.name, merged.quantity, merged.unit
                );
            } else {
                println!(
                    "Similar ingredient found: {} ({} {}, id {})",
                    existing.name, existing.quantity, existing.unit, existing.id
                );
                println!("Re-run with --combine to merge quantities, or --as-new to keep both.");
            }
        }
    }
    Ok(())
}

fn run_pantry(data_dir: &str, action: Option<PantryAction>) -> Result<()> {
    let mut pantry = open_pantry(data_dir)?;
    match action.unwrap_or(PantryAction::List {
        search: None,
        category: None,
    }) {
        PantryAction::List { search, category } => {
            let mut shown: Vec<&Ingredient> = match (&search, &category) {
                (Some(query), _) => pantry.search(query),
                (None, Some(category)) => pantry.filter_by_category(category),
                (None, None) => pantry.items().iter().collect(),
            };
            if let (Some(_), Some(category)) = (&search, &category) {
                shown.retain(|item| &item.category == category);
            }
            if shown.is_empty() {
                println!("Your pantry is empty");
            }
            for item in shown {
                print_ingredient(item);
            }
        }
        PantryAction::Remove { id } => {
            pantry.delete(&id)?;
            println!("Removed {}", id);
        }
        PantryAction::Combine { ids } => {
            let combined = pantry.combine_many(&ids)?;
            println!(
                "Combined into {} ({} {})",
                combined.name, combined.quantity, combined.unit
            );
        }
        PantryAction::Update {
            id,
            name,
            quantity,
            unit,
            category,
            expires,
        } => {
            let updated = pantry.update(
                &id,
                IngredientDraft {
                    name,
                    quantity,
                    unit,
                    category,
                    expiration_date: expires,
                },
            )?;
            println!("Updated {}", updated.name);
        }
    }
    Ok(())
}

fn run_shopping(data_dir: &str, action: Option<ShoppingAction>) -> Result<()> {
    let mut list = open_shopping_list(data_dir)?;
    match action.unwrap_or(ShoppingAction::List) {
        ShoppingAction::List => {
            if list.items().is_empty() {
                println!("Your shopping list is empty");
            }
            for item in list.items() {
                let mark = if item.is_checked { "x" } else { " " };
                println!(
                    "[{}] {}  {} - {} {}  [{}]",
                    mark, item.id, item.name, item.quantity, item.unit, item.category
                );
            }
        }
        ShoppingAction::Add {
            name,
            quantity,
            unit,
            category,
        } => {
            let item = list.add(ShoppingItemDraft {
                name,
                quantity,
                unit,
                category,
            })?;
            println!("Added {} to the shopping list", item.name);
        }
        ShoppingAction::Check { id } => {
            let item = list.toggle_checked(&id)?;
            let state = if item.is_checked { "checked" } else { "unchecked" };
            println!("{} is now {}", item.name, state);
        }
        ShoppingAction::Remove { id } => {
            list.delete(&id)?;
            println!("Removed {}", id);
        }
        ShoppingAction::Promote {
            id,
            combine,
            as_new,
        } => {
            let mut pantry = open_pantry(data_dir)?;
            match list.promote(&id, &mut pantry)? {
                PromoteOutcome::Promoted(ingredient) => {
                    println!("Moved {} into the pantry", ingredient.name);
                }
                PromoteOutcome::SimilarFound { existing, draft } => {
                    if combine {
                        let merged = pantry.combine_into(&existing.id, draft)?;
                        list.delete(&id)?;
                        println!(
                            "Combined with existing {}: now {} {}",
                            merged.name, merged.quantity, merged.unit
                        );
                    } else if as_new {
                        let added = pantry.add_new(draft)?;
                        list.delete(&id)?;
                        println!("Moved {} into the pantry as a new entry", added.name);
                    } else {
                        println!(
                            "Similar pantry entry found: {} ({} {}, id {})",
                            existing.name, existing.quantity, existing.unit, existing.id
                        );
                        println!(
                            "Re-run with --combine to merge quantities, or --as-new to keep both."
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn run_recipes(data_dir: &str, catalog_path: Option<&str>, search: Option<String>) -> Result<()> {
    let pantry = open_pantry(data_dir)?;
    let catalog = resolve_catalog(catalog_path)?;

    let shown: Vec<&Recipe> = match &search {
        Some(query) => {
            let needle = query.to_lowercase();
            catalog
                .iter()
                .filter(|recipe| {
                    recipe.name.to_lowercase().contains(&needle)
                        || recipe
                            .ingredients
                            .iter()
                            .any(|ing| ing.to_lowercase().contains(&needle))
                })
                .collect()
        }
        None => catalog.iter().collect(),
    };

    for recipe in shown {
        let missing = planner::missing_ingredients(recipe, pantry.items());
        println!(
            "\n{}  {} ({}, {})",
            recipe.id, recipe.name, recipe.cuisine, recipe.meal_type
        );
        println!(
            "  {} min  -  {}  -  serves {}",
            recipe.total_time(),
            recipe.difficulty,
            recipe.servings
        );
        println!("  Ingredients: {}", recipe.ingredients.join(", "));
        if missing.is_empty() {
            println!("  Can make!");
        } else {
            println!("  Missing: {}", missing.join(", "));
        }
    }
    Ok(())
}

fn run_dinner(
    data_dir: &str,
    catalog_path: Option<&str>,
    cuisine: Option<String>,
    meal_type: Option<String>,
    add_missing: Option<String>,
) -> Result<()> {
    let pantry = open_pantry(data_dir)?;
    let catalog = resolve_catalog(catalog_path)?;

    if let Some(recipe_id) = add_missing {
        let recipe = catalog
            .iter()
            .find(|recipe| recipe.id == recipe_id)
            .with_context(|| format!("No recipe with id '{}'", recipe_id))?;
        let missing = planner::missing_ingredients(recipe, pantry.items());
        if missing.is_empty() {
            println!("Nothing missing for {} - you can make it!", recipe.name);
            return Ok(());
        }
        let mut list = open_shopping_list(data_dir)?;
        let added = list.add_missing(&missing)?;
        println!(
            "Added {} missing ingredient(s) for {} to the shopping list:",
            added.len(),
            recipe.name
        );
        for item in added {
            println!("  {}", item.name);
        }
        return Ok(());
    }

    let filters = RecipeFilters { cuisine, meal_type };
    let ranked = planner::rank(&catalog, pantry.items(), &filters);
    if ranked.is_empty() {
        println!("Nothing makeable with your current pantry - try the shopping list.");
        return Ok(());
    }
    println!("Tonight's candidates:");
    for entry in ranked {
        println!(
            "  {}  {} - {} ingredient(s) on hand, {} min total",
            entry.recipe.id, entry.recipe.name, entry.matched, entry.total_time
        );
    }
    Ok(())
}

async fn run_online(data_dir: &str) -> Result<()> {
    let pantry = open_pantry(data_dir)?;
    if pantry.items().is_empty() {
        anyhow::bail!("Please add some ingredients to your pantry first");
    }
    let names: Vec<String> = pantry
        .items()
        .iter()
        .map(|item| item.name.clone())
        .collect();

    println!("Searching recipes for: {}", names.join(", "));
    let client = RecipeSearchClient::new();
    let recipes = client
        .search_by_ingredients(&names)
        .await
        .context("Remote recipe search failed")?;

    if recipes.is_empty() {
        println!("No recipes found");
        return Ok(());
    }
    for recipe in recipes {
        println!("\n{}  ({})", recipe.label, recipe.source);
        println!(
            "  Servings: {}  Calories: {}",
            recipe.servings,
            recipe.calories.round()
        );
        if !recipe.ingredients.is_empty() {
            println!("  Ingredients: {}", recipe.ingredients.join(", "));
        }
        if !recipe.url.is_empty() {
            println!("  {}", recipe.url);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Cli {
        data_dir,
        catalog,
        command,
    } = parse_args();

    match command {
        Command::Add {
            name,
            quantity,
            unit,
            category,
            expires,
            combine,
            as_new,
        } => {
            let draft = IngredientDraft {
                name,
                quantity,
                unit,
                category,
                expiration_date: expires,
            };
            run_add(&data_dir, draft, combine, as_new)
        }
        Command::Pantry { action } => run_pantry(&data_dir, action),
        Command::Shopping { action } => run_shopping(&data_dir, action),
        Command::Recipes { search } => run_recipes(&data_dir, catalog.as_deref(), search),
        Command::Dinner {
            cuisine,
            meal_type,
            add_missing,
        } => run_dinner(&data_dir, catalog.as_deref(), cuisine, meal_type, add_missing),
        Command::Online => run_online(&data_dir).await,
    }
}
