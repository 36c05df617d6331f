//! Recipe feasibility and ranking over the pantry contents.
//!
//! All functions here are pure over their inputs; pushing missing
//! ingredients onto the shopping list is a separate caller-invoked step.

use crate::catalog::Recipe;
use crate::matcher;
use crate::pantry::Ingredient;

/// Optional exact-match filters applied before feasibility.
#[derive(Debug, Default, Clone)]
pub struct RecipeFilters {
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
}

/// A recipe that survived filtering and feasibility, with the values the
/// ranking sorted on.
#[derive(Debug)]
pub struct RankedRecipe<'a> {
    pub recipe: &'a Recipe,
    pub matched: usize,
    pub total_time: u32,
}

fn has_match(required: &str, pantry: &[Ingredient]) -> bool {
    pantry
        .iter()
        .any(|item| matcher::matches(&item.name, required))
}

/// True iff every required ingredient has at least one pantry match under
/// the containment relation. An empty requirement list is vacuously
/// makeable.
pub fn is_makeable(recipe: &Recipe, pantry: &[Ingredient]) -> bool {
    recipe
        .ingredients
        .iter()
        .all(|required| has_match(required, pantry))
}

/// Required ingredients with no pantry match, recipe order preserved.
pub fn missing_ingredients(recipe: &Recipe, pantry: &[Ingredient]) -> Vec<String> {
    recipe
        .ingredients
        .iter()
        .filter(|required| !has_match(required, pantry))
        .cloned()
        .collect()
}

/// Count of required ingredients with at least one pantry match.
pub fn matched_count(recipe: &Recipe, pantry: &[Ingredient]) -> usize {
    recipe
        .ingredients
        .iter()
        .filter(|required| has_match(required, pantry))
        .count()
}

/// Filters by cuisine/meal type, keeps only makeable recipes, then sorts
/// by matched-ingredient count descending with ties broken by total time
/// ascending. The sort is stable, so remaining ties keep catalog order.
pub fn rank<'a>(
    recipes: &'a [Recipe],
    pantry: &[Ingredient],
    filters: &RecipeFilters,
) -> Vec<RankedRecipe<'a>> {
    let mut ranked: Vec<RankedRecipe<'a>> = recipes
        .iter()
        .filter(|recipe| {
            filters
                .cuisine
                .as_ref()
                .map_or(true, |cuisine| &recipe.cuisine == cuisine)
        })
        .filter(|recipe| {
            filters
                .meal_type
                .as_ref()
                .map_or(true, |meal_type| &recipe.meal_type == meal_type)
        })
        .filter(|recipe| is_makeable(recipe, pantry))
        .map(|recipe| RankedRecipe {
            recipe,
            matched: matched_count(recipe, pantry),
            total_time: recipe.total_time(),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.matched
            .cmp(&a.matched)
            .then(a.total_time.cmp(&b.total_time))
    });
    ranked
}
