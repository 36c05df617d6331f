//! The pantry: the user's persisted collection of owned ingredients.
//!
//! Every mutation rewrites the whole collection under the
//! `"ingredients"` key; there is no incremental persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::matcher;
use crate::store::{KeyValueStore, INGREDIENTS_KEY};

/// A pantry entry. Quantities are stored as decimal-parseable strings,
/// exactly as the user typed them, and parsed on use.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

/// User-entered fields for a new or updated entry, before validation.
#[derive(Debug, Clone)]
pub struct IngredientDraft {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub expiration_date: Option<NaiveDate>,
}

impl IngredientDraft {
    /// Trims fields, rejects blank name/quantity and defaults a blank
    /// unit to "units".
    fn validated(self) -> Result<Self, StoreError> {
        let name = self.name.trim().to_string();
        let quantity = self.quantity.trim().to_string();
        if name.is_empty() || quantity.is_empty() {
            return Err(StoreError::Validation(
                "please enter both ingredient name and quantity".to_string(),
            ));
        }
        let unit = match self.unit.trim() {
            "" => "units".to_string(),
            trimmed => trimmed.to_string(),
        };
        Ok(Self {
            name,
            quantity,
            unit,
            category: self.category.trim().to_string(),
            expiration_date: self.expiration_date,
        })
    }
}

/// Result of an `add`: either the entry went straight in, or an existing
/// entry with a matching name was found and the caller must choose between
/// `add_new` and `combine_into`. The draft is handed back unchanged so the
/// caller can resubmit it.
#[derive(Debug)]
pub enum AddOutcome {
    Added(Ingredient),
    SimilarFound {
        existing: Ingredient,
        draft: IngredientDraft,
    },
}

/// Parses a quantity string the way the entry form treats it: the longest
/// leading decimal prefix counts ("2 cups" parses as 2), anything without
/// a numeric prefix is invalid.
pub fn parse_quantity(raw: &str) -> Result<f64, StoreError> {
    let trimmed = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => end = idx + 1,
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return Err(StoreError::Validation(format!(
            "quantity '{}' is not a number",
            raw
        )));
    }
    trimmed[..end]
        .parse::<f64>()
        .map_err(|_| StoreError::Validation(format!("quantity '{}' is not a number", raw)))
}

fn format_quantity(value: f64) -> String {
    format!("{}", value)
}

/// Owned pantry store. Loaded once and injected into each consumer, so
/// every view observes the same state without manual reloads.
#[derive(Debug)]
pub struct Pantry<S: KeyValueStore> {
    store: S,
    items: Vec<Ingredient>,
}

impl<S: KeyValueStore> Pantry<S> {
    /// Loads the collection from storage. A missing key is an empty pantry.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let items = match store.get(INGREDIENTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { store, items })
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.items.iter().find(|item| item.id == id)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        self.store.set(INGREDIENTS_KEY, &raw)
    }

    fn insert(&mut self, draft: IngredientDraft) -> Result<Ingredient, StoreError> {
        let item = Ingredient {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            expiration_date: draft.expiration_date,
        };
        self.items.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Adds an ingredient, first checking for an existing entry with a
    /// matching name. Matching is the bidirectional containment relation
    /// and the first match in store iteration order wins; when one is
    /// found nothing is written and the caller decides.
    pub fn add(&mut self, draft: IngredientDraft) -> Result<AddOutcome, StoreError> {
        let draft = draft.validated()?;
        if let Some(existing) = self
            .items
            .iter()
            .find(|item| matcher::matches(&item.name, &draft.name))
        {
            return Ok(AddOutcome::SimilarFound {
                existing: existing.clone(),
                draft,
            });
        }
        Ok(AddOutcome::Added(self.insert(draft)?))
    }

    /// Adds the draft as a distinct entry even if a similar name exists.
    pub fn add_new(&mut self, draft: IngredientDraft) -> Result<Ingredient, StoreError> {
        let draft = draft.validated()?;
        self.insert(draft)
    }

    /// Folds the draft's quantity into an existing entry. The existing
    /// entry keeps its id, name, unit, category and expiration; quantities
    /// are summed even when the units differ.
    pub fn combine_into(
        &mut self,
        existing_id: &str,
        draft: IngredientDraft,
    ) -> Result<Ingredient, StoreError> {
        let draft = draft.validated()?;
        let added = parse_quantity(&draft.quantity)?;
        let position = self
            .items
            .iter()
            .position(|item| item.id == existing_id)
            .ok_or_else(|| StoreError::NotFound(existing_id.to_string()))?;
        let current = parse_quantity(&self.items[position].quantity)?;
        self.items[position].quantity = format_quantity(current + added);
        let combined = self.items[position].clone();
        self.persist()?;
        Ok(combined)
    }

    /// Merges the selected entries into one new entry carrying the first
    /// selection's fields and a fresh id. Only members whose unit matches
    /// the first selection's unit (case-insensitively) contribute to the
    /// summed quantity; the rest are dropped from the sum.
    pub fn combine_many(&mut self, ids: &[String]) -> Result<Ingredient, StoreError> {
        if ids.len() < 2 {
            return Err(StoreError::Validation(
                "select at least two ingredients to combine".to_string(),
            ));
        }
        // Selection follows store iteration order, not the order of `ids`.
        let selected: Vec<Ingredient> = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect();
        if selected.len() < 2 {
            return Err(StoreError::Validation(
                "select at least two ingredients to combine".to_string(),
            ));
        }
        let first = &selected[0];
        let mut total = 0.0;
        for item in &selected {
            if item.unit.eq_ignore_ascii_case(&first.unit) {
                total += parse_quantity(&item.quantity)?;
            }
        }
        let combined = Ingredient {
            id: Uuid::new_v4().to_string(),
            name: first.name.clone(),
            quantity: format_quantity(total),
            unit: first.unit.clone(),
            category: first.category.clone(),
            expiration_date: first.expiration_date,
        };
        self.items.retain(|item| !ids.contains(&item.id));
        self.items.push(combined.clone());
        self.persist()?;
        Ok(combined)
    }

    /// Replaces the mutable fields of an entry. The id never changes.
    pub fn update(&mut self, id: &str, fields: IngredientDraft) -> Result<Ingredient, StoreError> {
        let fields = fields.validated()?;
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let item = &mut self.items[position];
        item.name = fields.name;
        item.quantity = fields.quantity;
        item.unit = fields.unit;
        item.category = fields.category;
        item.expiration_date = fields.expiration_date;
        let updated = item.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Removes an entry by id. Unknown ids are a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.items.retain(|item| item.id != id);
        self.persist()
    }

    /// Case-insensitive substring filter on the entry name. One-directional,
    /// unlike the combine matcher: the query must appear in the name.
    pub fn search(&self, query: &str) -> Vec<&Ingredient> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact-match category filter.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Ingredient> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn draft(name: &str, quantity: &str, unit: &str) -> IngredientDraft {
        IngredientDraft {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            category: "Other".to_string(),
            expiration_date: None,
        }
    }

    fn pantry() -> Pantry<MemoryStore> {
        Pantry::load(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_add_without_similar_inserts() {
        let mut pantry = pantry();
        match pantry.add(draft("milk", "2", "cups")).unwrap() {
            AddOutcome::Added(item) => {
                assert_eq!(item.name, "milk");
                assert_eq!(item.quantity, "2");
            }
            other => panic!("expected Added, got {:?}", other),
        }
        assert_eq!(pantry.items().len(), 1);
    }

    #[test]
    fn test_add_reports_first_similar_entry() {
        let mut pantry = pantry();
        pantry.add_new(draft("whole milk", "1", "cups")).unwrap();
        pantry.add_new(draft("milk powder", "1", "cups")).unwrap();
        match pantry.add(draft("Milk", "3", "cups")).unwrap() {
            AddOutcome::SimilarFound { existing, .. } => {
                // First match in store iteration order, not best match.
                assert_eq!(existing.name, "whole milk");
            }
            other => panic!("expected SimilarFound, got {:?}", other),
        }
        // Nothing was written while the choice is pending.
        assert_eq!(pantry.items().len(), 2);
    }

    #[test]
    fn test_combine_on_add_sums_quantities_and_keeps_id() {
        let mut pantry = pantry();
        let existing = pantry.add_new(draft("milk", "2", "cups")).unwrap();
        let combined = match pantry.add(draft("Milk", "3", "cups")).unwrap() {
            AddOutcome::SimilarFound { existing, draft } => {
                pantry.combine_into(&existing.id, draft).unwrap()
            }
            other => panic!("expected SimilarFound, got {:?}", other),
        };
        assert_eq!(combined.quantity, "5");
        assert_eq!(combined.id, existing.id);
        assert_eq!(pantry.items().len(), 1);
    }

    #[test]
    fn test_combine_into_sums_across_mismatched_units() {
        // Known superficial behavior: single-entry combine does not
        // reconcile units.
        let mut pantry = pantry();
        let existing = pantry.add_new(draft("flour", "500", "g")).unwrap();
        let combined = pantry
            .combine_into(&existing.id, draft("flour", "2", "cups"))
            .unwrap();
        assert_eq!(combined.quantity, "502");
        assert_eq!(combined.unit, "g");
    }

    #[test]
    fn test_combine_many_drops_mismatched_units() {
        let mut pantry = pantry();
        let a = pantry.add_new(draft("sugar", "1", "cup")).unwrap();
        let b = pantry.add_new(draft("sugar", "2", "cup")).unwrap();
        let c = pantry.add_new(draft("sugar", "3", "tbsp")).unwrap();
        let ids = vec![a.id.clone(), b.id.clone(), c.id.clone()];
        let combined = pantry.combine_many(&ids).unwrap();
        assert_eq!(combined.quantity, "3"); // 1 + 2, tbsp entry dropped
        assert_eq!(combined.unit, "cup");
        assert_ne!(combined.id, a.id);
        assert_eq!(pantry.items().len(), 1);
    }

    #[test]
    fn test_combine_many_requires_two_selections() {
        let mut pantry = pantry();
        let a = pantry.add_new(draft("sugar", "1", "cup")).unwrap();
        let result = pantry.combine_many(&[a.id.clone()]);
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_combine_many_uses_store_order_not_selection_order() {
        let mut pantry = pantry();
        let a = pantry.add_new(draft("rice", "1", "cup")).unwrap();
        let b = pantry.add_new(draft("rice", "2", "kg")).unwrap();
        // Pass ids reversed; the first *stored* entry still wins.
        let combined = pantry
            .combine_many(&[b.id.clone(), a.id.clone()])
            .unwrap();
        assert_eq!(combined.unit, "cup");
        assert_eq!(combined.quantity, "1");
    }

    #[test]
    fn test_add_rejects_blank_name_or_quantity() {
        let mut pantry = pantry();
        assert!(matches!(
            pantry.add(draft("", "2", "cups")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            pantry.add(draft("milk", "   ", "cups")),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_unit_defaults_to_units() {
        let mut pantry = pantry();
        let item = pantry.add_new(draft("banana", "6", "  ")).unwrap();
        assert_eq!(item.unit, "units");
    }

    #[test]
    fn test_update_replaces_fields_and_errors_on_missing_id() {
        let mut pantry = pantry();
        let item = pantry.add_new(draft("milk", "2", "cups")).unwrap();
        let updated = pantry
            .update(&item.id, draft("oat milk", "1", "l"))
            .unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "oat milk");
        assert_eq!(updated.unit, "l");

        let missing = pantry.update("no-such-id", draft("x", "1", "y"));
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut pantry = pantry();
        pantry.add_new(draft("milk", "2", "cups")).unwrap();
        pantry.delete("no-such-id").unwrap();
        assert_eq!(pantry.items().len(), 1);
    }

    #[test]
    fn test_search_and_category_filter() {
        let mut pantry = pantry();
        pantry.add_new(draft("whole milk", "1", "l")).unwrap();
        let mut spinach = draft("spinach", "1", "bag");
        spinach.category = "Produce".to_string();
        pantry.add_new(spinach).unwrap();

        let hits = pantry.search("MILK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "whole milk");

        let produce = pantry.filter_by_category("Produce");
        assert_eq!(produce.len(), 1);
        assert_eq!(produce[0].name, "spinach");
    }

    #[test]
    fn test_parse_quantity_accepts_numeric_prefix() {
        assert_eq!(parse_quantity("2").unwrap(), 2.0);
        assert_eq!(parse_quantity(" 2.5 cups").unwrap(), 2.5);
        assert_eq!(parse_quantity("-1").unwrap(), -1.0);
        assert!(matches!(
            parse_quantity("a pinch"),
            Err(StoreError::Validation(_))
        ));
    }
}
