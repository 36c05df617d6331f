//! Shopping list store, including promotion of items into the pantry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::pantry::{AddOutcome, IngredientDraft, Pantry};
use crate::store::{KeyValueStore, SHOPPING_LIST_KEY};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
    pub is_checked: bool,
}

/// User-entered fields for a new shopping-list item.
#[derive(Debug, Clone)]
pub struct ShoppingItemDraft {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
}

impl ShoppingItemDraft {
    fn validated(self) -> Result<Self, StoreError> {
        let name = self.name.trim().to_string();
        let quantity = self.quantity.trim().to_string();
        if name.is_empty() || quantity.is_empty() {
            return Err(StoreError::Validation(
                "please enter both item name and quantity".to_string(),
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
        })
    }
}

/// Outcome of promoting an item into the pantry. On `Promoted` the source
/// item has already been removed from the list; on `SimilarFound` nothing
/// has been written anywhere and the caller resolves the conflict through
/// the pantry, then deletes the item explicitly.
#[derive(Debug)]
pub enum PromoteOutcome {
    Promoted(crate::pantry::Ingredient),
    SimilarFound {
        existing: crate::pantry::Ingredient,
        draft: IngredientDraft,
    },
}

#[derive(Debug)]
pub struct ShoppingList<S: KeyValueStore> {
    store: S,
    items: Vec<ShoppingListItem>,
}

impl<S: KeyValueStore> ShoppingList<S> {
    pub fn load(store: S) -> Result<Self, StoreError> {
        let items = match store.get(SHOPPING_LIST_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { store, items })
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        self.store.set(SHOPPING_LIST_KEY, &raw)
    }

    pub fn add(&mut self, draft: ShoppingItemDraft) -> Result<ShoppingListItem, StoreError> {
        let draft = draft.validated()?;
        let item = ShoppingListItem {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            is_checked: false,
        };
        self.items.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Queues one unchecked item per missing recipe ingredient. Callers
    /// invoke this explicitly after inspecting a recipe; ranking never
    /// writes to the list on its own.
    pub fn add_missing(&mut self, names: &[String]) -> Result<Vec<ShoppingListItem>, StoreError> {
        let mut added = Vec::with_capacity(names.len());
        for name in names {
            added.push(self.add(ShoppingItemDraft {
                name: name.clone(),
                quantity: "1".to_string(),
                unit: String::new(),
                category: "Other".to_string(),
            })?);
        }
        Ok(added)
    }

    pub fn toggle_checked(&mut self, id: &str) -> Result<ShoppingListItem, StoreError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.items[position].is_checked = !self.items[position].is_checked;
        let toggled = self.items[position].clone();
        self.persist()?;
        Ok(toggled)
    }

    /// Removes an item by id. Unknown ids are a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.items.retain(|item| item.id != id);
        self.persist()
    }

    /// Moves an item into the pantry with a null expiration date,
    /// following the pantry's add semantics including the similar-item
    /// choice. The pantry write happens first; if it fails the list is
    /// untouched. A list write failure after a successful pantry write is
    /// surfaced without rollback.
    pub fn promote<P: KeyValueStore>(
        &mut self,
        id: &str,
        pantry: &mut Pantry<P>,
    ) -> Result<PromoteOutcome, StoreError> {
        let item = self
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let draft = IngredientDraft {
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            category: item.category,
            expiration_date: None,
        };
        match pantry.add(draft)? {
            AddOutcome::Added(ingredient) => {
                self.delete(id)?;
                Ok(PromoteOutcome::Promoted(ingredient))
            }
            AddOutcome::SimilarFound { existing, draft } => {
                Ok(PromoteOutcome::SimilarFound { existing, draft })
            }
        }
    }
}
