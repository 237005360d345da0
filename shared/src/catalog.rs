//! Food catalog
//!
//! Built-in foods, the load-time repair/merge rule, and the pure catalog
//! edits the application performs (add, remove, search).

use crate::models::{FoodItem, PLACEHOLDER_ICON};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// (id, name, icon, kcal, protein, fat, carbs) per 100 g
type BuiltinFood = (&'static str, &'static str, &'static str, f64, f64, f64, f64);

const BUILTIN_FOODS: &[BuiltinFood] = &[
    // Protein
    ("1", "Chicken breast", "🍗", 165.0, 31.0, 3.6, 0.0),
    ("2", "Egg (1 large)", "🥚", 78.0, 6.3, 5.3, 0.6),
    ("5", "Salmon", "🐟", 208.0, 20.0, 13.0, 0.0),
    ("8", "Lean beef", "🥩", 250.0, 26.0, 15.0, 0.0),
    ("9", "Shrimp", "🦐", 99.0, 20.0, 1.1, 0.2),
    ("10", "Tofu", "🥣", 81.0, 8.0, 4.8, 1.9),
    // Grains and staples
    ("7", "Steamed rice", "🍚", 130.0, 2.7, 0.3, 28.0),
    ("4", "Whole wheat bread", "🍞", 247.0, 13.0, 3.4, 41.0),
    ("11", "Buckwheat noodles", "🍜", 340.0, 13.0, 2.5, 70.0),
    ("12", "Sweet potato", "🍠", 86.0, 1.6, 0.1, 20.0),
    ("13", "Rolled oats", "🥣", 389.0, 16.9, 6.9, 66.0),
    ("14", "Pasta", "🍝", 158.0, 5.8, 0.9, 31.0),
    // Vegetables
    ("3", "Broccoli", "🥦", 34.0, 2.8, 0.4, 7.0),
    ("15", "Spinach", "🥗", 23.0, 2.9, 0.4, 3.6),
    ("16", "Carrot", "🥕", 41.0, 0.9, 0.2, 10.0),
    ("17", "Tomato", "🍅", 18.0, 0.9, 0.2, 3.9),
    ("18", "Lettuce salad", "🥗", 15.0, 1.4, 0.2, 2.9),
    // Fruit and nuts
    ("6", "Avocado", "🥑", 160.0, 2.0, 15.0, 9.0),
    ("19", "Apple", "🍎", 52.0, 0.3, 0.2, 14.0),
    ("20", "Banana", "🍌", 89.0, 1.1, 0.3, 23.0),
    ("21", "Mixed nuts", "🥜", 607.0, 20.0, 54.0, 21.0),
    ("22", "Blueberries", "🫐", 57.0, 0.7, 0.3, 14.0),
    // Drinks
    ("23", "Black coffee", "☕", 2.0, 0.1, 0.0, 0.0),
    ("24", "Green tea", "🍵", 1.0, 0.0, 0.0, 0.0),
    ("25", "Unsweetened soy milk", "🥛", 31.0, 3.3, 1.6, 1.2),
];

/// The catalog shipped with the application
pub fn builtin_catalog() -> Vec<FoodItem> {
    BUILTIN_FOODS
        .iter()
        .map(|&(id, name, icon, calories, protein, fat, carbs)| FoodItem {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            calories,
            protein,
            fat,
            carbs,
        })
        .collect()
}

/// Normalize a stored catalog against the built-in one
///
/// - duplicate ids keep their first occurrence
/// - built-in ids with an empty or placeholder icon get the built-in icon back
/// - built-in ids missing from the stored catalog are appended
///
/// User edits and user-added items are preserved. Idempotent.
pub fn repair_catalog(stored: Vec<FoodItem>, builtin: &[FoodItem]) -> Vec<FoodItem> {
    let mut seen = HashSet::new();
    let mut merged: Vec<FoodItem> = stored
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .map(|mut item| {
            if item.icon.is_empty() || item.icon == PLACEHOLDER_ICON {
                if let Some(reference) = builtin.iter().find(|b| b.id == item.id) {
                    item.icon = reference.icon.clone();
                }
            }
            item
        })
        .collect();

    for item in builtin {
        if seen.insert(item.id.clone()) {
            merged.push(item.clone());
        }
    }

    merged
}

/// A user-entered food before it receives an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FoodDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[validate(range(min = 0.0, max = 900.0))]
    pub calories: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub protein: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub fat: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub carbs: f64,
}

impl FoodDraft {
    /// Assign a freshly generated unique id
    pub fn into_food_item(self) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            icon: self.icon.unwrap_or_else(|| PLACEHOLDER_ICON.to_string()),
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        }
    }
}

/// Catalog with `item` appended
pub fn add_food(catalog: &[FoodItem], item: FoodItem) -> Vec<FoodItem> {
    let mut next = catalog.to_vec();
    next.push(item);
    next
}

/// Catalog without the item with `id`; historical logs stay untouched
pub fn remove_food(catalog: &[FoodItem], id: &str) -> Vec<FoodItem> {
    catalog.iter().filter(|f| f.id != id).cloned().collect()
}

/// Look up a food by id
pub fn find_food<'a>(catalog: &'a [FoodItem], id: &str) -> Option<&'a FoodItem> {
    catalog.iter().find(|f| f.id == id)
}

/// Case-insensitive substring match on the food name; empty query matches all
pub fn search_foods<'a>(catalog: &'a [FoodItem], query: &str) -> Vec<&'a FoodItem> {
    let query = query.trim().to_lowercase();
    catalog
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn food(id: &str, name: &str, icon: &str) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            calories: 100.0,
            protein: 10.0,
            fat: 5.0,
            carbs: 5.0,
        }
    }

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = builtin_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 25);
    }

    #[test]
    fn test_builtin_items_are_valid() {
        for item in builtin_catalog() {
            assert!(item.validate().is_ok(), "{} failed validation", item.name);
        }
    }

    #[test]
    fn test_merge_adds_new_builtin_and_keeps_user_edit() {
        let stored = vec![food("1", "My chicken", "🍗")];
        let builtin = vec![food("1", "Chicken breast", "🍗"), food("99", "New Food", "🆕")];

        let merged = repair_catalog(stored, &builtin);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.iter().filter(|f| f.id == "1").count(), 1);
        assert_eq!(find_food(&merged, "1").unwrap().name, "My chicken");
        assert_eq!(find_food(&merged, "99").unwrap().name, "New Food");
    }

    #[test]
    fn test_repair_restores_icons_for_builtin_ids_only() {
        let stored = vec![food("1", "Chicken", ""), food("u-1", "Mine", PLACEHOLDER_ICON)];
        let builtin = vec![food("1", "Chicken breast", "🍗")];

        let merged = repair_catalog(stored, &builtin);

        assert_eq!(find_food(&merged, "1").unwrap().icon, "🍗");
        assert_eq!(find_food(&merged, "u-1").unwrap().icon, PLACEHOLDER_ICON);
    }

    #[test]
    fn test_repair_drops_duplicate_ids() {
        let stored = vec![food("1", "First", "🍗"), food("1", "Second", "🍗")];
        let merged = repair_catalog(stored, &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "First");
    }

    #[test]
    fn test_repair_is_idempotent() {
        let stored = vec![food("1", "Chicken", ""), food("u-1", "Mine", "🍰")];
        let builtin = builtin_catalog();
        let once = repair_catalog(stored, &builtin);
        let twice = repair_catalog(once.clone(), &builtin);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_store_yields_builtin() {
        let builtin = builtin_catalog();
        assert_eq!(repair_catalog(Vec::new(), &builtin), builtin);
    }

    #[test]
    fn test_draft_gets_fresh_id() {
        let name: String = Word().fake();
        let draft = FoodDraft {
            name: name.clone(),
            icon: None,
            calories: 120.0,
            protein: 3.0,
            fat: 1.0,
            carbs: 25.0,
        };
        let a = draft.clone().into_food_item();
        let b = draft.into_food_item();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, name);
        assert_eq!(a.icon, PLACEHOLDER_ICON);
    }

    #[test]
    fn test_add_and_remove() {
        let catalog = builtin_catalog();
        let added = add_food(&catalog, food("u-9", "Granola", "🥣"));
        assert_eq!(added.len(), catalog.len() + 1);

        let removed = remove_food(&added, "u-9");
        assert_eq!(removed, catalog);

        // Unknown id is a no-op
        assert_eq!(remove_food(&catalog, "missing").len(), catalog.len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = builtin_catalog();
        let hits = search_foods(&catalog, "CHICKEN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
        assert_eq!(search_foods(&catalog, "").len(), catalog.len());
        assert!(search_foods(&catalog, "xyz-none").is_empty());
    }
}
