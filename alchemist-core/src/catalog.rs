//! The fixed recipe catalog.
//!
//! The built-in catalog is loaded from `data/recipes.json` at compile time and
//! parsed once on first use. Catalogs are never mutated after construction.

use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, LazyLock};

use crate::error::CatalogError;
use crate::matcher::{ingredients_overlap, normalize};
use crate::types::RecipeRecord;

/// The raw JSON structure for the catalog data file.
#[derive(Deserialize)]
struct CatalogData {
    #[serde(default)]
    ingredient_groups: BTreeMap<String, Vec<String>>,
    recipes: Vec<RecipeRecord>,
}

static BUILTIN: LazyLock<Arc<RecipeCatalog>> = LazyLock::new(|| {
    let json = include_str!("../data/recipes.json");
    Arc::new(RecipeCatalog::from_json(json).expect("Failed to parse recipes.json"))
});

/// An immutable, ordered set of recipes.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<RecipeRecord>,
    ingredient_groups: BTreeMap<String, Vec<String>>,
}

impl RecipeCatalog {
    /// Build a catalog, rejecting incomplete records and duplicate ids.
    pub fn new(recipes: Vec<RecipeRecord>) -> Result<Self, CatalogError> {
        Self::with_groups(recipes, BTreeMap::new())
    }

    fn with_groups(
        recipes: Vec<RecipeRecord>,
        ingredient_groups: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, CatalogError> {
        {
            let mut seen = HashSet::new();
            for recipe in &recipes {
                if !recipe.is_complete() {
                    return Err(CatalogError::IncompleteRecipe(recipe.id.clone()));
                }
                if !seen.insert(recipe.id.as_str()) {
                    return Err(CatalogError::DuplicateId(recipe.id.clone()));
                }
            }
        }

        Ok(Self {
            recipes,
            ingredient_groups,
        })
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::with_groups(data.recipes, data.ingredient_groups)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Arc<RecipeCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&RecipeRecord> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// All recipes in insertion order.
    pub fn list_all(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every ingredient in the catalog, de-duplicated and sorted.
    ///
    /// Duplicates are detected ignoring case; the first spelling wins. Sorting
    /// is case-insensitive with a byte-order tiebreak.
    pub fn all_ingredients(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out: Vec<String> = Vec::new();

        for ingredient in self.recipes.iter().flat_map(|r| r.ingredients.iter()) {
            let trimmed = ingredient.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(normalize(trimmed)) {
                out.push(trimmed.to_string());
            }
        }

        out.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        out
    }

    /// Ingredient names grouped by kind (vegetables, meat, seasonings...).
    pub fn ingredient_groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.ingredient_groups
    }

    /// Recipes tagged with `category` (case-insensitive).
    pub fn by_category(&self, category: &str) -> Vec<&RecipeRecord> {
        let wanted = normalize(category);
        self.recipes
            .iter()
            .filter(|r| r.category.iter().any(|c| normalize(c) == wanted))
            .collect()
    }

    /// Recipes sharing at least one ingredient with the selection.
    pub fn search(&self, selected: &[String]) -> Vec<&RecipeRecord> {
        if selected.is_empty() {
            return Vec::new();
        }

        self.recipes
            .iter()
            .filter(|r| {
                r.ingredients
                    .iter()
                    .any(|ri| selected.iter().any(|s| ingredients_overlap(s, ri)))
            })
            .collect()
    }

    /// A uniformly random recipe, or `None` for an empty catalog.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&RecipeRecord> {
        if self.recipes.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.recipes.len());
        self.recipes.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlavorProfile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(id: &str, ingredients: &[&str]) -> RecipeRecord {
        RecipeRecord {
            id: id.to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: vec!["Cook".to_string()],
            flavor_profile: FlavorProfile::NEUTRAL,
            cooking_time: None,
            difficulty: None,
            category: vec!["Quick".to_string()],
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.list_all()[0].id, "recipe-001");
        assert!(catalog.list_all().iter().all(|r| r.is_complete()));
        assert!(catalog.ingredient_groups().contains_key("seasonings"));
    }

    #[test]
    fn test_find_by_id() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(
            catalog.find_by_id("recipe-003").map(|r| r.name.as_str()),
            Some("Mapo Tofu")
        );
        assert!(catalog.find_by_id("recipe-999").is_none());
    }

    #[test]
    fn test_all_ingredients_sorted_and_unique() {
        let catalog = RecipeCatalog::new(vec![
            record("a", &["Tomato", "egg", " salt "]),
            record("b", &["tomato", "Beef", "egg"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.all_ingredients(),
            vec!["Beef", "egg", "salt", "Tomato"]
        );
    }

    #[test]
    fn test_rejects_incomplete_and_duplicate() {
        let mut empty = record("a", &["egg"]);
        empty.steps.clear();
        assert!(matches!(
            RecipeCatalog::new(vec![empty]),
            Err(CatalogError::IncompleteRecipe(id)) if id == "a"
        ));

        assert!(matches!(
            RecipeCatalog::new(vec![record("a", &["egg"]), record("a", &["ham"])]),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_by_category_and_search() {
        let catalog = RecipeCatalog::builtin();
        let sichuan = catalog.by_category("Sichuan");
        assert_eq!(sichuan.len(), 3);

        let found = catalog.search(&["eggplant".to_string()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "recipe-006");
    }

    #[test]
    fn test_random_is_seedable() {
        let catalog = RecipeCatalog::builtin();
        let a = catalog.random(&mut StdRng::seed_from_u64(7)).map(|r| r.id.clone());
        let b = catalog.random(&mut StdRng::seed_from_u64(7)).map(|r| r.id.clone());
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}
