//! Offline name and story generators used whenever the AI path fails.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

use crate::dish_type::DishType;
use crate::types::RecipeRecord;

const SOUP_PREFIXES: &[&str] = &["Heartwarming", "Fragrant", "Starlit", "Jade", "Amber", "Secret-Recipe"];
const NAME_PREFIXES: &[&str] = &["Starlight", "Moonlit", "Hidden-Garden"];
const NAME_SUFFIXES: &[&str] = &["Romance", "Concerto", "Fantasia"];

const FALLBACK_STORY: &str = "A dish made with care, full of warmth and comfort.";

/// Template-based generators with an injectable random source.
#[derive(Debug)]
pub struct LocalTemplates {
    rng: Mutex<StdRng>,
}

impl Default for LocalTemplates {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl LocalTemplates {
    /// Deterministic templates for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, options: &'static [&'static str]) -> &'static str {
        let chosen = match self.rng.lock() {
            Ok(mut rng) => options.choose(&mut *rng).copied(),
            Err(_) => options.first().copied(),
        };
        chosen.unwrap_or("")
    }

    /// A decorated version of the canonical name.
    pub fn creative_name(&self, recipe: &RecipeRecord) -> String {
        let name = recipe.name.trim();

        if name.to_lowercase().contains("soup") {
            return format!("{} {}", self.pick(SOUP_PREFIXES), name);
        }

        format!(
            "{} {} {}",
            self.pick(NAME_PREFIXES),
            name,
            self.pick(NAME_SUFFIXES)
        )
    }

    /// One of a handful of canned stories, personalized with the first ingredients.
    pub fn flavor_story(&self, recipe: &RecipeRecord) -> String {
        let first = recipe.ingredients.first().map(String::as_str).unwrap_or("the ingredients");
        let second = recipe.ingredients.get(1).map(String::as_str).unwrap_or("good company");

        let index = match self.rng.lock() {
            Ok(mut rng) => rand::Rng::gen_range(&mut *rng, 0..4),
            Err(_) => 0,
        };

        match index {
            0 => format!(
                "When {} meets {}, a little kitchen magic begins. Every bite pays respect to simple ingredients done right.",
                first, second
            ),
            1 => "A small everyday joy from the stove: the heat just right, the seasoning in balance, a comforting taste for busy days.".to_string(),
            2 => "Tradition with a twist. The familiar home-cooked flavor you remember, plus a surprise worth sharing with someone close.".to_string(),
            3 => "The aroma drifts out of the kitchen before the dish does. Sweet, sour, salty and spicy find their balance on one plate.".to_string(),
            _ => FALLBACK_STORY.to_string(),
        }
    }

    /// Story for a locally synthesized recipe.
    pub fn generated_story(&self, ingredients: &[String], dish_type: DishType) -> String {
        let listed = ingredients
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if listed.is_empty() {
            return FALLBACK_STORY.to_string();
        }

        format!(
            "This {} brings together {}, an improvised combination straight from your fridge.",
            dish_type.label(),
            listed
        )
    }
}
