use serde::{Deserialize, Serialize};

use crate::dish_type::DishType;

/// Difficulty level of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Six-axis flavor description, each axis conventionally 0-5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlavorProfile {
    pub savory: f64,
    pub sweet: f64,
    pub sour: f64,
    pub spicy: f64,
    pub umami: f64,
    pub bitter: f64,
}

impl FlavorProfile {
    /// Profile used for dishes nobody has tasted yet.
    pub const NEUTRAL: FlavorProfile = FlavorProfile {
        savory: 3.0,
        sweet: 3.0,
        sour: 3.0,
        spicy: 3.0,
        umami: 3.0,
        bitter: 3.0,
    };

    /// Axis names paired with their values, in display order.
    pub fn axes(&self) -> [(&'static str, f64); 6] {
        [
            ("savory", self.savory),
            ("sweet", self.sweet),
            ("sour", self.sour),
            ("spicy", self.spicy),
            ("umami", self.umami),
            ("bitter", self.bitter),
        ]
    }
}

/// A flavor profile where any axis may be left unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFlavorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savory: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spicy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umami: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitter: Option<f64>,
}

impl PartialFlavorProfile {
    /// Pairs of (recipe value, preferred value) for every axis the user set
    /// to a finite value.
    pub fn present_axes(&self, recipe: &FlavorProfile) -> Vec<(f64, f64)> {
        [
            (recipe.savory, self.savory),
            (recipe.sweet, self.sweet),
            (recipe.sour, self.sour),
            (recipe.spicy, self.spicy),
            (recipe.umami, self.umami),
            (recipe.bitter, self.bitter),
        ]
        .into_iter()
        .filter_map(|(r, p)| p.filter(|p| p.is_finite()).map(|p| (r, p)))
        .collect()
    }

    /// Set one axis by name. Returns false for an unknown axis or a
    /// non-finite value.
    pub fn set(&mut self, axis: &str, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let slot = match axis.trim().to_lowercase().as_str() {
            "savory" => &mut self.savory,
            "sweet" => &mut self.sweet,
            "sour" => &mut self.sour,
            "spicy" => &mut self.spicy,
            "umami" => &mut self.umami,
            "bitter" => &mut self.bitter,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Optional user preferences. Absent fields contribute nothing to scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<PartialFlavorProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// An immutable recipe entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub flavor_profile: FlavorProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Vec<String>,
}

impl RecipeRecord {
    /// Whether the record has at least one ingredient and one step.
    pub fn is_complete(&self) -> bool {
        self.ingredients.iter().any(|i| !i.trim().is_empty())
            && self.steps.iter().any(|s| !s.trim().is_empty())
    }
}

/// Where a surfaced recipe came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeOrigin {
    Catalog,
    AiGenerated,
    LocalFallback,
}

/// A catalog recipe scored against one selection. Never persisted.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub recipe: &'a RecipeRecord,
    /// Fraction of the selection found in the recipe, in [0, 1].
    pub match_ratio: f64,
    /// Preference score times match ratio, in [0, 1].
    pub score: f64,
    /// Primary recipe ingredients the selection does not cover.
    pub missing_ingredients: Vec<String>,
}

/// A recipe ready to show to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    #[serde(flatten)]
    pub recipe: RecipeRecord,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    pub match_score: f64,
    pub ai_enhanced: bool,
    pub recommendation_reason: String,
    pub origin: RecipeOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_type: Option<DishType>,
}

impl GeneratedRecipe {
    pub fn id(&self) -> &str {
        &self.recipe.id
    }
}
