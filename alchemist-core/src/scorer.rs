//! Recommendation scoring and the end-to-end recommend flow.

use futures::future::join_all;
use rand::Rng;
use std::sync::Arc;

use crate::ai::{Gateway, LocalTemplates};
use crate::catalog::RecipeCatalog;
use crate::error::RecommendError;
use crate::fallback;
use crate::matcher::{clean_selection, match_ratio, missing_ingredients, union_selection};
use crate::types::{
    GeneratedRecipe, RecipeOrigin, RecipeRecord, ScoredCandidate, UserPreferences,
};

/// Minimum match ratio for a catalog recipe to be considered.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;

const BASE_SCORE: f64 = 0.5;
const KEEP_WEIGHT: f64 = 0.7;
const FACTOR_WEIGHT: f64 = 0.3;

fn blend(score: f64, factor: f64) -> f64 {
    KEEP_WEIGHT * score + FACTOR_WEIGHT * factor
}

/// How well a recipe fits the user's stated preferences, in [0, 1].
///
/// Starts at 0.5 and blends in flavor, time and difficulty closeness, each
/// only when both sides are known.
pub fn preference_score(recipe: &RecipeRecord, prefs: Option<&UserPreferences>) -> f64 {
    let mut score = BASE_SCORE;
    let Some(prefs) = prefs else {
        return score;
    };

    if let Some(flavor) = &prefs.flavor {
        let axes = flavor.present_axes(&recipe.flavor_profile);
        if !axes.is_empty() {
            let closeness = axes
                .iter()
                .map(|(r, p)| ((5.0 - (r - p).abs()) / 5.0).clamp(0.0, 1.0))
                .sum::<f64>()
                / axes.len() as f64;
            score = blend(score, closeness);
        }
    }

    if let (Some(recipe_time), Some(preferred)) = (recipe.cooking_time, prefs.cooking_time) {
        let diff = (recipe_time as f64 - preferred as f64).abs();
        score = blend(score, (1.0 - diff / 60.0).max(0.3));
    }

    if let (Some(recipe_level), Some(preferred)) = (recipe.difficulty, prefs.difficulty) {
        score = blend(score, if recipe_level == preferred { 1.0 } else { 0.7 });
    }

    score.clamp(0.0, 1.0)
}

/// Score every catalog recipe that clears `threshold`, best first.
///
/// Ties keep catalog order.
pub fn rank_candidates<'a>(
    catalog: &'a RecipeCatalog,
    selected: &[String],
    prefs: Option<&UserPreferences>,
    threshold: f64,
) -> Vec<ScoredCandidate<'a>> {
    let mut ranked: Vec<ScoredCandidate<'a>> = catalog
        .list_all()
        .iter()
        .filter_map(|recipe| {
            let ratio = match_ratio(selected, &recipe.ingredients);
            if ratio < threshold || ratio <= 0.0 {
                return None;
            }
            Some(ScoredCandidate {
                recipe,
                match_ratio: ratio,
                score: preference_score(recipe, prefs) * ratio,
                missing_ingredients: missing_ingredients(selected, &recipe.ingredients),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Catalog, gateway and templates wired together.
#[derive(Debug)]
pub struct Recommender {
    catalog: Arc<RecipeCatalog>,
    gateway: Gateway,
    templates: LocalTemplates,
    threshold: f64,
}

impl Recommender {
    pub fn new(catalog: Arc<RecipeCatalog>, gateway: Gateway) -> Self {
        Self {
            catalog,
            gateway,
            templates: LocalTemplates::default(),
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    pub fn with_templates(mut self, templates: LocalTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Full ranking for a selection, without enrichment.
    pub fn rank(&self, selected: &[String], prefs: Option<&UserPreferences>) -> Vec<ScoredCandidate<'_>> {
        rank_candidates(&self.catalog, selected, prefs, self.threshold)
    }

    /// Best recipe for a selection, enriched with a display name and story.
    ///
    /// Only an empty selection is an error. Every other failure degrades to
    /// a locally synthesized recipe.
    pub async fn recommend(
        &self,
        selected: &[String],
        prefs: Option<&UserPreferences>,
    ) -> Result<GeneratedRecipe, RecommendError> {
        let selection = clean_selection(selected);
        if selection.is_empty() {
            return Err(RecommendError::InvalidInput);
        }

        let ranked = self.rank(&selection, prefs);
        let Some(best) = ranked.first() else {
            tracing::info!(ingredients = ?selection, "No catalog match, synthesizing recipe");
            return Ok(fallback::synthesize(&self.gateway, &self.templates, &selection).await);
        };

        tracing::info!(
            recipe_id = %best.recipe.id,
            match_ratio = best.match_ratio,
            score = best.score,
            candidates = ranked.len(),
            "Catalog recipe selected"
        );

        let mut recipe = best.recipe.clone();
        union_selection(&mut recipe.ingredients, &selection);

        let reason = if best.missing_ingredients.is_empty() {
            format!("Uses {} of your ingredients", selection.len())
        } else {
            format!(
                "Matches {:.0}% of your ingredients; you will also need {}",
                best.match_ratio * 100.0,
                best.missing_ingredients.join(", ")
            )
        };
        Ok(self.enrich(recipe, &selection, best.match_ratio, reason).await)
    }

    /// Attach a creative name and story, falling back per field to local templates.
    async fn enrich(
        &self,
        recipe: RecipeRecord,
        selected: &[String],
        match_score: f64,
        recommendation_reason: String,
    ) -> GeneratedRecipe {
        let (name, story) = tokio::join!(
            self.gateway.generate_name(&recipe, selected, None),
            self.gateway.generate_story(&recipe, selected, None),
        );

        let mut ai_enhanced = false;

        let display_name = match name {
            Ok(name) => {
                ai_enhanced = true;
                name
            }
            Err(e) => {
                tracing::warn!(recipe_id = %recipe.id, error = %e, "Creative name failed, using template");
                self.templates.creative_name(&recipe)
            }
        };

        let story = match story {
            Ok(story) => {
                ai_enhanced = true;
                story
            }
            Err(e) => {
                tracing::warn!(recipe_id = %recipe.id, error = %e, "Flavor story failed, using template");
                self.templates.flavor_story(&recipe)
            }
        };

        GeneratedRecipe {
            display_name,
            story: Some(story),
            match_score,
            ai_enhanced,
            recommendation_reason,
            origin: RecipeOrigin::Catalog,
            dish_type: None,
            recipe,
        }
    }

    /// A random catalog recipe, enriched.
    pub async fn random_recipe<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GeneratedRecipe> {
        let recipe = self.catalog.random(rng)?.clone();
        Some(
            self.enrich(recipe, &[], 1.0, "A random pick from the recipe book".to_string())
                .await,
        )
    }

    /// Every recipe tagged with `category`, enriched concurrently.
    pub async fn recipes_in_category(&self, category: &str) -> Vec<GeneratedRecipe> {
        let reason = format!("From the {} collection", category.trim());
        let pending = self
            .catalog
            .by_category(category)
            .into_iter()
            .map(|recipe| self.enrich(recipe.clone(), &[], 1.0, reason.clone()));
        join_all(pending).await
    }

    /// A catalog recipe by id, enriched.
    pub async fn recipe_by_id(&self, id: &str) -> Option<GeneratedRecipe> {
        let recipe = self.catalog.find_by_id(id)?.clone();
        Some(
            self.enrich(recipe, &[], 1.0, "Opened from the recipe book".to_string())
                .await,
        )
    }
}
