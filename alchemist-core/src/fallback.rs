//! Recipe synthesis for selections no catalog recipe covers.
//!
//! Tier 1 asks the model for a recipe and repairs what it returns. Tier 2 is
//! fully local and cannot fail. Either way the surfaced recipe lists every
//! selected ingredient and has at least one step.

use crate::ai::{Gateway, LocalTemplates, RecipeDraft};
use crate::dish_type::DishType;
use crate::matcher::{classify_dish_type, clean_selection, primary_ingredients, union_selection};
use crate::types::{Difficulty, FlavorProfile, GeneratedRecipe, RecipeOrigin, RecipeRecord};

/// Match-score echo for recipes the model designed.
pub const AI_GENERATED_MATCH_SCORE: f64 = 0.7;

/// Match-score echo for locally synthesized recipes.
pub const LOCAL_FALLBACK_MATCH_SCORE: f64 = 0.6;

/// Id of the form `<prefix>-<unix millis>-<random suffix>`.
pub fn generated_id(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}

/// Turn a model draft into a valid record, or `None` when it cannot be saved.
///
/// Repairs applied in order: a name missing a primary ingredient is rebuilt
/// from the dish-type pattern; steps that never mention a primary ingredient
/// are replaced by the dish-type template; selected ingredients still absent
/// from the ingredient list are appended.
pub fn repair_draft(draft: RecipeDraft, selected: &[String], dish_type: DishType) -> Option<RecipeRecord> {
    let all = clean_selection(selected);
    let primary = primary_ingredients(&all);

    let mut name = draft.name;
    let lower_name = name.to_lowercase();
    if !primary
        .iter()
        .all(|p| lower_name.contains(&p.to_lowercase()))
    {
        let rebuilt = dish_type.compose_name(&primary);
        tracing::debug!(from = %name, to = %rebuilt, "Rebuilt generated recipe name");
        name = rebuilt;
    }

    let mut steps = draft.steps;
    let steps_text = steps.join(" ").to_lowercase();
    let steps_mention_primary = primary
        .iter()
        .any(|p| steps_text.contains(&p.to_lowercase()));
    if steps.is_empty() || (!primary.is_empty() && !steps_mention_primary) {
        if primary.is_empty() {
            return None;
        }
        tracing::debug!(step_count = steps.len(), "Replacing generated steps with template");
        steps = dish_type.templated_steps(&all, &primary);
    }

    let mut ingredients = draft.ingredients;
    union_selection(&mut ingredients, &all);

    let category = if draft.category.is_empty() {
        vec![dish_type.tag().to_string()]
    } else {
        draft.category
    };

    let description = if draft.description.trim().is_empty() {
        format!("A {} built around {}.", dish_type.label(), all.join(", "))
    } else {
        draft.description
    };

    let record = RecipeRecord {
        id: generated_id("ai-generated"),
        name,
        description,
        ingredients,
        steps,
        flavor_profile: draft.flavor_profile.unwrap_or(FlavorProfile::NEUTRAL),
        cooking_time: draft
            .cooking_time
            .filter(|t| *t > 0)
            .or(Some(dish_type.default_minutes())),
        difficulty: draft.difficulty.or(Some(Difficulty::Easy)),
        category,
    };

    record.is_complete().then_some(record)
}

/// Fully local recipe built from templates. Never fails.
pub fn local_recipe(
    selected: &[String],
    dish_type: DishType,
    templates: &LocalTemplates,
) -> GeneratedRecipe {
    let all = clean_selection(selected);
    let primary = primary_ingredients(&all);
    let name_basis = if primary.is_empty() { &all } else { &primary };
    let name = dish_type.compose_name(name_basis);

    let recipe = RecipeRecord {
        id: generated_id("generated"),
        name: name.clone(),
        description: format!("A simple {} made from {}.", dish_type.label(), all.join(", ")),
        ingredients: all.clone(),
        steps: dish_type.fallback_steps(&all),
        flavor_profile: FlavorProfile::NEUTRAL,
        cooking_time: Some(dish_type.default_minutes()),
        difficulty: Some(Difficulty::Easy),
        category: vec![
            dish_type.tag().to_string(),
            "creative".to_string(),
            "custom".to_string(),
        ],
    };

    GeneratedRecipe {
        display_name: name,
        story: Some(templates.generated_story(&all, dish_type)),
        match_score: LOCAL_FALLBACK_MATCH_SCORE,
        ai_enhanced: false,
        recommendation_reason: format!("An improvised {} from the ingredients you picked", dish_type.label()),
        origin: RecipeOrigin::LocalFallback,
        dish_type: Some(dish_type),
        recipe,
    }
}

/// Synthesize a recipe for `selected`, preferring the model and falling back to templates.
pub async fn synthesize(
    gateway: &Gateway,
    templates: &LocalTemplates,
    selected: &[String],
) -> GeneratedRecipe {
    let all = clean_selection(selected);
    let dish_type = classify_dish_type(&all);

    let draft = match gateway.generate_recipe(&all, dish_type).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(error = %e, "AI recipe generation failed, using local recipe");
            return local_recipe(&all, dish_type, templates);
        }
    };

    let Some(recipe) = repair_draft(draft, &all, dish_type) else {
        tracing::warn!("AI recipe could not be repaired, using local recipe");
        return local_recipe(&all, dish_type, templates);
    };

    let (name, story) = tokio::join!(
        gateway.generate_name(&recipe, &all, Some(dish_type)),
        gateway.generate_story(&recipe, &all, Some(dish_type)),
    );

    let display_name = name.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Creative name failed, keeping generated name");
        recipe.name.clone()
    });
    let story = story.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Flavor story failed, using template");
        templates.generated_story(&all, dish_type)
    });

    GeneratedRecipe {
        display_name,
        story: Some(story),
        match_score: AI_GENERATED_MATCH_SCORE,
        ai_enhanced: true,
        recommendation_reason: format!("AI-designed {} for your ingredients", dish_type.label()),
        origin: RecipeOrigin::AiGenerated,
        dish_type: Some(dish_type),
        recipe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::covers;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn draft(name: &str, steps: &[&str]) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            description: String::new(),
            ingredients: Vec::new(),
            steps: list(steps),
            flavor_profile: None,
            cooking_time: None,
            difficulty: None,
            category: Vec::new(),
        }
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generated_id("generated");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "generated");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn test_repair_keeps_good_draft() {
        let selected = list(&["potato", "beef", "salt"]);
        let repaired = repair_draft(
            draft(
                "Potato Beef Stew",
                &["Cube the beef", "Add potato and simmer"],
            ),
            &selected,
            DishType::SoupStew,
        )
        .unwrap();

        assert_eq!(repaired.name, "Potato Beef Stew");
        assert_eq!(repaired.steps.len(), 2);
        assert_eq!(repaired.ingredients, selected);
        assert_eq!(repaired.cooking_time, Some(60));
        assert_eq!(repaired.category, list(&["soup"]));
        assert!(repaired.id.starts_with("ai-generated-"));
    }

    #[test]
    fn test_repair_rebuilds_name_and_steps() {
        let selected = list(&["green pepper", "beef"]);
        let repaired = repair_draft(
            draft("Chef's Surprise", &["Cook everything", "Serve"]),
            &selected,
            DishType::StirFry,
        )
        .unwrap();

        assert_eq!(repaired.name, "green pepper stir-fried beef");
        assert_eq!(repaired.steps.len(), 4);
        assert!(repaired.steps[0].contains("green pepper, beef"));
    }

    #[test]
    fn test_repair_unions_missing_ingredients() {
        let selected = list(&["aubergine", "basil"]);
        let mut d = draft("Aubergine Basil Stir-Fry", &["Fry aubergine with basil"]);
        d.ingredients = list(&["eggplant", "garlic"]);

        let repaired = repair_draft(d, &selected, DishType::StirFry).unwrap();
        assert_eq!(repaired.ingredients, list(&["eggplant", "garlic", "basil"]));
        for s in &selected {
            assert!(covers(&repaired.ingredients, s));
        }
    }

    #[test]
    fn test_repair_gives_up_without_steps_or_primary() {
        let selected = list(&["salt", "oil"]);
        assert!(repair_draft(draft("Salty Oil", &[]), &selected, DishType::StirFry).is_none());
    }

    #[test]
    fn test_local_recipe_shape() {
        let templates = LocalTemplates::seeded(3);
        let selected = list(&["dragonfruit", " kombucha ", ""]);
        let recipe = local_recipe(&selected, DishType::StirFry, &templates);

        assert_eq!(recipe.display_name, "dragonfruit stir-fried kombucha");
        assert_eq!(recipe.recipe.ingredients, list(&["dragonfruit", "kombucha"]));
        assert!(recipe.recipe.steps[0].contains("dragonfruit, kombucha"));
        assert!((5..=6).contains(&recipe.recipe.steps.len()));
        assert_eq!(recipe.recipe.flavor_profile, FlavorProfile::NEUTRAL);
        assert_eq!(recipe.recipe.cooking_time, Some(20));
        assert_eq!(recipe.recipe.difficulty, Some(Difficulty::Easy));
        assert_eq!(recipe.recipe.category, list(&["stir-fry", "creative", "custom"]));
        assert_eq!(recipe.match_score, 0.6);
        assert!(!recipe.ai_enhanced);
        assert_eq!(recipe.origin, RecipeOrigin::LocalFallback);
        assert!(recipe.id().starts_with("generated-"));
    }
}
