//! Flavor-story prompt.

use crate::dish_type::DishType;
use crate::types::RecipeRecord;

/// Prompt name for logging.
pub const FLAVOR_STORY_PROMPT_NAME: &str = "flavor_story";

/// Render the flavor-story prompt.
pub fn render_flavor_story_prompt(
    recipe: &RecipeRecord,
    selected: &[String],
    dish_type: Option<DishType>,
) -> String {
    let flavors = recipe
        .flavor_profile
        .axes()
        .iter()
        .map(|(axis, value)| format!("{}: {}/5", axis, value))
        .collect::<Vec<_>>()
        .join(", ");

    let ingredients = if selected.is_empty() {
        recipe.ingredients.join(", ")
    } else {
        selected.join(", ")
    };

    format!(
        r#"You are a food writer. Write a short flavor story for this {dish_label}.

Dish:
- Name: {name}
- Ingredients: {ingredients}
- Summary: {description}
- Flavor: {flavors}

Rules:
1. One or two sentences, 20 to 40 words.
2. Describe taste, texture and aroma.
3. A touch of poetry or humor is welcome. Keep it warm and conversational.
4. Reply with the story only, no title.

Story:"#,
        dish_label = dish_type.map(|d| d.label()).unwrap_or("dish"),
        name = recipe.name,
        ingredients = ingredients,
        description = recipe.description,
        flavors = flavors,
    )
}
