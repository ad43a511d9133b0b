//! Creative-name prompt for catalog and generated recipes.

use crate::dish_type::DishType;
use crate::types::RecipeRecord;

/// Prompt name for logging.
pub const CREATIVE_NAME_PROMPT_NAME: &str = "creative_name";

/// Words the model reaches for that tell the reader nothing about the dish.
pub const BANNED_CLICHES: &[&str] = &["delight", "treasure", "symphony", "heavenly", "divine"];

/// Render the creative-name prompt for a recipe and the user's selection.
pub fn render_creative_name_prompt(
    recipe: &RecipeRecord,
    selected: &[String],
    dish_type: Option<DishType>,
) -> String {
    let dish_label = dish_type.map(|d| d.label()).unwrap_or("dish");
    let is_soup = dish_type == Some(DishType::SoupStew) || recipe.name.to_lowercase().contains("soup");

    let keyword_rule = if is_soup {
        "The name MUST contain the word \"soup\"."
    } else {
        "Do not mention ingredients that are not in the dish."
    };

    format!(
        r#"You are a creative dish namer. Give this {dish_label} a poetic, appetizing name.

Dish:
- Original name: {name}
- Main ingredients: {ingredients}
- Dish type: {dish_label}
- Description: {description}

Rules:
1. Build on the original name; do not change what the dish is.
2. If the original name mentions the main ingredients, keep them in the new name.
3. Length: 2 to 6 words.
4. {keyword_rule}
5. Avoid empty words such as: {cliches}.
6. Examples: "Potato Beef Stew" -> "Hearty Potato Beef Stew"; "Mapo Tofu" -> "Fiery Mapo Tofu Pot".
7. Reply with the name only, no explanation.

Creative name:"#,
        dish_label = dish_label,
        name = recipe.name,
        ingredients = selected.join(", "),
        description = recipe.description,
        keyword_rule = keyword_rule,
        cliches = BANNED_CLICHES.join(", "),
    )
}
