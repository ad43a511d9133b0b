//! Recipe-synthesis prompt, specialized per dish type.

use crate::dish_type::DishType;

/// Prompt name for logging.
pub const DISH_RECIPE_PROMPT_NAME: &str = "dish_recipe";

/// Render the prompt asking the model to invent a recipe from loose ingredients.
pub fn render_dish_recipe_prompt(ingredients: &[String], dish_type: DishType) -> String {
    let (min_minutes, max_minutes) = dish_type.time_range();
    let examples = dish_type
        .name_examples()
        .iter()
        .map(|e| format!("\"{}\"", e))
        .collect::<Vec<_>>()
        .join(", ");
    let tags = dish_type
        .required_tags()
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(" or ");
    let example_name = dish_type.name_examples().first().copied().unwrap_or("House Special");

    format!(
        r#"You are a professional home-style chef. Design a {dish_label} using the ingredients below.

Available ingredients:
{ingredients}

Requirements:
1. Name: a real {dish_label} name that mentions the main ingredients, such as {examples}.
2. Description: one sentence on taste and character.
3. Steps: 4 to 6 concrete steps covering {guidance}. Every step list must name the main ingredients.
4. Cooking time: {min_minutes} to {max_minutes} minutes.
5. Difficulty: "easy" or "medium".
6. Flavor: score each axis from 0 to 5.
7. Category: must include {tags}.

Return JSON only, in exactly this shape:
{{
  "name": "{example_name}",
  "description": "...",
  "steps": ["...", "..."],
  "flavorProfile": {{"savory": 3, "sweet": 2, "sour": 1, "spicy": 1, "umami": 4, "bitter": 1}},
  "cookingTime": {default_minutes},
  "difficulty": "easy",
  "category": [{first_tag}]
}}"#,
        dish_label = dish_type.label(),
        ingredients = ingredients.join(", "),
        examples = examples,
        guidance = dish_type.step_guidance(),
        min_minutes = min_minutes,
        max_minutes = max_minutes,
        tags = tags,
        example_name = example_name,
        default_minutes = dish_type.default_minutes(),
        first_tag = dish_type
            .required_tags()
            .first()
            .map(|t| format!("\"{}\"", t))
            .unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_soup_prompt() {
        let prompt = render_dish_recipe_prompt(
            &["goji berry".to_string(), "chicken".to_string()],
            DishType::SoupStew,
        );

        assert!(prompt.contains("Design a soup or stew"));
        assert!(prompt.contains("goji berry, chicken"));
        assert!(prompt.contains("30 to 120 minutes"));
        assert!(prompt.contains(r#"must include "soup" or "stew""#));
        assert!(prompt.contains("Return JSON"));
    }

    #[test]
    fn test_every_type_renders_its_guidance() {
        for dish in DishType::ALL {
            let prompt = render_dish_recipe_prompt(&["egg".to_string()], *dish);
            assert!(prompt.contains(dish.step_guidance()));
        }
    }
}
