//! AI prompt templates.

pub mod creative_name;
pub mod dish_recipe;
pub mod flavor_story;

pub use creative_name::render_creative_name_prompt;
pub use dish_recipe::render_dish_recipe_prompt;
pub use flavor_story::render_flavor_story_prompt;
