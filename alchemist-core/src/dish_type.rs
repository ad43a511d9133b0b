//! Dish-type taxonomy.
//!
//! One table drives both the ingredient classifier and the generation prompts,
//! so the keyword lists, naming patterns and step templates cannot drift apart.

use serde::{Deserialize, Serialize};

/// The five cooking styles a loose ingredient set can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishType {
    SoupStew,
    ColdSalad,
    StirFry,
    Steamed,
    Grilled,
}

impl DishType {
    /// All dish types in tie-break priority order.
    pub const ALL: &'static [DishType] = &[
        DishType::SoupStew,
        DishType::ColdSalad,
        DishType::StirFry,
        DishType::Steamed,
        DishType::Grilled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DishType::SoupStew => "soup_stew",
            DishType::ColdSalad => "cold_salad",
            DishType::StirFry => "stir_fry",
            DishType::Steamed => "steamed",
            DishType::Grilled => "grilled",
        }
    }

    /// Human-readable label used in prompts and recommendation reasons.
    pub fn label(&self) -> &'static str {
        match self {
            DishType::SoupStew => "soup or stew",
            DishType::ColdSalad => "cold salad",
            DishType::StirFry => "stir-fry",
            DishType::Steamed => "steamed dish",
            DishType::Grilled => "grilled or pan-fried dish",
        }
    }

    /// Category tag given to generated recipes of this type.
    pub fn tag(&self) -> &'static str {
        match self {
            DishType::SoupStew => "soup",
            DishType::ColdSalad => "cold dish",
            DishType::StirFry => "stir-fry",
            DishType::Steamed => "steamed",
            DishType::Grilled => "grilled",
        }
    }

    /// Ingredient keywords that suggest this cooking style.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DishType::SoupStew => &[
                "cinnamon",
                "goji",
                "jujube",
                "angelica",
                "astragalus",
                "ginseng",
                "codonopsis",
                "lotus seed",
                "lily bulb",
                "job's tears",
                "fox nut",
                "pork ribs",
                "spare ribs",
                "bone",
                "pork trotter",
                "black chicken",
                "lamb",
                "crucian carp",
                "winter melon",
                "corn",
                "radish",
                "lotus root",
            ],
            DishType::ColdSalad => &[
                "cucumber",
                "tomato",
                "lettuce",
                "purple cabbage",
                "arugula",
                "endive",
                "kelp",
                "tofu skin",
                "salad dressing",
                "vinegar",
                "olive oil",
                "lemon juice",
                "jelly noodles",
            ],
            DishType::StirFry => &[
                "green pepper",
                "potato",
                "green bean",
                "onion",
                "eggplant",
                "broccoli",
                "cauliflower",
                "celery",
                "shredded pork",
                "sliced pork",
                "minced pork",
                "beef",
                "pork",
                "chicken",
                "cured pork",
                "chinese sausage",
                "ham",
                "egg",
                "duck egg",
                "tofu",
                "dried tofu",
                "peeled shrimp",
                "squid",
                "clam",
                "soy sauce",
                "oyster sauce",
                "fermented black beans",
                "garlic",
                "ginger",
            ],
            DishType::Steamed => &[
                "fish",
                "shrimp",
                "steamed pork",
                "rice-flour pork",
                "steamed egg",
                "pumpkin",
                "loofah",
                "clam",
            ],
            DishType::Grilled => &[
                "steak",
                "lamb chop",
                "chicken wing",
                "drumstick",
                "barbecue",
                "grilled fish",
                "bacon",
                "sausage",
            ],
        }
    }

    /// Example names shown to the model.
    pub fn name_examples(&self) -> &'static [&'static str] {
        match self {
            DishType::SoupStew => &[
                "Goji and Jujube Soup",
                "Angelica Chicken Soup",
                "Potato Beef Stew",
            ],
            DishType::ColdSalad => &[
                "Smashed Cucumber Salad",
                "Tomato and Egg Salad",
                "Three-Color Garden Salad",
            ],
            DishType::StirFry => &[
                "Green Pepper Stir-Fried Beef",
                "Tomato and Egg Stir-Fry",
                "Fish-Fragrant Eggplant",
            ],
            DishType::Steamed => &[
                "Steamed Whole Fish",
                "Rice-Flour Steamed Pork",
                "Garlic Steamed Shrimp",
            ],
            DishType::Grilled => &["Pan-Seared Steak", "Roasted Chicken Wings", "Seared Fish Fillet"],
        }
    }

    /// What the steps of this kind of dish should cover.
    pub fn step_guidance(&self) -> &'static str {
        match self {
            DishType::SoupStew => "washing, preparing, simmering and seasoning",
            DishType::ColdSalad => "washing, cutting, mixing a dressing and tossing",
            DishType::StirFry => "heating the wok, adding oil, stir-frying and seasoning",
            DishType::Steamed => "preparing, marinating, plating, steaming and dressing",
            DishType::Grilled => "marinating, preheating, searing, flipping and seasoning",
        }
    }

    /// Reasonable cooking time range in minutes.
    pub fn time_range(&self) -> (u32, u32) {
        match self {
            DishType::SoupStew => (30, 120),
            DishType::ColdSalad => (5, 15),
            DishType::StirFry => (15, 25),
            DishType::Steamed => (15, 40),
            DishType::Grilled => (20, 40),
        }
    }

    /// Cooking time used for locally synthesized recipes.
    pub fn default_minutes(&self) -> u32 {
        match self {
            DishType::SoupStew => 60,
            DishType::ColdSalad => 10,
            DishType::StirFry => 20,
            DishType::Steamed => 25,
            DishType::Grilled => 30,
        }
    }

    /// Tags the model is required to include.
    pub fn required_tags(&self) -> &'static [&'static str] {
        match self {
            DishType::SoupStew => &["soup", "stew"],
            DishType::ColdSalad => &["cold dish", "salad"],
            DishType::StirFry => &["stir-fry"],
            DishType::Steamed => &["steamed"],
            DishType::Grilled => &["grilled", "pan-fried"],
        }
    }

    /// Build a dish name from the leading ingredients.
    pub fn compose_name(&self, ingredients: &[String]) -> String {
        let first = ingredients.first().map(String::as_str);
        let second = ingredients.get(1).map(String::as_str);

        let Some(first) = first else {
            return format!("house {}", self.tag());
        };

        match self {
            DishType::SoupStew => {
                let parts: Vec<&str> = ingredients.iter().take(3).map(String::as_str).collect();
                format!("{} soup", parts.join(" "))
            }
            DishType::ColdSalad => match second {
                Some(second) => format!("cold-tossed {} and {}", first, second),
                None => format!("cold-tossed {}", first),
            },
            DishType::StirFry => match (second, ingredients.get(2)) {
                (Some(second), Some(third)) => {
                    format!("{} stir-fried {} and {}", first, second, third)
                }
                (Some(second), None) => format!("{} stir-fried {}", first, second),
                (None, _) => format!("stir-fried {}", first),
            },
            DishType::Steamed => match second {
                Some(second) => format!("steamed {} with {}", first, second),
                None => format!("steamed {}", first),
            },
            DishType::Grilled => match second {
                Some(second) => format!("pan-seared {} with {}", first, second),
                None => format!("pan-seared {}", first),
            },
        }
    }

    /// Four-step template that names the ingredients explicitly.
    ///
    /// `all` is the full selection, `primary` the non-seasoning subset.
    pub fn templated_steps(&self, all: &[String], primary: &[String]) -> Vec<String> {
        let everything = all.join(", ");
        let first = primary.first().map(String::as_str).unwrap_or("the main ingredient");
        let second = primary
            .get(1)
            .map(String::as_str)
            .unwrap_or("the other ingredients");

        match self {
            DishType::SoupStew => vec![
                format!("Prepare {}", everything),
                format!("Wash the {} and {} thoroughly", first, second),
                "Cover with plenty of water and bring to a boil".to_string(),
                "Season, then simmer gently until everything is tender".to_string(),
            ],
            DishType::ColdSalad => vec![
                format!("Prepare {}", everything),
                format!("Wash and cut the {} and {}", first, second),
                "Mix a dressing and toss everything together".to_string(),
                "Plate and serve chilled".to_string(),
            ],
            DishType::StirFry => vec![
                format!("Prepare {}", everything),
                format!("Clean and slice the {} and {}", first, second),
                format!("Heat oil in a wok and add {} in turn", primary.join(", ")),
                "Stir-fry until evenly cooked, season and serve".to_string(),
            ],
            DishType::Steamed => vec![
                format!("Prepare {}", everything),
                format!("Clean and marinate the {} and {}", first, second),
                "Steam over high heat until cooked through".to_string(),
                "Drizzle with sauce and serve".to_string(),
            ],
            DishType::Grilled => vec![
                format!("Prepare {}", everything),
                format!("Marinate the {} and {} until flavorful", first, second),
                "Preheat the pan or oven, then sear".to_string(),
                "Cook until golden on both sides and serve".to_string(),
            ],
        }
    }

    /// Generic offline step list mentioning every ingredient.
    pub fn fallback_steps(&self, all: &[String]) -> Vec<String> {
        let prepare = format!("Prepare {}", all.join(", "));
        let rest: &[&str] = match self {
            DishType::SoupStew => &[
                "Wash all the ingredients",
                "Add plenty of water to the pot",
                "Bring to a boil, then lower the heat and simmer",
                "Season to taste",
                "Simmer until everything is tender",
            ],
            DishType::ColdSalad => &[
                "Wash and cut the ingredients",
                "Mix a dressing",
                "Toss everything together",
                "Plate and serve",
            ],
            DishType::StirFry => &[
                "Heat oil in a wok",
                "Add the ingredients one by one and stir-fry",
                "Season and toss evenly",
                "Plate and serve",
            ],
            DishType::Steamed => &[
                "Clean the ingredients",
                "Marinate and season",
                "Steam until cooked through",
                "Finish with hot oil or sauce",
            ],
            DishType::Grilled => &[
                "Marinate the ingredients",
                "Preheat the pan or oven",
                "Sear until golden on both sides",
                "Plate and serve",
            ],
        };

        std::iter::once(prepare)
            .chain(rest.iter().map(|s| s.to_string()))
            .collect()
    }
}

impl std::fmt::Display for DishType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compose_name_patterns() {
        let two = names(&["dragonfruit", "kombucha"]);
        assert_eq!(
            DishType::StirFry.compose_name(&two),
            "dragonfruit stir-fried kombucha"
        );
        assert_eq!(
            DishType::SoupStew.compose_name(&names(&["goji", "jujube", "cinnamon", "lamb"])),
            "goji jujube cinnamon soup"
        );
        assert_eq!(
            DishType::ColdSalad.compose_name(&names(&["cucumber"])),
            "cold-tossed cucumber"
        );
        assert_eq!(DishType::Grilled.compose_name(&[]), "house grilled");
    }

    #[test]
    fn test_fallback_steps_mention_everything() {
        let all = names(&["dragonfruit", "kombucha"]);
        for dish in DishType::ALL {
            let steps = dish.fallback_steps(&all);
            assert!((5..=6).contains(&steps.len()), "{:?}", dish);
            assert!(steps[0].contains("dragonfruit") && steps[0].contains("kombucha"));
        }
    }

    #[test]
    fn test_templated_steps_name_primary_ingredients() {
        let all = names(&["beef", "green pepper", "salt"]);
        let primary = names(&["beef", "green pepper"]);
        let steps = DishType::StirFry.templated_steps(&all, &primary);
        assert_eq!(steps.len(), 4);
        assert!(steps[1].contains("beef") && steps[1].contains("green pepper"));
    }

    #[test]
    fn test_time_ranges_contain_defaults() {
        for dish in DishType::ALL {
            let (lo, hi) = dish.time_range();
            assert!((lo..=hi).contains(&dish.default_minutes()));
        }
    }
}
