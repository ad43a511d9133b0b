//! Ingredient matching and dish-type classification.
//!
//! Matching is case-insensitive bidirectional substring overlap, widened by a
//! small alias table and narrowed by a list of trap words. Both tables are
//! hand-curated policy: add entries deliberately, not by inference.

use crate::dish_type::DishType;

/// Seasonings that never count as a "primary" ingredient.
pub const SEASONINGS: &[&str] = &[
    "oil",
    "salt",
    "sugar",
    "soy sauce",
    "vinegar",
    "cooking wine",
    "water",
    "starch",
];

/// Groups of names for the same ingredient.
const ALIAS_GROUPS: &[&[&str]] = &[
    &["tomato", "love apple"],
    &["eggplant", "aubergine", "brinjal"],
    &["scallion", "green onion", "spring onion"],
    &["cilantro", "coriander"],
    &["minced pork", "ground pork", "pork mince"],
    &["green pepper", "bell pepper", "capsicum"],
];

/// Compound names paired with a shorter, unrelated name they contain.
///
/// A pair is blocked when exactly one side contains the compound and the
/// other side contains the decoy, so "pepper" never matches "sichuan
/// peppercorn" and "corn" never matches "cornstarch", while "peppercorn"
/// still matches "sichuan peppercorn" and "starch" still matches
/// "cornstarch".
const TRAP_WORDS: &[(&str, &str)] = &[
    ("peppercorn", "pepper"),
    ("peppercorn", "corn"),
    ("eggplant", "egg"),
    ("pineapple", "apple"),
    ("love apple", "apple"),
    ("cornstarch", "corn"),
];

/// Cooking-style bonus tables.
const STIR_FRY_STAPLES: &[&str] = &["green pepper", "beef", "pork", "chicken", "tofu"];
const MEDICINAL: &[&str] = &["cinnamon", "goji", "jujube", "angelica", "astragalus"];
const SOUP_BASES: &[&str] = &[
    "cinnamon",
    "goji",
    "jujube",
    "angelica",
    "astragalus",
    "ginseng",
    "codonopsis",
    "pork ribs",
    "bone",
];
const MEATS: &[&str] = &[
    "beef",
    "pork",
    "chicken",
    "lamb",
    "shredded pork",
    "sliced pork",
    "minced pork",
];
const VEGETABLES: &[&str] = &[
    "green pepper",
    "potato",
    "green bean",
    "onion",
    "eggplant",
    "broccoli",
    "cauliflower",
];
const COLD_VEGETABLES: &[&str] = &[
    "green pepper",
    "cucumber",
    "tomato",
    "lettuce",
    "purple cabbage",
    "tofu",
];

/// Lowercase and trim an ingredient name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized, de-duplicated selection with blanks removed.
pub fn normalize_selection(selected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(selected.len());
    for item in selected {
        let n = normalize(item);
        if !n.is_empty() && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// Trimmed selection in the user's own spelling, blanks and case-insensitive
/// duplicates removed.
pub fn clean_selection(selected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(selected.len());
    for item in selected {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|o| normalize(o) == normalize(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    out
}

fn alias_group(name: &str) -> Option<usize> {
    ALIAS_GROUPS
        .iter()
        .position(|group| group.iter().any(|alias| name.contains(alias)))
}

/// Whether two normalized names belong to the same alias group.
fn alias_match(a: &str, b: &str) -> bool {
    match (alias_group(a), alias_group(b)) {
        (Some(ga), Some(gb)) => ga == gb,
        _ => false,
    }
}

fn trapped(a: &str, b: &str) -> bool {
    TRAP_WORDS.iter().any(|(compound, decoy)| {
        match (a.contains(compound), b.contains(compound)) {
            (true, false) => b.contains(decoy),
            (false, true) => a.contains(decoy),
            _ => false,
        }
    })
}

/// Substring containment that respects trap words. Inputs are normalized.
fn mentions(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle) && !trapped(haystack, needle)
}

/// Whether a selected ingredient is satisfied by a recipe ingredient.
pub fn ingredients_overlap(selected: &str, recipe_ingredient: &str) -> bool {
    let s = normalize(selected);
    let r = normalize(recipe_ingredient);
    if s.is_empty() || r.is_empty() {
        return false;
    }
    if alias_match(&s, &r) {
        return true;
    }
    mentions(&r, &s) || mentions(&s, &r)
}

/// Fraction of the selection found in the recipe's ingredients, in [0, 1].
pub fn match_ratio(selected: &[String], recipe_ingredients: &[String]) -> f64 {
    let selection = normalize_selection(selected);
    if selection.is_empty() {
        return 0.0;
    }

    let matched = selection
        .iter()
        .filter(|s| recipe_ingredients.iter().any(|r| ingredients_overlap(s, r)))
        .count();

    matched as f64 / selection.len() as f64
}

/// Whether `ingredients` lists `selected` verbatim (ignoring case) or by alias.
pub fn covers(ingredients: &[String], selected: &str) -> bool {
    let s = normalize(selected);
    ingredients.iter().any(|r| {
        let r = normalize(r);
        r == s || alias_match(&r, &s)
    })
}

/// Append every selected ingredient the list does not already cover.
pub fn union_selection(ingredients: &mut Vec<String>, selected: &[String]) {
    for item in selected {
        if item.trim().is_empty() {
            continue;
        }
        if !covers(ingredients, item) {
            ingredients.push(item.trim().to_string());
        }
    }
}

pub fn is_seasoning(name: &str) -> bool {
    let n = normalize(name);
    SEASONINGS.iter().any(|s| *s == n)
}

/// Selected ingredients that are not plain seasonings, in selection order.
pub fn primary_ingredients(selected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in selected {
        let trimmed = item.trim();
        if trimmed.is_empty() || is_seasoning(trimmed) {
            continue;
        }
        if !out.iter().any(|o| o.eq_ignore_ascii_case(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Primary recipe ingredients that nothing in the selection satisfies.
pub fn missing_ingredients(selected: &[String], recipe_ingredients: &[String]) -> Vec<String> {
    recipe_ingredients
        .iter()
        .filter(|r| !is_seasoning(r))
        .filter(|r| !selected.iter().any(|s| ingredients_overlap(s, r)))
        .cloned()
        .collect()
}

fn slot(dish: DishType) -> usize {
    match dish {
        DishType::SoupStew => 0,
        DishType::ColdSalad => 1,
        DishType::StirFry => 2,
        DishType::Steamed => 3,
        DishType::Grilled => 4,
    }
}

/// Raw per-type scores, in `DishType::ALL` order.
pub fn dish_type_scores(ingredients: &[String]) -> [(DishType, f64); 5] {
    let items = normalize_selection(ingredients);
    let mut scores = [0.0_f64; 5];

    for ing in &items {
        let mut matched = false;

        for dish in DishType::ALL {
            let hit = dish
                .keywords()
                .iter()
                .any(|kw| mentions(ing, kw) || mentions(kw, ing));
            if !hit {
                continue;
            }

            matched = true;
            scores[slot(*dish)] += 1.0;

            if *dish == DishType::StirFry && STIR_FRY_STAPLES.contains(&ing.as_str()) {
                scores[slot(*dish)] += 0.5;
            }
            if *dish == DishType::SoupStew && MEDICINAL.contains(&ing.as_str()) {
                scores[slot(*dish)] += 2.0;
            }
        }

        if !matched {
            scores[slot(DishType::StirFry)] += 1.0;
        }
    }

    let has_any = |table: &[&str]| {
        items
            .iter()
            .any(|ing| table.iter().any(|kw| mentions(ing, kw)))
    };

    if has_any(MEATS) && has_any(VEGETABLES) {
        scores[slot(DishType::StirFry)] += 2.0;
        scores[slot(DishType::SoupStew)] -= 1.0;
    }

    if has_any(SOUP_BASES) {
        scores[slot(DishType::SoupStew)] += 3.0;
    }

    if !items.is_empty() && items.len() <= 2 {
        let all_cold = items
            .iter()
            .all(|ing| COLD_VEGETABLES.iter().any(|kw| mentions(ing, kw)));
        if all_cold {
            scores[slot(DishType::ColdSalad)] += 1.0;
        } else {
            scores[slot(DishType::StirFry)] += 1.0;
        }
    }

    let mut out = [(DishType::StirFry, 0.0); 5];
    for (i, dish) in DishType::ALL.iter().enumerate() {
        out[i] = (*dish, scores[i]);
    }
    out
}

/// Classify a loose ingredient set into one cooking style.
///
/// Ties go to the earlier type in `DishType::ALL`; all-zero scores give a
/// stir-fry.
pub fn classify_dish_type(ingredients: &[String]) -> DishType {
    let scores = dish_type_scores(ingredients);

    if scores.iter().all(|(_, score)| *score == 0.0) {
        return DishType::StirFry;
    }

    let mut best = scores[0];
    for candidate in scores.iter().skip(1) {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }

    tracing::debug!(
        dish_type = best.0.as_str(),
        score = best.1,
        ingredients = ?ingredients,
        "Classified dish type"
    );
    best.0
}
