//! End-to-end recommendation tests against the built-in catalog.
//!
//! All AI traffic goes through `FakeProvider`; nothing here touches the network.

use alchemist_core::ai::{Gateway, GatewayError, LocalTemplates};
use alchemist_core::llm::{FakeProvider, LlmError};
use alchemist_core::matcher::{classify_dish_type, covers, match_ratio};
use alchemist_core::{
    DishType, MemoryStore, RecipeCatalog, RecipeOrigin, RecommendError, Recommender, Session,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn recommender(provider: FakeProvider, timeout: Duration) -> Recommender {
    Recommender::new(
        RecipeCatalog::builtin(),
        Gateway::new(Arc::new(provider), timeout),
    )
    .with_templates(LocalTemplates::seeded(2024))
}

/// A classification case loaded from `fixtures/dish_types.json`.
#[derive(Debug, Deserialize)]
struct DishTypeCase {
    ingredients: Vec<String>,
    expected: DishType,
}

#[test]
fn dish_type_fixtures() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dish_types.json");
    let content = fs::read_to_string(&path).expect("Failed to read dish type fixtures");
    let cases: Vec<DishTypeCase> =
        serde_json::from_str(&content).expect("Failed to parse dish type fixtures");

    let mut failures = Vec::new();
    for case in &cases {
        let got = classify_dish_type(&case.ingredients);
        if got != case.expected {
            failures.push(format!(
                "{:?}: expected {:?}, got {:?}",
                case.ingredients, case.expected, got
            ));
        }
    }

    assert!(failures.is_empty(), "Misclassified:\n{}", failures.join("\n"));
}

#[test]
fn match_ratio_stays_in_bounds() {
    let catalog = RecipeCatalog::builtin();
    let selections = [
        list(&["egg"]),
        list(&["egg", "tomato", "salt"]),
        list(&["dragonfruit", "kombucha"]),
        list(&["beef", "potato", "star anise", "unobtainium"]),
        catalog.all_ingredients(),
    ];

    for recipe in catalog.list_all() {
        for selection in &selections {
            let ratio = match_ratio(selection, &recipe.ingredients);
            assert!((0.0..=1.0).contains(&ratio), "{} -> {}", recipe.id, ratio);
        }
        assert_eq!(match_ratio(&recipe.ingredients, &recipe.ingredients), 1.0);
    }
}

#[tokio::test]
async fn tomato_egg_selects_the_stir_fry() {
    let rec = recommender(FakeProvider::with_enrichment_responses(), Duration::from_secs(15));
    let selection = list(&["egg", "tomato", "salt"]);

    let ranked = rec.rank(&selection, None);
    assert_eq!(ranked[0].recipe.id, "recipe-001");
    assert_eq!(ranked[0].match_ratio, 1.0);

    let result = rec.recommend(&selection, None).await.unwrap();
    assert_eq!(result.id(), "recipe-001");
    assert_eq!(result.origin, RecipeOrigin::Catalog);
    assert_eq!(result.match_score, 1.0);
    assert_eq!(result.display_name, "Golden Harvest Plate");
    assert!(result.ai_enhanced);
    assert!(result.story.is_some());
    assert_eq!(
        result.recipe.ingredients,
        list(&["egg", "tomato", "salt", "sugar", "oil", "scallion"])
    );
}

#[tokio::test]
async fn unknown_ingredients_use_ai_synthesis() {
    let rec = recommender(FakeProvider::with_enrichment_responses(), Duration::from_secs(15));
    let selection = list(&["dragonfruit", "kombucha"]);

    let result = rec.recommend(&selection, None).await.unwrap();
    assert_eq!(result.origin, RecipeOrigin::AiGenerated);
    assert_eq!(result.dish_type, Some(DishType::StirFry));
    assert_eq!(result.match_score, 0.7);
    assert!(result.ai_enhanced);

    // The canned draft names neither ingredient, so both name and steps are repaired.
    assert_eq!(result.recipe.name, "dragonfruit stir-fried kombucha");
    assert!(result.recipe.steps.iter().any(|s| s.contains("dragonfruit")));
    assert!(result.recipe.steps.iter().any(|s| s.contains("kombucha")));
    assert!(result.recipe.ingredients.contains(&"dragonfruit".to_string()));
    assert!(result.recipe.ingredients.contains(&"kombucha".to_string()));
}

#[tokio::test]
async fn unknown_ingredients_without_ai_use_local_recipe() {
    let rec = recommender(FakeProvider::new(), Duration::from_secs(15));
    let selection = list(&["dragonfruit", "kombucha"]);

    let result = rec.recommend(&selection, None).await.unwrap();
    assert_eq!(result.origin, RecipeOrigin::LocalFallback);
    assert!(!result.ai_enhanced);
    assert_eq!(result.match_score, 0.6);
    assert_eq!(result.display_name, "dragonfruit stir-fried kombucha");
    assert!(result.recipe.steps[0].contains("dragonfruit, kombucha"));
    assert!(result.id().starts_with("generated-"));
}

#[tokio::test]
async fn malformed_ai_recipe_falls_back_locally() {
    let provider = FakeProvider::with_response("Return JSON", "Sorry, I only write poems.");
    let rec = recommender(provider, Duration::from_secs(15));

    let result = rec.recommend(&list(&["cinnamon", "goji", "jujube"]), None).await.unwrap();
    assert_eq!(result.origin, RecipeOrigin::LocalFallback);
    assert_eq!(result.dish_type, Some(DishType::SoupStew));
    assert_eq!(result.recipe.cooking_time, Some(60));
    assert!(result.display_name.ends_with("soup"));
}

#[tokio::test]
async fn every_selection_is_covered() {
    let rec = recommender(FakeProvider::with_enrichment_responses(), Duration::from_secs(15));
    let selections = [
        list(&["egg", "tomato"]),
        list(&["Tomato", "Egg", "basil"]),
        list(&["aubergine", "garlic", "soy sauce", "minced pork"]),
        list(&["beef", "potato"]),
        list(&["tofu", "ground pork", "sichuan peppercorn"]),
        list(&["dragonfruit", "kombucha"]),
        list(&["salt"]),
    ];

    for selection in &selections {
        let result = rec.recommend(selection, None).await.unwrap();
        assert!(!result.recipe.steps.is_empty());
        for item in selection {
            assert!(
                covers(&result.recipe.ingredients, item),
                "{:?} missing from {} ({:?})",
                item,
                result.id(),
                result.recipe.ingredients
            );
        }
    }
}

#[tokio::test]
async fn empty_selection_is_invalid() {
    let rec = recommender(FakeProvider::with_enrichment_responses(), Duration::from_secs(15));
    assert_eq!(rec.recommend(&[], None).await, Err(RecommendError::InvalidInput));
}

#[tokio::test(start_paused = true)]
async fn hung_gateway_times_out() {
    let provider = FakeProvider::with_enrichment_responses().with_delay(Duration::from_secs(3600));
    let gateway = Gateway::new(Arc::new(provider), Duration::from_secs(15));

    assert!(matches!(
        gateway.ping().await,
        Err(GatewayError::Unavailable(LlmError::Timeout(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn hung_gateway_still_recommends() {
    let provider = FakeProvider::with_enrichment_responses().with_delay(Duration::from_secs(3600));
    let rec = recommender(provider, Duration::from_secs(15));

    let result = rec.recommend(&list(&["egg", "tomato"]), None).await.unwrap();
    assert_eq!(result.id(), "recipe-001");
    assert!(!result.ai_enhanced);
    assert!(result.story.is_some());
}

#[tokio::test]
async fn history_keeps_ten_most_recent() {
    let rec = recommender(FakeProvider::new(), Duration::from_secs(15));
    let mut session = Session::load(MemoryStore::new());
    let mut ids = Vec::new();

    for i in 0..11 {
        let selection = vec![format!("mystery fruit {}", i)];
        let result = rec.recommend(&selection, None).await.unwrap();
        ids.push(result.id().to_string());
        session.record_result(result).unwrap();
    }

    let history: Vec<&str> = session.history().iter().map(|r| r.id()).collect();
    let expected: Vec<&str> = ids.iter().rev().take(10).map(String::as_str).collect();
    assert_eq!(history.len(), 10);
    assert_eq!(history, expected);
}
