//! Terminal and JSON rendering for CLI output.

use alchemist_core::GeneratedRecipe;
use anyhow::Result;
use std::collections::BTreeMap;

pub fn print_list(items: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", item);
    }
    Ok(())
}

pub fn print_groups(groups: &BTreeMap<String, Vec<String>>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(groups)?);
        return Ok(());
    }

    for (group, items) in groups {
        println!("{}: {}", group.replace('_', " "), items.join(", "));
    }
    Ok(())
}

pub fn print_recipe(recipe: &GeneratedRecipe, favorite: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }

    let marker = if favorite { " *" } else { "" };
    println!("{}{}", recipe.display_name, marker);
    if recipe.display_name != recipe.recipe.name {
        println!("  ({})", recipe.recipe.name);
    }
    println!("  id: {}", recipe.id());
    println!("  {}", recipe.recommendation_reason);
    println!(
        "  match {:.0}%{}",
        recipe.match_score * 100.0,
        if recipe.ai_enhanced { ", AI enhanced" } else { "" }
    );

    if let Some(story) = &recipe.story {
        println!();
        println!("  {}", story);
    }

    if !recipe.recipe.description.is_empty() {
        println!();
        println!("  {}", recipe.recipe.description);
    }

    let mut facts = Vec::new();
    if let Some(minutes) = recipe.recipe.cooking_time {
        facts.push(format!("{} min", minutes));
    }
    if let Some(difficulty) = recipe.recipe.difficulty {
        facts.push(difficulty.as_str().to_string());
    }
    if !recipe.recipe.category.is_empty() {
        facts.push(recipe.recipe.category.join(", "));
    }
    if !facts.is_empty() {
        println!("  {}", facts.join(" | "));
    }

    println!();
    println!("Ingredients:");
    for ingredient in &recipe.recipe.ingredients {
        println!("  - {}", ingredient);
    }

    println!();
    println!("Steps:");
    for (i, step) in recipe.recipe.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    Ok(())
}

pub fn print_summaries(recipes: &[GeneratedRecipe], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("(none)");
    }
    for recipe in recipes {
        println!("{:<32} {}", recipe.id(), recipe.display_name);
    }
    Ok(())
}
