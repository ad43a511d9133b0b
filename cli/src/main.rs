mod display;

use alchemist_core::{
    AiConfig, Difficulty, Gateway, JsonDirStore, PartialFlavorProfile, RecipeCatalog, Recommender,
    Session, UserPreferences,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "alchemist")]
#[command(about = "Flavor Alchemist: recipes from whatever is in your fridge", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every ingredient in the recipe book
    Ingredients {
        /// Group ingredients by kind
        #[arg(long)]
        groups: bool,
    },
    /// Recommend a recipe for the given (or currently selected) ingredients
    Recommend {
        /// Ingredients to use; defaults to the saved selection
        ingredients: Vec<String>,
        /// Flavor preference as axis=value, e.g. spicy=4 (repeatable)
        #[arg(long = "flavor", value_name = "AXIS=VALUE")]
        flavors: Vec<String>,
        /// Preferred cooking time in minutes
        #[arg(long)]
        time: Option<u32>,
        /// Preferred difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Show a recipe by id
    Show { id: String },
    /// Pick a random recipe
    Random,
    /// List recipes in a category
    Category { tag: String },
    /// Toggle ingredients in the saved selection
    Select {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Clear the saved selection
    Clear,
    /// Toggle a recipe as favorite
    Favorite { id: String },
    /// List favorite recipes
    Favorites,
    /// Show recent recommendations, newest first
    History,
    /// Check that the AI service is reachable
    Ping,
}

fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn parse_preferences(
    flavors: &[String],
    time: Option<u32>,
    difficulty: Option<&str>,
) -> Result<Option<UserPreferences>> {
    let mut flavor = PartialFlavorProfile::default();
    for entry in flavors {
        let (axis, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected AXIS=VALUE, got {:?}", entry))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid flavor value in {:?}", entry))?;
        if !value.is_finite() {
            bail!("Flavor value must be a finite number, got {:?}", entry);
        }
        if !flavor.set(axis.trim(), value) {
            bail!("Unknown flavor axis {:?}", axis.trim());
        }
    }

    let difficulty = match difficulty {
        Some(d) => Some(Difficulty::from_str(d).ok_or_else(|| anyhow!("Unknown difficulty {:?}", d))?),
        None => None,
    };

    if flavors.is_empty() && time.is_none() && difficulty.is_none() {
        return Ok(None);
    }

    Ok(Some(UserPreferences {
        flavor: (!flavors.is_empty()).then_some(flavor),
        cooking_time: time,
        difficulty,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AiConfig::from_env().context("Invalid AI configuration")?;
    tracing::debug!(
        provider = ?config.provider,
        model = %config.model,
        state_dir = %config.state_dir.display(),
        has_api_key = config.api_key.is_some(),
        "Loaded configuration"
    );

    let catalog = RecipeCatalog::builtin();
    let recommender = Recommender::new(catalog.clone(), Gateway::from_config(&config));
    let mut session = Session::load(JsonDirStore::new(&config.state_dir));
    let json = cli.json;

    match cli.command {
        Commands::Ingredients { groups } => {
            if groups {
                display::print_groups(catalog.ingredient_groups(), json)?;
            } else {
                display::print_list(&catalog.all_ingredients(), json)?;
            }
        }
        Commands::Recommend {
            ingredients,
            flavors,
            time,
            difficulty,
        } => {
            let prefs = parse_preferences(&flavors, time, difficulty.as_deref())?;
            let selection = if ingredients.is_empty() {
                session.selected().to_vec()
            } else {
                ingredients
            };

            let recipe = recommender
                .recommend(&selection, prefs.as_ref())
                .await
                .context("Pick some ingredients first (alchemist select <ingredient>)")?;
            session.record_result(recipe.clone())?;
            display::print_recipe(&recipe, session.is_favorite(recipe.id()), json)?;
        }
        Commands::Show { id } => {
            let recipe = match session.find(&id) {
                Some(recipe) => recipe.clone(),
                None => recommender
                    .recipe_by_id(&id)
                    .await
                    .ok_or_else(|| anyhow!("No recipe with id {}", id))?,
            };
            display::print_recipe(&recipe, session.is_favorite(recipe.id()), json)?;
        }
        Commands::Random => {
            let recipe = recommender
                .random_recipe(&mut rand::thread_rng())
                .await
                .ok_or_else(|| anyhow!("The recipe book is empty"))?;
            session.record_result(recipe.clone())?;
            display::print_recipe(&recipe, session.is_favorite(recipe.id()), json)?;
        }
        Commands::Category { tag } => {
            let recipes = recommender.recipes_in_category(&tag).await;
            display::print_summaries(&recipes, json)?;
        }
        Commands::Select { ingredients } => {
            for ingredient in &ingredients {
                session.toggle_ingredient(ingredient)?;
            }
            display::print_list(session.selected(), json)?;
        }
        Commands::Clear => {
            session.clear_ingredients()?;
            display::print_list(session.selected(), json)?;
        }
        Commands::Favorite { id } => {
            let recipe = match session.find(&id) {
                Some(recipe) => recipe.clone(),
                None => recommender
                    .recipe_by_id(&id)
                    .await
                    .ok_or_else(|| anyhow!("No recipe with id {}", id))?,
            };
            let now_favorite = session.toggle_favorite(&recipe)?;
            if now_favorite {
                println!("Added {} to favorites", recipe.display_name);
            } else {
                println!("Removed {} from favorites", recipe.display_name);
            }
        }
        Commands::Favorites => {
            display::print_summaries(session.favorites(), json)?;
        }
        Commands::History => {
            display::print_summaries(session.history(), json)?;
        }
        Commands::Ping => {
            let provider = recommender.gateway().provider();
            recommender
                .gateway()
                .ping()
                .await
                .with_context(|| format!("{} ({}) is not reachable", provider.provider_name(), provider.model_name()))?;
            println!("{} ({}) is reachable", provider.provider_name(), provider.model_name());
        }
    }

    Ok(())
}
