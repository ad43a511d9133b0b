//! The single entry point for every model call.
//!
//! Each call builds one prompt, sends one request, and is bounded by a
//! wall-clock timeout. Failures are typed; callers decide the fallback.

use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info_span, Instrument};

use crate::ai::prompts::creative_name::{render_creative_name_prompt, CREATIVE_NAME_PROMPT_NAME};
use crate::ai::prompts::dish_recipe::{render_dish_recipe_prompt, DISH_RECIPE_PROMPT_NAME};
use crate::ai::prompts::flavor_story::{render_flavor_story_prompt, FLAVOR_STORY_PROMPT_NAME};
use crate::ai::validate::{clean_story, validate_creative_name};
use crate::ai::AiConfig;
use crate::dish_type::DishType;
use crate::llm::{create_provider, LlmError, LlmProvider};
use crate::types::{Difficulty, FlavorProfile, RecipeRecord};

const PING_PROMPT_NAME: &str = "ping";
const PING_PROMPT: &str = "This is a connection test. Reply with the single word OK.";
const PING_TOKEN: &str = "ok";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("AI generation unavailable: {0}")]
    Unavailable(#[from] LlmError),

    #[error("Malformed AI output: {0}")]
    Malformed(String),
}

/// Recipe as proposed by the model, before any repair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(alias = "originalName")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub flavor_profile: Option<FlavorProfile>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Vec<String>,
}

/// Unknown difficulty words are dropped rather than failing the whole draft.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Difficulty::from_str))
}

/// The JSON object inside a reply, with any markdown code fence removed.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let mut text = reply.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string ("json") on the opening fence line.
        text = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        text = text.trim_end().strip_suffix("```").unwrap_or(text).trim();
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Parse a recipe reply against the strict draft schema.
pub fn parse_recipe_draft(reply: &str) -> Result<RecipeDraft, GatewayError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| GatewayError::Malformed("No JSON object in reply".to_string()))?;

    let mut draft: RecipeDraft = serde_json::from_str(json)
        .map_err(|e| GatewayError::Malformed(format!("Recipe reply does not match schema: {}", e)))?;

    draft.name = draft.name.trim().to_string();
    if draft.name.is_empty() {
        return Err(GatewayError::Malformed("Recipe reply has an empty name".to_string()));
    }
    draft.steps.retain(|s| !s.trim().is_empty());
    draft.ingredients.retain(|i| !i.trim().is_empty());

    Ok(draft)
}

/// Model-backed name, story and recipe generation.
#[derive(Debug, Clone)]
pub struct Gateway {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl Gateway {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(create_provider(config), config.timeout)
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    async fn complete(&self, prompt_name: &'static str, prompt: &str) -> Result<String, GatewayError> {
        let span = info_span!(
            "llm_call",
            prompt = prompt_name,
            provider = self.provider.provider_name(),
            model = %self.provider.model_name()
        );
        self.timed_completion(prompt).instrument(span).await
    }

    async fn timed_completion(&self, prompt: &str) -> Result<String, GatewayError> {
        let reply = tokio::time::timeout(self.timeout, self.provider.complete(prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        if reply.trim().is_empty() {
            return Err(LlmError::EmptyCompletion.into());
        }

        tracing::debug!(chars = reply.len(), "Completion received");
        Ok(reply)
    }

    /// A creative display name, or the canonical name when the candidate fails validation.
    pub async fn generate_name(
        &self,
        recipe: &RecipeRecord,
        selected: &[String],
        dish_type: Option<DishType>,
    ) -> Result<String, GatewayError> {
        let prompt = render_creative_name_prompt(recipe, selected, dish_type);
        let reply = self.complete(CREATIVE_NAME_PROMPT_NAME, &prompt).await?;
        Ok(validate_creative_name(&reply, &recipe.name, selected))
    }

    /// A short narrative about the dish.
    pub async fn generate_story(
        &self,
        recipe: &RecipeRecord,
        selected: &[String],
        dish_type: Option<DishType>,
    ) -> Result<String, GatewayError> {
        let prompt = render_flavor_story_prompt(recipe, selected, dish_type);
        let reply = self.complete(FLAVOR_STORY_PROMPT_NAME, &prompt).await?;

        let story = clean_story(&reply);
        if story.is_empty() {
            return Err(GatewayError::Malformed("Story reply has no text".to_string()));
        }
        Ok(story)
    }

    /// Ask the model to invent a recipe of the given type.
    pub async fn generate_recipe(
        &self,
        ingredients: &[String],
        dish_type: DishType,
    ) -> Result<RecipeDraft, GatewayError> {
        let prompt = render_dish_recipe_prompt(ingredients, dish_type);
        let reply = self.complete(DISH_RECIPE_PROMPT_NAME, &prompt).await?;
        parse_recipe_draft(&reply)
    }

    /// Round-trip a trivial prompt to check credentials and connectivity.
    ///
    /// Succeeds only when the reply contains the word OK.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        let reply = self.complete(PING_PROMPT_NAME, PING_PROMPT).await?;
        let acknowledged = reply
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.eq_ignore_ascii_case(PING_TOKEN));

        if !acknowledged {
            tracing::warn!(reply = %reply, "Unexpected connection test reply");
            return Err(GatewayError::Malformed(format!(
                "Connection test reply did not acknowledge: {}",
                reply.trim()
            )));
        }
        Ok(())
    }
}
