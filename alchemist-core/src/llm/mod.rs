//! LLM provider abstraction for recipe enrichment.
//!
//! This module provides a trait-based abstraction over chat-completion
//! providers, with a fake provider for testing.

mod chat;
mod fake;

pub use chat::ChatCompletionsProvider;
pub use fake::FakeProvider;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::ai::{AiConfig, ProviderKind};

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    #[error("No response within {0:?}")]
    Timeout(Duration),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is responsible
/// for making API calls and returning the model's text response.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Get the provider name (e.g., "openai", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "glm-4-flash").
    fn model_name(&self) -> &str;
}

/// Build the provider selected by the configuration.
pub fn create_provider(config: &AiConfig) -> Arc<dyn LlmProvider> {
    match config.provider {
        ProviderKind::OpenAi => Arc::new(ChatCompletionsProvider::new(config)),
        ProviderKind::Fake => Arc::new(FakeProvider::with_enrichment_responses()),
    }
}
