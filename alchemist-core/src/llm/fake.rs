//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered substring,
/// in registration order. If no match is found, returns a default response or error.
#[derive(Debug)]
pub struct FakeProvider {
    /// Ordered (prompt substring, response) pairs
    responses: Vec<(String, String)>,
    /// Default response if no match found
    default_response: Option<String>,
    /// Artificial latency applied before answering
    delay: Option<Duration>,
    /// Every prompt received, in order
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            default_response: Some("{}".to_string()),
            ..Self::new()
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_response: None,
            delay: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Sleep for `delay` before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of prompts received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Create a FakeProvider with standard responses for the three prompt kinds.
    pub fn with_enrichment_responses() -> Self {
        let mut provider = Self::new();

        provider.add_response(
            "creative dish namer",
            "Golden Harvest Plate",
        );

        provider.add_response(
            "food writer",
            "Warm, bright and comforting, the kind of plate that makes a weeknight feel like a small celebration.",
        );

        provider.add_response(
            "Return JSON",
            r#"{
                "name": "House Special",
                "description": "A quick dish built from what is in the fridge.",
                "steps": ["Prepare everything", "Cook it together", "Season and serve"],
                "flavorProfile": {"savory": 4, "sweet": 2, "sour": 2, "spicy": 2, "umami": 4, "bitter": 1},
                "cookingTime": 20,
                "difficulty": "easy",
                "category": ["home-style"]
            }"#,
        );

        provider.add_response("connection test", "connection ok");

        provider
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
