//! AI enrichment: configuration, prompts, the call gateway and local fallbacks.
//!
//! This module provides:
//! - `AiConfig` loaded from environment variables
//! - `Gateway`, which turns prompts into validated names, stories and recipe drafts
//! - `LocalTemplates`, the offline generators used when the gateway fails
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `ALCHEMIST_AI_API_KEY` (optional): Bearer token for the chat-completion service
//! - `ALCHEMIST_AI_MODEL` (optional): Model name, e.g., "glm-4-flash"
//! - `ALCHEMIST_AI_BASE_URL` (optional): API base URL
//! - `ALCHEMIST_AI_TIMEOUT_SECS` (optional): Per-call timeout in seconds
//! - `ALCHEMIST_AI_PROVIDER` (optional): "openai" or "fake"
//!
//! # Example
//!
//! ```ignore
//! use alchemist_core::ai::{AiConfig, Gateway};
//!
//! let config = AiConfig::from_env()?;
//! let gateway = Gateway::from_config(&config);
//! gateway.ping().await?;
//! ```

mod config;
mod gateway;
pub mod prompts;
mod templates;
pub mod validate;

pub use config::{AiConfig, ConfigError, ProviderKind};
pub use gateway::{extract_json_object, parse_recipe_draft, Gateway, GatewayError, RecipeDraft};
pub use templates::LocalTemplates;
