pub mod ai;
pub mod catalog;
pub mod dish_type;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod matcher;
pub mod scorer;
pub mod session;
pub mod types;

pub use ai::{AiConfig, Gateway, GatewayError, LocalTemplates, RecipeDraft};
pub use catalog::RecipeCatalog;
pub use dish_type::DishType;
pub use error::{CatalogError, RecommendError};
pub use matcher::{classify_dish_type, match_ratio};
pub use scorer::{preference_score, rank_candidates, Recommender, DEFAULT_MATCH_THRESHOLD};
pub use session::{JsonDirStore, MemoryStore, Session, SessionError, StateStore};
pub use types::{
    Difficulty, FlavorProfile, GeneratedRecipe, PartialFlavorProfile, RecipeOrigin, RecipeRecord,
    ScoredCandidate, UserPreferences,
};
