use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Recipe {0} has no ingredients or no steps")]
    IncompleteRecipe(String),

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecommendError {
    #[error("No ingredients selected")]
    InvalidInput,
}
