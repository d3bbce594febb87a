use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostingError {
    #[error("Invalid shrinkage: {0}% (must be below 100%)")]
    InvalidShrinkage(f64),

    #[error("Ingredient '{ingredient}' is already on dish {dish}; edit the existing line instead")]
    DuplicateIngredient { dish: u32, ingredient: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CostingError>;
