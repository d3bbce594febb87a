pub mod cli;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod storage;

pub use error::{CostingError, Result};
pub use models::{ClientIngredientPrice, Dish, Ingredient, IngredientRef, Quadrant, RecipeLine};
