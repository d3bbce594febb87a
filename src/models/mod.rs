mod dish;
mod ingredient;
mod recipe;

pub use dish::Dish;
pub use ingredient::{ClientIngredientPrice, Ingredient};
pub use recipe::{IngredientRef, RecipeLine};

pub use crate::engine::classifier::Quadrant;
