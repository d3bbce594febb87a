use std::collections::HashSet;

use crate::error::{CostingError, Result};
use crate::models::{ClientIngredientPrice, Dish, Ingredient, RecipeLine};
use crate::storage::CostingStore;

/// In-memory store with the same replace semantics as the JSON store.
///
/// Used by the test suites; `fail_saves` simulates a persistence outage so
/// the unit-of-work behavior of the aggregator can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub ingredients: Vec<Ingredient>,
    pub client_prices: Vec<ClientIngredientPrice>,
    pub recipe_lines: Vec<RecipeLine>,
    pub dishes: Vec<Dish>,
    pub fail_saves: bool,
    /// Dish ids whose saves fail, for partial fan-out scenarios.
    pub fail_dish_saves: Vec<u32>,
    /// Allow this many more saves, then fail every one after.
    pub fail_saves_after: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_writable(&mut self) -> Result<()> {
        if self.fail_saves {
            return Err(CostingError::Persistence(
                "simulated write failure".to_string(),
            ));
        }
        if let Some(remaining) = self.fail_saves_after {
            if remaining == 0 {
                return Err(CostingError::Persistence(
                    "simulated write failure".to_string(),
                ));
            }
            self.fail_saves_after = Some(remaining - 1);
        }
        Ok(())
    }
}

impl CostingStore for MemoryStore {
    fn ingredient(&self, ingredient_id: u32) -> Result<Ingredient> {
        self.ingredients
            .iter()
            .find(|i| i.id == ingredient_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("ingredient {}", ingredient_id)))
    }

    fn ingredients(&self) -> Result<Vec<Ingredient>> {
        Ok(self.ingredients.clone())
    }

    fn ingredient_price(&self, client_id: u32, ingredient_id: u32) -> Result<ClientIngredientPrice> {
        self.client_prices
            .iter()
            .find(|p| p.client_id == client_id && p.ingredient_id == ingredient_id)
            .cloned()
            .ok_or_else(|| {
                CostingError::NotFound(format!(
                    "price for ingredient {} / client {}",
                    ingredient_id, client_id
                ))
            })
    }

    fn save_ingredient_price(&mut self, price: ClientIngredientPrice) -> Result<()> {
        self.check_writable()?;
        match self
            .client_prices
            .iter_mut()
            .find(|p| p.client_id == price.client_id && p.ingredient_id == price.ingredient_id)
        {
            Some(existing) => *existing = price,
            None => self.client_prices.push(price),
        }
        Ok(())
    }

    fn recipe_line(&self, line_id: u32) -> Result<RecipeLine> {
        self.recipe_lines
            .iter()
            .find(|l| l.id == line_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("recipe line {}", line_id)))
    }

    fn recipe_lines(&self, dish_id: u32) -> Result<Vec<RecipeLine>> {
        Ok(self
            .recipe_lines
            .iter()
            .filter(|l| l.dish_id == dish_id)
            .cloned()
            .collect())
    }

    fn client_recipe_lines(&self, client_id: u32) -> Result<Vec<RecipeLine>> {
        let client_dishes: HashSet<u32> = self
            .dishes
            .iter()
            .filter(|d| d.client_id == client_id)
            .map(|d| d.id)
            .collect();

        Ok(self
            .recipe_lines
            .iter()
            .filter(|l| client_dishes.contains(&l.dish_id))
            .cloned()
            .collect())
    }

    fn save_recipe_lines(&mut self, dish_id: u32, lines: Vec<RecipeLine>) -> Result<()> {
        self.check_writable()?;
        self.recipe_lines.retain(|l| l.dish_id != dish_id);
        self.recipe_lines.extend(lines);
        Ok(())
    }

    fn dish(&self, dish_id: u32) -> Result<Dish> {
        self.dishes
            .iter()
            .find(|d| d.id == dish_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("dish {}", dish_id)))
    }

    fn dishes_for_client(&self, client_id: u32) -> Result<Vec<Dish>> {
        Ok(self
            .dishes
            .iter()
            .filter(|d| d.client_id == client_id)
            .cloned()
            .collect())
    }

    fn save_dish(&mut self, dish: Dish) -> Result<()> {
        self.check_writable()?;
        if self.fail_dish_saves.contains(&dish.id) {
            return Err(CostingError::Persistence(format!(
                "simulated write failure for dish {}",
                dish.id
            )));
        }
        match self.dishes.iter_mut().find(|d| d.id == dish.id) {
            Some(existing) => *existing = dish,
            None => self.dishes.push(dish),
        }
        Ok(())
    }

    fn next_line_id(&self) -> Result<u32> {
        Ok(self.recipe_lines.iter().map(|l| l.id).max().unwrap_or(0) + 1)
    }
}
