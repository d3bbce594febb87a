use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CostingError, Result};
use crate::models::{ClientIngredientPrice, Dish, Ingredient, RecipeLine};
use crate::storage::CostingStore;

/// Everything the tool persists, mirroring the sheets of the operations
/// workbook it replaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkbookState {
    #[serde(rename = "Ingredients", default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(rename = "ClientPrices", default)]
    pub client_prices: Vec<ClientIngredientPrice>,

    #[serde(rename = "RecipeLines", default)]
    pub recipe_lines: Vec<RecipeLine>,

    #[serde(rename = "Dishes", default)]
    pub dishes: Vec<Dish>,
}

/// File-backed store: the whole state lives in one JSON document and every
/// save rewrites the whole file, like replacing a sheet in the workbook.
/// Two concurrent writers race at file level; last write wins.
pub struct JsonStore {
    path: PathBuf,
    state: WorkbookState,
}

impl JsonStore {
    /// Load the state file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let state: WorkbookState = serde_json::from_str(&content)?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            state,
        })
    }

    /// Create an empty store that will persist to `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: WorkbookState::default(),
        }
    }

    pub fn state(&self) -> &WorkbookState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WorkbookState {
        &mut self.state
    }

    /// Rewrite the whole state file.
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json)
            .map_err(|e| CostingError::Persistence(format!("{}: {}", self.path.display(), e)))
    }
}

impl CostingStore for JsonStore {
    fn ingredient(&self, ingredient_id: u32) -> Result<Ingredient> {
        self.state
            .ingredients
            .iter()
            .find(|i| i.id == ingredient_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("ingredient {}", ingredient_id)))
    }

    fn ingredients(&self) -> Result<Vec<Ingredient>> {
        Ok(self.state.ingredients.clone())
    }

    fn ingredient_price(&self, client_id: u32, ingredient_id: u32) -> Result<ClientIngredientPrice> {
        self.state
            .client_prices
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
        match self
            .state
            .client_prices
            .iter_mut()
            .find(|p| p.client_id == price.client_id && p.ingredient_id == price.ingredient_id)
        {
            Some(existing) => *existing = price,
            None => self.state.client_prices.push(price),
        }
        self.persist()
    }

    fn recipe_line(&self, line_id: u32) -> Result<RecipeLine> {
        self.state
            .recipe_lines
            .iter()
            .find(|l| l.id == line_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("recipe line {}", line_id)))
    }

    fn recipe_lines(&self, dish_id: u32) -> Result<Vec<RecipeLine>> {
        Ok(self
            .state
            .recipe_lines
            .iter()
            .filter(|l| l.dish_id == dish_id)
            .cloned()
            .collect())
    }

    fn client_recipe_lines(&self, client_id: u32) -> Result<Vec<RecipeLine>> {
        let client_dishes: HashSet<u32> = self
            .state
            .dishes
            .iter()
            .filter(|d| d.client_id == client_id)
            .map(|d| d.id)
            .collect();

        Ok(self
            .state
            .recipe_lines
            .iter()
            .filter(|l| client_dishes.contains(&l.dish_id))
            .cloned()
            .collect())
    }

    fn save_recipe_lines(&mut self, dish_id: u32, lines: Vec<RecipeLine>) -> Result<()> {
        self.state.recipe_lines.retain(|l| l.dish_id != dish_id);
        self.state.recipe_lines.extend(lines);
        self.persist()
    }

    fn dish(&self, dish_id: u32) -> Result<Dish> {
        self.state
            .dishes
            .iter()
            .find(|d| d.id == dish_id)
            .cloned()
            .ok_or_else(|| CostingError::NotFound(format!("dish {}", dish_id)))
    }

    fn dishes_for_client(&self, client_id: u32) -> Result<Vec<Dish>> {
        Ok(self
            .state
            .dishes
            .iter()
            .filter(|d| d.client_id == client_id)
            .cloned()
            .collect())
    }

    fn save_dish(&mut self, dish: Dish) -> Result<()> {
        match self.state.dishes.iter_mut().find(|d| d.id == dish.id) {
            Some(existing) => *existing = dish,
            None => self.state.dishes.push(dish),
        }
        self.persist()
    }

    fn next_line_id(&self) -> Result<u32> {
        Ok(self
            .state
            .recipe_lines
            .iter()
            .map(|l| l.id)
            .max()
            .unwrap_or(0)
            + 1)
    }
}
