use crate::error::Result;
use crate::models::{ClientIngredientPrice, Dish, Ingredient, RecipeLine};

/// Narrow persistence interface the costing engine works against.
///
/// Reads return current state, writes are full replacements of the entity
/// (or of a dish's whole line set). Read-modify-write is not atomic across
/// processes: the backing store replaces whole collections on save, so
/// callers should re-read fresh data right before mutating.
pub trait CostingStore {
    /// Master ingredient record. `NotFound` if the id is unknown.
    fn ingredient(&self, ingredient_id: u32) -> Result<Ingredient>;

    /// All master ingredients, for name lookups.
    fn ingredients(&self) -> Result<Vec<Ingredient>>;

    /// Client-specific price/shrinkage. `NotFound` when the ingredient is
    /// not assigned to the client.
    fn ingredient_price(&self, client_id: u32, ingredient_id: u32) -> Result<ClientIngredientPrice>;

    fn save_ingredient_price(&mut self, price: ClientIngredientPrice) -> Result<()>;

    /// Current total cost of a dish used as a sub-recipe.
    fn subrecipe_cost(&self, dish_id: u32) -> Result<f64> {
        self.dish(dish_id).map(|d| d.total_cost)
    }

    fn recipe_line(&self, line_id: u32) -> Result<RecipeLine>;

    fn recipe_lines(&self, dish_id: u32) -> Result<Vec<RecipeLine>>;

    /// Every recipe line across every dish of the client, for fan-out scans.
    fn client_recipe_lines(&self, client_id: u32) -> Result<Vec<RecipeLine>>;

    /// Replace a dish's entire line set.
    fn save_recipe_lines(&mut self, dish_id: u32, lines: Vec<RecipeLine>) -> Result<()>;

    fn dish(&self, dish_id: u32) -> Result<Dish>;

    fn dishes_for_client(&self, client_id: u32) -> Result<Vec<Dish>>;

    fn save_dish(&mut self, dish: Dish) -> Result<()>;

    /// Next free recipe-line id.
    fn next_line_id(&self) -> Result<u32>;
}
