use serde::{Deserialize, Serialize};

/// What a recipe line points at: a raw ingredient or another dish used as
/// a sub-recipe (its total cost becomes the unit cost, no shrinkage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientRef {
    Ingredient(u32),
    SubRecipe(u32),
}

impl IngredientRef {
    pub fn is_subrecipe(&self) -> bool {
        matches!(self, IngredientRef::SubRecipe(_))
    }
}

/// One escandallo entry: an ingredient or sub-recipe inside a dish.
///
/// `unit_cost` and `yield_pct` are snapshots taken when the line is created
/// or edited; an explicit price/shrinkage change fans out and rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLine {
    #[serde(rename = "Id")]
    pub id: u32,

    #[serde(rename = "DishId")]
    pub dish_id: u32,

    #[serde(rename = "Ref")]
    pub reference: IngredientRef,

    /// Ingredient/sub-recipe name snapshot for display.
    #[serde(rename = "Name")]
    pub name: String,

    /// As-served quantity the recipe calls for.
    #[serde(rename = "NetQuantity")]
    pub net_quantity: f64,

    #[serde(rename = "Unit")]
    pub unit: String,

    #[serde(rename = "UnitCost")]
    pub unit_cost: f64,

    /// Always 100 for sub-recipe lines.
    #[serde(rename = "YieldPct")]
    pub yield_pct: f64,

    /// As-purchased quantity: net divided by the yield fraction.
    #[serde(rename = "GrossQuantity")]
    pub gross_quantity: f64,

    #[serde(rename = "LineCost")]
    pub line_cost: f64,
}

impl RecipeLine {
    #[inline]
    pub fn shrinkage_pct(&self) -> f64 {
        100.0 - self.yield_pct
    }

    pub fn is_valid(&self) -> bool {
        self.net_quantity > 0.0 && self.yield_pct > 0.0 && self.yield_pct <= 100.0
    }
}
