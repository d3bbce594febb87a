use serde::{Deserialize, Serialize};

use crate::engine::constants::{FALLBACK_PRICE_MARKUP, TARGET_FOOD_COST_RATIO};

/// A sellable menu item (carta entry).
///
/// `total_cost` and the fields below it are derived: they are never edited
/// by hand, only rewritten together by [`Dish::apply_total_cost`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "Id")]
    pub id: u32,

    #[serde(rename = "ClientId")]
    pub client_id: u32,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: String,

    /// Tax-inclusive sale price.
    #[serde(rename = "SalePrice")]
    pub sale_price: f64,

    /// Manually entered monthly sales estimate.
    #[serde(rename = "MonthlySales", default)]
    pub monthly_sales: u32,

    #[serde(rename = "Active", default)]
    pub active: bool,

    #[serde(rename = "TotalCost", default)]
    pub total_cost: f64,

    #[serde(rename = "Margin", default)]
    pub margin: f64,

    #[serde(rename = "MarginPct", default)]
    pub margin_pct: f64,

    #[serde(rename = "FoodCostPct", default)]
    pub food_cost_pct: f64,

    #[serde(rename = "RecommendedPrice", default)]
    pub recommended_price: f64,
}

impl Dish {
    /// Set the total cost and recompute every derived financial field.
    ///
    /// The four derived fields only ever change through this method, so a
    /// reader never sees a total cost paired with stale margins.
    pub fn apply_total_cost(&mut self, total_cost: f64) {
        self.total_cost = total_cost;
        self.margin = self.sale_price - total_cost;

        if self.sale_price > 0.0 {
            self.margin_pct = self.margin / self.sale_price * 100.0;
            self.food_cost_pct = total_cost / self.sale_price * 100.0;
        } else {
            self.margin_pct = 0.0;
            self.food_cost_pct = 0.0;
        }

        self.recommended_price = if total_cost > 0.0 {
            total_cost / TARGET_FOOD_COST_RATIO
        } else {
            self.sale_price * FALLBACK_PRICE_MARKUP
        };
    }

    /// Whether the dish participates in the menu engineering matrix.
    pub fn qualifies_for_matrix(&self) -> bool {
        self.active && self.sale_price > 0.0 && self.total_cost > 0.0 && self.monthly_sales > 0
    }
}
