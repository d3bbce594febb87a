use serde::{Deserialize, Serialize};

use crate::engine::constants::MAX_SHRINKAGE_PCT;

/// A purchasable raw material from the master ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "Id")]
    pub id: u32,

    #[serde(rename = "Name")]
    pub name: String,

    /// Unit of purchase (kg, l, unit...).
    #[serde(rename = "Unit")]
    pub unit: String,

    /// Average market price per unit, used as the reference for deviation.
    #[serde(rename = "MarketPrice")]
    pub market_price: f64,
}

impl Ingredient {
    pub fn is_valid(&self) -> bool {
        self.market_price >= 0.0
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A client-specific price for an ingredient, plus its shrinkage.
///
/// Created when an ingredient is assigned to a client; every edit must be
/// followed by a fan-out recalculation of the recipe lines referencing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientIngredientPrice {
    #[serde(rename = "ClientId")]
    pub client_id: u32,

    #[serde(rename = "IngredientId")]
    pub ingredient_id: u32,

    #[serde(rename = "Unit")]
    pub unit: String,

    /// Price the client actually pays per unit.
    #[serde(rename = "UnitCost")]
    pub unit_cost: f64,

    /// Percentage of the purchased quantity lost to trim/waste/cooking.
    #[serde(rename = "ShrinkagePct")]
    pub shrinkage_pct: f64,

    /// Market reference price at assignment time.
    #[serde(rename = "MarketPrice")]
    pub market_price: f64,
}

impl ClientIngredientPrice {
    /// Fraction of the purchased quantity that reaches the plate.
    #[inline]
    pub fn yield_pct(&self) -> f64 {
        100.0 - self.shrinkage_pct
    }

    /// Deviation of the client price from the market reference, in percent.
    /// Zero when no market reference is known.
    pub fn deviation_pct(&self) -> f64 {
        if self.market_price > 0.0 {
            (self.unit_cost - self.market_price) / self.market_price * 100.0
        } else {
            0.0
        }
    }

    /// Basic validation: non-negative cost, shrinkage within the allowed cap.
    pub fn is_valid(&self) -> bool {
        self.unit_cost >= 0.0
            && self.shrinkage_pct >= 0.0
            && self.shrinkage_pct <= MAX_SHRINKAGE_PCT
    }
}
