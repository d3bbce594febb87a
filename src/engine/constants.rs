/// Target food-cost ratio behind the recommended price (28% of sale price).
pub const TARGET_FOOD_COST_RATIO: f64 = 0.28;

/// Markup applied to the sale price when a dish has no costed lines yet.
pub const FALLBACK_PRICE_MARKUP: f64 = 1.5;

/// Highest shrinkage a client price may carry. Above this the gross
/// quantity explodes and the data is almost certainly a typo.
pub const MAX_SHRINKAGE_PCT: f64 = 95.0;

/// Yield applied to sub-recipe lines. A finished sub-preparation already
/// absorbed its own shrinkage, so none is applied again.
pub const SUBRECIPE_YIELD_PCT: f64 = 100.0;

/// Deviation from market price (either direction) that triggers an alert.
pub const DEVIATION_ALERT_PCT: f64 = 10.0;

/// Minimum jaro-winkler score for a fuzzy ingredient-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;
