use crate::error::{CostingError, Result};

/// Result of costing one recipe line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineComputation {
    /// As-purchased quantity, net divided by the surviving fraction.
    pub gross_quantity: f64,
    pub line_cost: f64,
}

/// Convert a net (as-served) quantity into the gross (as-purchased)
/// quantity and its cost, accounting for shrinkage.
///
/// `gross = net / (yield / 100)` where `yield = 100 - shrinkage`.
pub fn compute_gross(
    net_quantity: f64,
    shrinkage_pct: f64,
    unit_cost: f64,
) -> Result<LineComputation> {
    if !(0.0..100.0).contains(&shrinkage_pct) {
        return Err(CostingError::InvalidShrinkage(shrinkage_pct));
    }
    if net_quantity <= 0.0 {
        return Err(CostingError::InvalidInput(format!(
            "net quantity must be positive, got {}",
            net_quantity
        )));
    }
    if unit_cost < 0.0 {
        return Err(CostingError::InvalidInput(format!(
            "unit cost must not be negative, got {}",
            unit_cost
        )));
    }

    let yield_pct = 100.0 - shrinkage_pct;
    let gross_quantity = net_quantity / (yield_pct / 100.0);
    let line_cost = gross_quantity * unit_cost;

    Ok(LineComputation {
        gross_quantity,
        line_cost,
    })
}
