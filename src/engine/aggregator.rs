use std::collections::BTreeSet;

use crate::engine::constants::{MAX_SHRINKAGE_PCT, SUBRECIPE_YIELD_PCT};
use crate::engine::yield_calc::compute_gross;
use crate::error::{CostingError, Result};
use crate::models::{ClientIngredientPrice, Dish, IngredientRef, RecipeLine};
use crate::storage::CostingStore;

/// Price/shrinkage snapshot resolved for a recipe line.
struct LineSnapshot {
    name: String,
    unit: String,
    unit_cost: f64,
    yield_pct: f64,
}

/// Outcome of a fan-out recalculation after a price or shrinkage edit.
///
/// Failures are collected per dish instead of aborting on the first one,
/// so the caller can see which dishes still carry stale costs.
#[derive(Debug, Default)]
pub struct FanOutReport {
    pub updated: Vec<u32>,
    pub failed: Vec<(u32, CostingError)>,
}

impl FanOutReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Maintains the invariant that a dish's total cost is the sum of its
/// current recipe lines, and keeps the derived financials in step.
pub struct CostAggregator<'a, S: CostingStore> {
    store: &'a mut S,
}

impl<'a, S: CostingStore> CostAggregator<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Add an ingredient or sub-recipe line to a dish and recalculate it.
    ///
    /// The line snapshots the ingredient's current client price and
    /// shrinkage (sub-recipes snapshot their current total cost at 100%
    /// yield). At most one line per reference per dish; duplicates must be
    /// edited, not re-added.
    pub fn add_line(
        &mut self,
        dish_id: u32,
        reference: IngredientRef,
        net_quantity: f64,
    ) -> Result<RecipeLine> {
        let dish = self.store.dish(dish_id)?;
        let lines = self.store.recipe_lines(dish_id)?;

        let snapshot = self.resolve_snapshot(dish.client_id, reference)?;
        if lines.iter().any(|l| l.reference == reference) {
            return Err(CostingError::DuplicateIngredient {
                dish: dish_id,
                ingredient: snapshot.name,
            });
        }

        let computed = compute_gross(net_quantity, 100.0 - snapshot.yield_pct, snapshot.unit_cost)?;
        let line = RecipeLine {
            id: self.store.next_line_id()?,
            dish_id,
            reference,
            name: snapshot.name,
            net_quantity,
            unit: snapshot.unit,
            unit_cost: snapshot.unit_cost,
            yield_pct: snapshot.yield_pct,
            gross_quantity: computed.gross_quantity,
            line_cost: computed.line_cost,
        };

        let mut updated = lines.clone();
        updated.push(line.clone());
        self.persist_lines_and_recalculate(dish_id, lines, updated)?;

        Ok(line)
    }

    /// Edit a line in place: new quantity, new reference, or both.
    ///
    /// The line is re-snapshotted against the *current* price/shrinkage of
    /// its (possibly new) reference, even when only the quantity changed.
    pub fn update_line(
        &mut self,
        line_id: u32,
        new_net_quantity: Option<f64>,
        new_reference: Option<IngredientRef>,
    ) -> Result<RecipeLine> {
        let old_line = self.store.recipe_line(line_id)?;
        let dish = self.store.dish(old_line.dish_id)?;
        let lines = self.store.recipe_lines(old_line.dish_id)?;

        let reference = new_reference.unwrap_or(old_line.reference);
        let net_quantity = new_net_quantity.unwrap_or(old_line.net_quantity);

        let snapshot = self.resolve_snapshot(dish.client_id, reference)?;
        if reference != old_line.reference
            && lines.iter().any(|l| l.id != line_id && l.reference == reference)
        {
            return Err(CostingError::DuplicateIngredient {
                dish: old_line.dish_id,
                ingredient: snapshot.name,
            });
        }

        let computed = compute_gross(net_quantity, 100.0 - snapshot.yield_pct, snapshot.unit_cost)?;
        let line = RecipeLine {
            id: line_id,
            dish_id: old_line.dish_id,
            reference,
            name: snapshot.name,
            net_quantity,
            unit: snapshot.unit,
            unit_cost: snapshot.unit_cost,
            yield_pct: snapshot.yield_pct,
            gross_quantity: computed.gross_quantity,
            line_cost: computed.line_cost,
        };

        let updated: Vec<RecipeLine> = lines
            .iter()
            .map(|l| if l.id == line_id { line.clone() } else { l.clone() })
            .collect();
        self.persist_lines_and_recalculate(old_line.dish_id, lines, updated)?;

        Ok(line)
    }

    /// Delete a line and recalculate its dish.
    pub fn remove_line(&mut self, line_id: u32) -> Result<()> {
        let line = self.store.recipe_line(line_id)?;
        let lines = self.store.recipe_lines(line.dish_id)?;

        let updated: Vec<RecipeLine> = lines
            .iter()
            .filter(|l| l.id != line_id)
            .cloned()
            .collect();
        self.persist_lines_and_recalculate(line.dish_id, lines, updated)
    }

    /// Recompute a dish's total cost from its current lines and persist all
    /// derived financial fields in a single dish write.
    pub fn recalculate(&mut self, dish_id: u32) -> Result<Dish> {
        let lines = self.store.recipe_lines(dish_id)?;
        let total_cost: f64 = lines.iter().map(|l| l.line_cost).sum();

        let mut dish = self.store.dish(dish_id)?;
        dish.apply_total_cost(total_cost);
        self.store.save_dish(dish.clone())?;
        Ok(dish)
    }

    /// A client price changed: rewrite the snapshot on every line of that
    /// client referencing the ingredient, then recalculate each affected
    /// dish once.
    pub fn on_ingredient_price_changed(
        &mut self,
        client_id: u32,
        ingredient_id: u32,
        new_price: f64,
    ) -> Result<FanOutReport> {
        if new_price < 0.0 {
            return Err(CostingError::InvalidInput(format!(
                "price must not be negative, got {}",
                new_price
            )));
        }

        let mut price = self.store.ingredient_price(client_id, ingredient_id)?;
        price.unit_cost = new_price;
        self.store.save_ingredient_price(price.clone())?;

        self.refresh_affected_lines(client_id, ingredient_id)
    }

    /// A client shrinkage changed: same fan-out as a price change.
    pub fn on_shrinkage_changed(
        &mut self,
        client_id: u32,
        ingredient_id: u32,
        new_shrinkage_pct: f64,
    ) -> Result<FanOutReport> {
        if !(0.0..=MAX_SHRINKAGE_PCT).contains(&new_shrinkage_pct) {
            return Err(CostingError::InvalidInput(format!(
                "shrinkage must be within 0..={}%, got {}",
                MAX_SHRINKAGE_PCT, new_shrinkage_pct
            )));
        }

        let mut price = self.store.ingredient_price(client_id, ingredient_id)?;
        price.shrinkage_pct = new_shrinkage_pct;
        self.store.save_ingredient_price(price.clone())?;

        self.refresh_affected_lines(client_id, ingredient_id)
    }

    /// Look up the current price data for a line's reference.
    fn resolve_snapshot(&self, client_id: u32, reference: IngredientRef) -> Result<LineSnapshot> {
        match reference {
            IngredientRef::Ingredient(ingredient_id) => {
                let ingredient = self.store.ingredient(ingredient_id)?;
                let price = self.store.ingredient_price(client_id, ingredient_id)?;
                let yield_pct = price.yield_pct();
                Ok(LineSnapshot {
                    name: ingredient.name,
                    unit: price.unit,
                    unit_cost: price.unit_cost,
                    yield_pct,
                })
            }
            IngredientRef::SubRecipe(sub_dish_id) => {
                let sub_dish = self.store.dish(sub_dish_id)?;
                let unit_cost = self.store.subrecipe_cost(sub_dish_id)?;
                Ok(LineSnapshot {
                    name: sub_dish.name,
                    unit: "ration".to_string(),
                    unit_cost,
                    yield_pct: SUBRECIPE_YIELD_PCT,
                })
            }
        }
    }

    /// Replace a dish's lines and recalculate. If the recalculation write
    /// fails after the lines were written, the previous lines are restored
    /// so the caller never observes a half-applied change. A failed restore
    /// is reported too, since the dish's lines are then stale on disk.
    fn persist_lines_and_recalculate(
        &mut self,
        dish_id: u32,
        old_lines: Vec<RecipeLine>,
        new_lines: Vec<RecipeLine>,
    ) -> Result<()> {
        self.store.save_recipe_lines(dish_id, new_lines)?;

        if let Err(e) = self.recalculate(dish_id) {
            if let Err(rollback) = self.store.save_recipe_lines(dish_id, old_lines) {
                return Err(CostingError::Persistence(format!(
                    "{}; restoring the previous lines of dish {} also failed ({}), \
                     its stored lines are stale",
                    e, dish_id, rollback
                )));
            }
            return Err(e);
        }
        Ok(())
    }

    /// Rewrite every line of the client that references the ingredient and
    /// recalculate each distinct affected dish exactly once. Per-dish
    /// failures are collected rather than aborting the whole fan-out.
    fn refresh_affected_lines(&mut self, client_id: u32, ingredient_id: u32) -> Result<FanOutReport> {
        let price = self.store.ingredient_price(client_id, ingredient_id)?;
        let target = IngredientRef::Ingredient(ingredient_id);

        let affected: BTreeSet<u32> = self
            .store
            .client_recipe_lines(client_id)?
            .iter()
            .filter(|l| l.reference == target)
            .map(|l| l.dish_id)
            .collect();

        let mut report = FanOutReport::default();
        for dish_id in affected {
            let result = self.refresh_dish_lines(dish_id, target, &price);
            match result {
                Ok(()) => report.updated.push(dish_id),
                Err(e) => report.failed.push((dish_id, e)),
            }
        }
        Ok(report)
    }

    fn refresh_dish_lines(
        &mut self,
        dish_id: u32,
        target: IngredientRef,
        price: &ClientIngredientPrice,
    ) -> Result<()> {
        let lines = self.store.recipe_lines(dish_id)?;
        let mut updated = Vec::with_capacity(lines.len());

        for line in &lines {
            if line.reference != target {
                updated.push(line.clone());
                continue;
            }

            let computed =
                compute_gross(line.net_quantity, price.shrinkage_pct, price.unit_cost)?;
            let mut refreshed = line.clone();
            refreshed.unit_cost = price.unit_cost;
            refreshed.yield_pct = price.yield_pct();
            refreshed.gross_quantity = computed.gross_quantity;
            refreshed.line_cost = computed.line_cost;
            updated.push(refreshed);
        }

        self.persist_lines_and_recalculate(dish_id, lines, updated)
    }
}
