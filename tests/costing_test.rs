use assert_float_eq::assert_float_absolute_eq;

use menu_costing_rs::engine::CostAggregator;
use menu_costing_rs::error::CostingError;
use menu_costing_rs::models::{ClientIngredientPrice, Dish, Ingredient, IngredientRef};
use menu_costing_rs::storage::{CostingStore, MemoryStore};

fn ingredient(id: u32, name: &str, unit: &str, market_price: f64) -> Ingredient {
    Ingredient {
        id,
        name: name.to_string(),
        unit: unit.to_string(),
        market_price,
    }
}

fn price(
    client_id: u32,
    ingredient_id: u32,
    unit: &str,
    unit_cost: f64,
    shrinkage_pct: f64,
) -> ClientIngredientPrice {
    ClientIngredientPrice {
        client_id,
        ingredient_id,
        unit: unit.to_string(),
        unit_cost,
        shrinkage_pct,
        market_price: unit_cost,
    }
}

fn dish(id: u32, client_id: u32, name: &str, sale_price: f64) -> Dish {
    Dish {
        id,
        client_id,
        name: name.to_string(),
        category: "Mains".to_string(),
        sale_price,
        monthly_sales: 50,
        active: true,
        total_cost: 0.0,
        margin: 0.0,
        margin_pct: 0.0,
        food_cost_pct: 0.0,
        recommended_price: 0.0,
    }
}

/// Beef at 10/kg with 20% shrinkage, Bun at 0.30/unit with none, and an
/// empty Burger dish sold at 12.
fn burger_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.ingredients = vec![
        ingredient(10, "Beef", "kg", 10.0),
        ingredient(11, "Bun", "unit", 0.25),
    ];
    store.client_prices = vec![
        price(1, 10, "kg", 10.0, 20.0),
        price(1, 11, "unit", 0.30, 0.0),
    ];
    store.dishes = vec![dish(100, 1, "Burger", 12.0)];
    store
}

#[test]
fn test_add_line_applies_shrinkage() {
    let mut store = burger_store();

    let line = CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    // 0.5 kg net at 80% yield -> 0.625 kg gross at 10/kg
    assert_float_absolute_eq!(line.gross_quantity, 0.625, 1e-9);
    assert_float_absolute_eq!(line.line_cost, 6.25, 1e-9);
    assert_float_absolute_eq!(line.yield_pct, 80.0, 1e-9);

    let burger = store.dish(100).unwrap();
    assert_float_absolute_eq!(burger.total_cost, 6.25, 1e-9);
}

#[test]
fn test_total_cost_tracks_lines() {
    let mut store = burger_store();

    {
        let mut aggregator = CostAggregator::new(&mut store);
        aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        aggregator
            .add_line(100, IngredientRef::Ingredient(11), 1.0)
            .unwrap();
    }

    let burger = store.dish(100).unwrap();
    assert_float_absolute_eq!(burger.total_cost, 6.55, 1e-9);
    assert_float_absolute_eq!(burger.margin, 5.45, 1e-9);
    assert_float_absolute_eq!(burger.margin_pct, 45.4167, 0.01);
    assert_float_absolute_eq!(burger.food_cost_pct, 54.5833, 0.01);
    assert_float_absolute_eq!(burger.recommended_price, 6.55 / 0.28, 0.01);

    // Aggregation invariant: total equals the sum of the stored lines.
    let line_sum: f64 = store
        .recipe_lines(100)
        .unwrap()
        .iter()
        .map(|l| l.line_cost)
        .sum();
    assert_float_absolute_eq!(burger.total_cost, line_sum, 1e-9);
}

#[test]
fn test_duplicate_ingredient_rejected() {
    let mut store = burger_store();

    CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    let result = CostAggregator::new(&mut store).add_line(100, IngredientRef::Ingredient(10), 0.2);
    assert!(matches!(
        result,
        Err(CostingError::DuplicateIngredient { dish: 100, .. })
    ));

    // Lines and totals are untouched by the rejected add.
    assert_eq!(store.recipe_lines(100).unwrap().len(), 1);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 6.25, 1e-9);
}

#[test]
fn test_update_line_resnapshots_current_price() {
    let mut store = burger_store();
    let line = CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    // Price changes behind the line's back (no fan-out).
    store
        .client_prices
        .iter_mut()
        .find(|p| p.ingredient_id == 10)
        .unwrap()
        .unit_cost = 12.0;

    // A quantity-only edit still picks up the current price.
    let updated = CostAggregator::new(&mut store)
        .update_line(line.id, Some(1.0), None)
        .unwrap();

    assert_float_absolute_eq!(updated.unit_cost, 12.0, 1e-9);
    assert_float_absolute_eq!(updated.gross_quantity, 1.25, 1e-9);
    assert_float_absolute_eq!(updated.line_cost, 15.0, 1e-9);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 15.0, 1e-9);
}

#[test]
fn test_update_line_to_existing_ingredient_is_duplicate() {
    let mut store = burger_store();
    let beef_line;
    {
        let mut aggregator = CostAggregator::new(&mut store);
        beef_line = aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        aggregator
            .add_line(100, IngredientRef::Ingredient(11), 1.0)
            .unwrap();
    }

    let result = CostAggregator::new(&mut store).update_line(
        beef_line.id,
        None,
        Some(IngredientRef::Ingredient(11)),
    );
    assert!(matches!(
        result,
        Err(CostingError::DuplicateIngredient { .. })
    ));
}

#[test]
fn test_remove_line_recalculates() {
    let mut store = burger_store();
    let bun_line;
    {
        let mut aggregator = CostAggregator::new(&mut store);
        aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        bun_line = aggregator
            .add_line(100, IngredientRef::Ingredient(11), 1.0)
            .unwrap();
    }

    CostAggregator::new(&mut store).remove_line(bun_line.id).unwrap();

    assert_eq!(store.recipe_lines(100).unwrap().len(), 1);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 6.25, 1e-9);
}

#[test]
fn test_subrecipe_lines_carry_full_yield() {
    let mut store = burger_store();
    let mut sauce = dish(101, 1, "House Sauce", 0.0);
    sauce.apply_total_cost(2.0);
    store.dishes.push(sauce);

    let line = CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::SubRecipe(101), 1.5)
        .unwrap();

    // No shrinkage on a finished sub-preparation.
    assert_float_absolute_eq!(line.yield_pct, 100.0, 1e-9);
    assert_float_absolute_eq!(line.gross_quantity, 1.5, 1e-9);
    assert_float_absolute_eq!(line.line_cost, 3.0, 1e-9);
}

#[test]
fn test_unassigned_ingredient_is_not_found() {
    let mut store = burger_store();
    store.ingredients.push(ingredient(12, "Truffle", "kg", 900.0));

    // On the master list but never priced for client 1.
    let result = CostAggregator::new(&mut store).add_line(100, IngredientRef::Ingredient(12), 0.01);
    assert!(matches!(result, Err(CostingError::NotFound(_))));
}

#[test]
fn test_price_change_fans_out_to_referencing_dishes_only() {
    let mut store = burger_store();
    store.dishes.push(dish(101, 1, "Cheeseburger", 14.0));
    store.dishes.push(dish(102, 1, "Green Salad", 8.0));

    {
        let mut aggregator = CostAggregator::new(&mut store);
        aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        aggregator
            .add_line(101, IngredientRef::Ingredient(10), 0.4)
            .unwrap();
        aggregator
            .add_line(102, IngredientRef::Ingredient(11), 2.0)
            .unwrap();
    }
    let salad_before = store.dish(102).unwrap();

    let report = CostAggregator::new(&mut store)
        .on_ingredient_price_changed(1, 10, 12.0)
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.updated, vec![100, 101]);

    // Both beef dishes re-costed against the new price.
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 0.625 * 12.0, 1e-9);
    assert_float_absolute_eq!(store.dish(101).unwrap().total_cost, 0.5 * 12.0, 1e-9);

    // The salad never referenced beef and is untouched.
    let salad_after = store.dish(102).unwrap();
    assert_float_absolute_eq!(salad_after.total_cost, salad_before.total_cost, 1e-9);
}

#[test]
fn test_shrinkage_change_recomputes_gross() {
    let mut store = burger_store();
    CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    let report = CostAggregator::new(&mut store)
        .on_shrinkage_changed(1, 10, 30.0)
        .unwrap();
    assert!(report.is_clean());

    let line = &store.recipe_lines(100).unwrap()[0];
    assert_float_absolute_eq!(line.yield_pct, 70.0, 1e-9);
    assert_float_absolute_eq!(line.gross_quantity, 0.5 / 0.7, 1e-9);
    assert_float_absolute_eq!(line.line_cost, 0.5 / 0.7 * 10.0, 1e-9);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 0.5 / 0.7 * 10.0, 1e-9);
}

#[test]
fn test_shrinkage_above_cap_rejected_before_storage() {
    let mut store = burger_store();
    CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    let result = CostAggregator::new(&mut store).on_shrinkage_changed(1, 10, 96.0);
    assert!(result.is_err());

    // The stored price kept its previous shrinkage.
    let stored = store.ingredient_price(1, 10).unwrap();
    assert_float_absolute_eq!(stored.shrinkage_pct, 20.0, 1e-9);
}

#[test]
fn test_persistence_failure_discards_recomputation() {
    let mut store = burger_store();
    CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    store.fail_saves = true;
    let result = CostAggregator::new(&mut store).add_line(100, IngredientRef::Ingredient(11), 1.0);
    assert!(matches!(result, Err(CostingError::Persistence(_))));

    store.fail_saves = false;
    assert_eq!(store.recipe_lines(100).unwrap().len(), 1);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 6.25, 1e-9);
}

#[test]
fn test_failed_line_restore_is_reported_as_stale() {
    let mut store = burger_store();
    CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(10), 0.5)
        .unwrap();

    // The next save (the new line set) succeeds, then the store goes down:
    // the dish write fails and so does restoring the previous lines.
    store.fail_saves_after = Some(1);
    let err = CostAggregator::new(&mut store)
        .add_line(100, IngredientRef::Ingredient(11), 1.0)
        .unwrap_err();

    assert!(err.to_string().contains("stale"));

    // The stored lines really are half-applied; the error must say so.
    store.fail_saves_after = None;
    assert_eq!(store.recipe_lines(100).unwrap().len(), 2);
    assert_float_absolute_eq!(store.dish(100).unwrap().total_cost, 6.25, 1e-9);
}

#[test]
fn test_fanout_reports_per_dish_failures() {
    let mut store = burger_store();
    store.dishes.push(dish(101, 1, "Cheeseburger", 14.0));
    {
        let mut aggregator = CostAggregator::new(&mut store);
        aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        aggregator
            .add_line(101, IngredientRef::Ingredient(10), 0.4)
            .unwrap();
    }

    // One dish's persistence is down; the other must still be updated.
    store.fail_dish_saves = vec![101];

    let report = CostAggregator::new(&mut store)
        .on_ingredient_price_changed(1, 10, 12.0)
        .unwrap();

    assert_eq!(report.updated, vec![100]);
    assert!(!report.is_clean());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 101);

    // The failed dish's lines were rolled back to the old snapshot.
    let line = &store.recipe_lines(101).unwrap()[0];
    assert_float_absolute_eq!(line.unit_cost, 10.0, 1e-9);
    assert_float_absolute_eq!(store.dish(101).unwrap().total_cost, 5.0, 1e-9);
}

#[test]
fn test_fanout_skips_orphaned_lines() {
    let mut store = burger_store();
    store.dishes.push(dish(101, 1, "Cheeseburger", 14.0));
    {
        let mut aggregator = CostAggregator::new(&mut store);
        aggregator
            .add_line(100, IngredientRef::Ingredient(10), 0.5)
            .unwrap();
        aggregator
            .add_line(101, IngredientRef::Ingredient(10), 0.4)
            .unwrap();
    }

    // The dish is deleted out from under its lines; they stay behind and
    // the fan-out simply never visits them.
    store.dishes.retain(|d| d.id != 101);

    let report = CostAggregator::new(&mut store)
        .on_ingredient_price_changed(1, 10, 12.0)
        .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.updated, vec![100]);

    let orphan = store.recipe_line(2).unwrap();
    assert_float_absolute_eq!(orphan.unit_cost, 10.0, 1e-9);
}
