use clap::Parser;
use std::path::Path;

use menu_costing_rs::cli::{Cli, Command};
use menu_costing_rs::engine::{classifier, CostAggregator};
use menu_costing_rs::error::Result;
use menu_costing_rs::interface::{
    deviation_verdict, display_escandallo, display_fanout, display_matrix, prompt_yes_no,
    resolve_ingredient, write_menu_report_csv,
};
use menu_costing_rs::models::{Ingredient, IngredientRef};
use menu_costing_rs::storage::{CostingStore, JsonStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let path = Path::new(&cli.file);
    if !path.exists() {
        eprintln!("Costing state file not found: {}", cli.file);
        eprintln!("Please ensure costing_state.json exists in the current directory.");
        return Ok(());
    }

    let mut store = JsonStore::load(path)?;

    match cli.command {
        Command::Menu { client } => cmd_menu(&store, client),
        Command::Escandallo { dish } => cmd_escandallo(&store, dish),
        Command::AddLine {
            dish,
            ingredient,
            sub_recipe,
            quantity,
        } => cmd_add_line(&mut store, dish, ingredient, sub_recipe, quantity),
        Command::UpdateLine {
            line,
            quantity,
            ingredient,
        } => cmd_update_line(&mut store, line, quantity, ingredient),
        Command::RemoveLine { line } => cmd_remove_line(&mut store, line),
        Command::SetPrice {
            client,
            ingredient,
            price,
        } => cmd_set_price(&mut store, client, &ingredient, price),
        Command::SetShrinkage {
            client,
            ingredient,
            shrinkage,
        } => cmd_set_shrinkage(&mut store, client, &ingredient, shrinkage),
        Command::Export { client, output } => cmd_export(&store, client, &output),
    }
}

/// Classify a client's carta and display the matrix.
fn cmd_menu(store: &JsonStore, client_id: u32) -> Result<()> {
    let dishes = store.dishes_for_client(client_id)?;
    if dishes.is_empty() {
        println!("Client {} has no dishes.", client_id);
        return Ok(());
    }

    let classification = classifier::classify(&dishes);
    let bounds = classifier::thresholds(&dishes);
    display_matrix(&dishes, &classification, &bounds);

    Ok(())
}

/// Display one dish's cost breakdown.
fn cmd_escandallo(store: &JsonStore, dish_id: u32) -> Result<()> {
    let dish = store.dish(dish_id)?;
    let lines = store.recipe_lines(dish_id)?;
    display_escandallo(&dish, &lines);
    Ok(())
}

/// Add an ingredient or sub-recipe line to a dish and recalculate it.
fn cmd_add_line(
    store: &mut JsonStore,
    dish_id: u32,
    ingredient: Option<String>,
    sub_recipe: Option<u32>,
    quantity: f64,
) -> Result<()> {
    let reference = match (ingredient, sub_recipe) {
        (_, Some(sub_dish_id)) => IngredientRef::SubRecipe(sub_dish_id),
        (Some(name), None) => match lookup_ingredient(store, &name)? {
            Some(found) => IngredientRef::Ingredient(found.id),
            None => return Ok(()),
        },
        (None, None) => {
            eprintln!("Specify either --ingredient or --sub-recipe.");
            return Ok(());
        }
    };

    let line = CostAggregator::new(store).add_line(dish_id, reference, quantity)?;
    println!(
        "Added {}: {:.3} {} net -> {:.3} {} gross, cost {:.2}",
        line.name, line.net_quantity, line.unit, line.gross_quantity, line.unit, line.line_cost
    );

    cmd_escandallo(store, dish_id)
}

/// Edit a recipe line in place and recalculate its dish.
fn cmd_update_line(
    store: &mut JsonStore,
    line_id: u32,
    quantity: Option<f64>,
    ingredient: Option<String>,
) -> Result<()> {
    let reference = match ingredient {
        Some(name) => match lookup_ingredient(store, &name)? {
            Some(found) => Some(IngredientRef::Ingredient(found.id)),
            None => return Ok(()),
        },
        None => None,
    };

    if quantity.is_none() && reference.is_none() {
        println!("Nothing to update; pass --quantity and/or --ingredient.");
        return Ok(());
    }

    let line = CostAggregator::new(store).update_line(line_id, quantity, reference)?;
    println!(
        "Updated {}: {:.3} {} net -> {:.3} {} gross, cost {:.2}",
        line.name, line.net_quantity, line.unit, line.gross_quantity, line.unit, line.line_cost
    );

    cmd_escandallo(store, line.dish_id)
}

/// Remove a recipe line after confirmation.
fn cmd_remove_line(store: &mut JsonStore, line_id: u32) -> Result<()> {
    let line = store.recipe_line(line_id)?;

    let confirm = prompt_yes_no(
        &format!("Remove '{}' from dish {}?", line.name, line.dish_id),
        false,
    )?;
    if !confirm {
        println!("Nothing removed.");
        return Ok(());
    }

    CostAggregator::new(store).remove_line(line_id)?;
    println!("Removed '{}'.", line.name);

    cmd_escandallo(store, line.dish_id)
}

/// Update a client price and fan the change out to every affected dish.
fn cmd_set_price(store: &mut JsonStore, client_id: u32, ingredient: &str, price: f64) -> Result<()> {
    let Some(found) = lookup_ingredient(store, ingredient)? else {
        return Ok(());
    };

    let report = CostAggregator::new(store).on_ingredient_price_changed(client_id, found.id, price)?;

    let updated = store.ingredient_price(client_id, found.id)?;
    println!(
        "{} now costs {:.2}/{} for client {} ({})",
        found.name,
        updated.unit_cost,
        updated.unit,
        client_id,
        deviation_verdict(updated.deviation_pct())
    );
    display_fanout(&report);

    Ok(())
}

/// Update a client shrinkage and fan the change out to every affected dish.
fn cmd_set_shrinkage(
    store: &mut JsonStore,
    client_id: u32,
    ingredient: &str,
    shrinkage: f64,
) -> Result<()> {
    let Some(found) = lookup_ingredient(store, ingredient)? else {
        return Ok(());
    };

    let report = CostAggregator::new(store).on_shrinkage_changed(client_id, found.id, shrinkage)?;

    println!(
        "{} shrinkage set to {:.0}% (yield {:.0}%) for client {}",
        found.name,
        shrinkage,
        100.0 - shrinkage,
        client_id
    );
    display_fanout(&report);

    Ok(())
}

/// Export the menu engineering report for a client.
fn cmd_export(store: &JsonStore, client_id: u32, output: &str) -> Result<()> {
    let dishes = store.dishes_for_client(client_id)?;
    if dishes.is_empty() {
        println!("Client {} has no dishes.", client_id);
        return Ok(());
    }

    let classification = classifier::classify(&dishes);
    write_menu_report_csv(Path::new(output), &dishes, &classification)?;
    println!("Report for {} dishes written to {}", dishes.len(), output);

    Ok(())
}

/// Resolve an ingredient name against the master list, fuzzily.
fn lookup_ingredient(store: &JsonStore, name: &str) -> Result<Option<Ingredient>> {
    let ingredients = store.ingredients()?;
    resolve_ingredient(&ingredients, name)
}
