use std::collections::HashMap;

use crate::engine::classifier::MatrixThresholds;
use crate::engine::constants::DEVIATION_ALERT_PCT;
use crate::engine::{FanOutReport, Quadrant};
use crate::models::{Dish, RecipeLine};

/// Display one dish's cost breakdown (escandallo) as a table.
pub fn display_escandallo(dish: &Dish, lines: &[RecipeLine]) {
    println!();
    println!("=== Escandallo: {} ===", dish.name);
    println!();

    if lines.is_empty() {
        println!("No recipe lines yet.");
        println!();
        return;
    }

    // Find max name length for alignment
    let max_name_len = lines.iter().map(|l| l.name.len()).max().unwrap_or(10);

    for line in lines {
        let shrinkage = line.shrinkage_pct();
        let shrinkage_tag = if line.reference.is_subrecipe() {
            "  [sub-recipe]".to_string()
        } else if shrinkage > 0.0 {
            format!("  [shrinkage {:.0}%]", shrinkage)
        } else {
            String::new()
        };

        println!(
            "  {:<width$} {:>7.3} {} net -> {:>7.3} {} gross @ {:>6.2}/u = {:>7.2}{}",
            line.name,
            line.net_quantity,
            line.unit,
            line.gross_quantity,
            line.unit,
            line.unit_cost,
            line.line_cost,
            shrinkage_tag,
            width = max_name_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Total cost:        {:>8.2}", dish.total_cost);
    println!("Sale price:        {:>8.2}", dish.sale_price);
    println!("Margin:            {:>8.2} ({:.1}%)", dish.margin, dish.margin_pct);
    println!("Food cost:         {:>7.1}%", dish.food_cost_pct);
    println!("Recommended price: {:>8.2}", dish.recommended_price);
    println!();
}

/// Display the menu engineering matrix for a client's dishes.
pub fn display_matrix(
    dishes: &[Dish],
    classification: &HashMap<u32, Quadrant>,
    bounds: &MatrixThresholds,
) {
    println!();
    println!("=== Menu Engineering Matrix ===");
    println!(
        "Thresholds: median sales {:.1}/month, median margin {:.1}%",
        bounds.median_sales, bounds.median_margin_pct
    );
    println!();

    let max_name_len = dishes.iter().map(|d| d.name.len()).max().unwrap_or(10);

    let mut sorted: Vec<&Dish> = dishes.iter().collect();
    sorted.sort_by_key(|d| d.id);

    for dish in &sorted {
        match classification.get(&dish.id) {
            Some(quadrant) => println!(
                "  {:<width$} {:>5} sales/mo  margin {:>5.1}%  -> {}",
                dish.name,
                dish.monthly_sales,
                dish.margin_pct,
                quadrant.label(),
                width = max_name_len
            ),
            None => println!(
                "  {:<width$} (unclassified: missing price, cost, or sales)",
                dish.name,
                width = max_name_len
            ),
        }
    }

    let count = |q: Quadrant| classification.values().filter(|v| **v == q).count();
    println!();
    println!("--- Summary ---");
    println!("Stars:   {}", count(Quadrant::Star));
    println!("Horses:  {}", count(Quadrant::Horse));
    println!("Puzzles: {}", count(Quadrant::Puzzle));
    println!("Dogs:    {}", count(Quadrant::Dog));
    println!("Unclassified: {}", dishes.len() - classification.len());
    println!();
}

/// Display which dishes a price/shrinkage fan-out touched, and which failed.
pub fn display_fanout(report: &FanOutReport) {
    if report.updated.is_empty() && report.failed.is_empty() {
        println!("No recipe lines reference this ingredient; nothing to update.");
        return;
    }

    if !report.updated.is_empty() {
        let ids: Vec<String> = report.updated.iter().map(|id| id.to_string()).collect();
        println!("Recalculated {} dish(es): {}", report.updated.len(), ids.join(", "));
    }

    for (dish_id, error) in &report.failed {
        println!("Dish {} NOT updated: {} (re-run recalculation)", dish_id, error);
    }
}

/// One-line verdict on a client price vs. the market reference.
pub fn deviation_verdict(deviation_pct: f64) -> String {
    if deviation_pct > DEVIATION_ALERT_PCT {
        format!("+{:.1}% MORE EXPENSIVE than market", deviation_pct)
    } else if deviation_pct < -DEVIATION_ALERT_PCT {
        format!("{:.1}% cheaper than market", deviation_pct.abs())
    } else {
        format!("{:+.1}% vs market (in line)", deviation_pct)
    }
}
