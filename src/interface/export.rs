use std::collections::HashMap;
use std::path::Path;

use crate::engine::Quadrant;
use crate::error::Result;
use crate::models::Dish;

/// Write the menu engineering report for one client to a CSV file.
///
/// Unclassified dishes are included with an empty quadrant column so the
/// report covers the whole carta.
pub fn write_menu_report_csv(
    path: &Path,
    dishes: &[Dish],
    classification: &HashMap<u32, Quadrant>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "dish_id",
        "name",
        "category",
        "sale_price",
        "total_cost",
        "margin",
        "margin_pct",
        "food_cost_pct",
        "recommended_price",
        "monthly_sales",
        "quadrant",
    ])?;

    let mut sorted: Vec<&Dish> = dishes.iter().collect();
    sorted.sort_by_key(|d| d.id);

    for dish in sorted {
        let quadrant = classification
            .get(&dish.id)
            .map(|q| q.label())
            .unwrap_or("");

        wtr.write_record([
            dish.id.to_string(),
            dish.name.clone(),
            dish.category.clone(),
            format!("{:.2}", dish.sale_price),
            format!("{:.2}", dish.total_cost),
            format!("{:.2}", dish.margin),
            format!("{:.1}", dish.margin_pct),
            format!("{:.1}", dish.food_cost_pct),
            format!("{:.2}", dish.recommended_price),
            dish.monthly_sales.to_string(),
            quadrant.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
