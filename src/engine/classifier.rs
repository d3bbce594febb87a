use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Dish;

/// Menu engineering quadrant for one dish, relative to the client's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// High volume, high margin.
    Star,
    /// High volume, low margin.
    Horse,
    /// Low volume, high margin.
    Puzzle,
    /// Low volume, low margin.
    Dog,
}

impl Quadrant {
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Star => "STAR",
            Quadrant::Horse => "HORSE",
            Quadrant::Puzzle => "PUZZLE",
            Quadrant::Dog => "DOG",
        }
    }
}

/// Median thresholds derived from one classification run.
#[derive(Debug, Clone, Copy)]
pub struct MatrixThresholds {
    pub median_sales: f64,
    pub median_margin_pct: f64,
}

/// Standard median: middle value for odd counts, mean of the two middle
/// values for even counts. Empty input yields 0.
fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Quadrant thresholds over the qualifying dishes.
///
/// Thresholds are population-relative: they move whenever the qualifying
/// set changes, so classification is always a full re-run.
pub fn thresholds(dishes: &[Dish]) -> MatrixThresholds {
    let mut sales: Vec<f64> = dishes
        .iter()
        .filter(|d| d.qualifies_for_matrix())
        .map(|d| d.monthly_sales as f64)
        .collect();
    let mut margins: Vec<f64> = dishes
        .iter()
        .filter(|d| d.qualifies_for_matrix())
        .map(|d| d.margin_pct)
        .collect();

    MatrixThresholds {
        median_sales: median(&mut sales),
        median_margin_pct: median(&mut margins),
    }
}

/// Assign a quadrant to every qualifying dish.
///
/// Dishes that are inactive or have a zero price, cost, or sales estimate
/// are excluded from the medians and get no quadrant. Ties at a median go
/// to the high side, so the result does not depend on input order.
pub fn classify(dishes: &[Dish]) -> HashMap<u32, Quadrant> {
    let bounds = thresholds(dishes);

    dishes
        .iter()
        .filter(|d| d.qualifies_for_matrix())
        .map(|d| {
            let high_volume = d.monthly_sales as f64 >= bounds.median_sales;
            let high_margin = d.margin_pct >= bounds.median_margin_pct;
            let quadrant = match (high_volume, high_margin) {
                (true, true) => Quadrant::Star,
                (true, false) => Quadrant::Horse,
                (false, true) => Quadrant::Puzzle,
                (false, false) => Quadrant::Dog,
            };
            (d.id, quadrant)
        })
        .collect()
}
