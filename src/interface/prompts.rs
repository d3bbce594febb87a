use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::engine::constants::FUZZY_MATCH_THRESHOLD;
use crate::error::Result;
use crate::models::Ingredient;

/// Resolve an ingredient by name, fuzzily.
///
/// Exact (case-insensitive) matches win outright. Otherwise close names are
/// offered for confirmation, or selection when several are close. Returns
/// `None` when nothing matched or the user rejected every candidate.
pub fn resolve_ingredient(ingredients: &[Ingredient], input: &str) -> Result<Option<Ingredient>> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(None);
    }

    // Try exact match first (case-insensitive)
    if let Some(ingredient) = ingredients.iter().find(|i| i.key() == needle) {
        return Ok(Some(ingredient.clone()));
    }

    // Try fuzzy matching
    let mut candidates: Vec<(&Ingredient, f64)> = ingredients
        .iter()
        .map(|i| (i, jaro_winkler(&i.key(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        println!("No matching ingredient found for '{}'", input);
        return Ok(None);
    }

    if candidates.len() == 1 {
        let ingredient = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", ingredient.name))
            .default(true)
            .interact()?;

        return Ok(confirm.then(|| ingredient.clone()));
    }

    // Multiple matches - let user select
    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|(i, _)| i.name.clone())
        .collect();

    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    if selection < options.len() {
        Ok(Some(candidates[selection].0.clone()))
    } else {
        Ok(None)
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
