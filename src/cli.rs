use clap::{Parser, Subcommand};

/// MenuCosting — recipe costing and menu engineering for restaurant clients.
#[derive(Parser, Debug)]
#[command(name = "menu_costing")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the costing state JSON file.
    #[arg(short, long, default_value = "costing_state.json")]
    pub file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the menu engineering matrix (Star/Horse/Puzzle/Dog) for a client.
    Menu {
        /// Client id.
        #[arg(short, long)]
        client: u32,
    },

    /// Show a dish's cost breakdown (escandallo).
    Escandallo {
        /// Dish id.
        #[arg(short, long)]
        dish: u32,
    },

    /// Add an ingredient or sub-recipe line to a dish.
    AddLine {
        /// Dish id.
        #[arg(short, long)]
        dish: u32,

        /// Ingredient name (fuzzy matched against the master list).
        #[arg(short, long, conflicts_with = "sub_recipe")]
        ingredient: Option<String>,

        /// Use another dish (by id) as a sub-recipe line instead.
        #[arg(long)]
        sub_recipe: Option<u32>,

        /// Net (as-served) quantity.
        #[arg(short, long)]
        quantity: f64,
    },

    /// Edit a recipe line's quantity and/or ingredient.
    UpdateLine {
        /// Recipe line id.
        #[arg(short, long)]
        line: u32,

        /// New net quantity.
        #[arg(short, long)]
        quantity: Option<f64>,

        /// New ingredient name (fuzzy matched).
        #[arg(short, long)]
        ingredient: Option<String>,
    },

    /// Remove a recipe line from its dish.
    RemoveLine {
        /// Recipe line id.
        #[arg(short, long)]
        line: u32,
    },

    /// Set a client's price for an ingredient and recalculate every
    /// dish that uses it.
    SetPrice {
        /// Client id.
        #[arg(short, long)]
        client: u32,

        /// Ingredient name (fuzzy matched).
        #[arg(short, long)]
        ingredient: String,

        /// New unit price.
        #[arg(short, long)]
        price: f64,
    },

    /// Set a client's shrinkage for an ingredient and recalculate every
    /// dish that uses it.
    SetShrinkage {
        /// Client id.
        #[arg(short, long)]
        client: u32,

        /// Ingredient name (fuzzy matched).
        #[arg(short, long)]
        ingredient: String,

        /// New shrinkage percentage (0-95).
        #[arg(short, long)]
        shrinkage: f64,
    },

    /// Export a client's menu engineering report to CSV.
    Export {
        /// Client id.
        #[arg(short, long)]
        client: u32,

        /// Output CSV path.
        #[arg(short, long, default_value = "menu_report.csv")]
        output: String,
    },
}
