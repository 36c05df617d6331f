use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the persisted pantry and shopping list
    #[arg(long, default_value = ".pantry", global = true)]
    pub data_dir: String,

    /// JSON file to use instead of the built-in recipe catalog
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add an ingredient to the pantry
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Expiration date, YYYY-MM-DD
        #[arg(long)]
        expires: Option<NaiveDate>,
        /// Combine with the first similar entry instead of reporting it
        #[arg(long, conflicts_with = "as_new")]
        combine: bool,
        /// Add as a distinct entry even when a similar one exists
        #[arg(long)]
        as_new: bool,
    },
    /// Inspect and edit the pantry
    Pantry {
        #[command(subcommand)]
        action: Option<PantryAction>,
    },
    /// Manage the shopping list
    Shopping {
        #[command(subcommand)]
        action: Option<ShoppingAction>,
    },
    /// Browse the recipe catalog with availability against the pantry
    Recipes {
        /// Filter by recipe name or required ingredient
        #[arg(long)]
        search: Option<String>,
    },
    /// Rank makeable recipes for tonight
    Dinner {
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        meal_type: Option<String>,
        /// Push a recipe's missing ingredients onto the shopping list
        #[arg(long, value_name = "RECIPE_ID")]
        add_missing: Option<String>,
    },
    /// Search the remote recipe service using the pantry contents
    Online,
}

#[derive(Subcommand, Debug)]
pub enum PantryAction {
    /// List pantry entries (the default)
    List {
        /// Substring filter on the entry name
        #[arg(long)]
        search: Option<String>,
        /// Exact category filter
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove an entry by id
    Remove { id: String },
    /// Merge two or more entries into one
    Combine {
        #[arg(required = true, num_args = 2..)]
        ids: Vec<String>,
    },
    /// Replace an entry's fields
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Expiration date, YYYY-MM-DD
        #[arg(long)]
        expires: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ShoppingAction {
    /// List shopping-list items (the default)
    List,
    /// Add an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Toggle an item's checked state
    Check { id: String },
    /// Remove an item by id
    Remove { id: String },
    /// Move an item into the pantry
    Promote {
        id: String,
        /// Combine with the first similar pantry entry
        #[arg(long, conflicts_with = "as_new")]
        combine: bool,
        /// Add to the pantry as a distinct entry
        #[arg(long)]
        as_new: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
