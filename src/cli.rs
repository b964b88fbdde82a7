use clap::{Parser, Subcommand};

use crate::recipe_model::MealType;

#[derive(Parser, Debug)]
#[command(author, version, about = "Indian recipe ideas from the ingredients you already have", long_about = None)]
pub struct Cli {
    /// LLM provider to use (groq or openrouter); overrides LLM_PROVIDER
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model identifier; overrides LLM_MODEL
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Log level or filter directive; overrides LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print the analytics summary after the command
    #[arg(long, global = true)]
    pub analytics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest up to six recipes
    Search {
        /// Ingredients, comma or space separated (Hindi names are understood)
        #[arg(required = true, num_args = 1..)]
        ingredients: Vec<String>,

        /// Allow recipes that need a few extra ingredients
        #[arg(long)]
        include_extra: bool,

        /// Only keep recipes of this meal type (breakfast, lunch, dinner, snack)
        #[arg(long)]
        meal_type: Option<MealType>,
    },
    /// Build three full-day meal plans
    DayPlan {
        #[arg(required = true, num_args = 1..)]
        ingredients: Vec<String>,
    },
    /// Ask the cooking assistant a free-form question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// List the models known for the selected provider
    Models,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
