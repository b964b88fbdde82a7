pub mod analytics;
pub mod api_connection;
pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod ingredient_parser;
pub mod json_extractor;
pub mod pipeline;
pub mod prompt_builder;
pub mod recipe_cleaner;
pub mod recipe_model;
pub mod schema_validator;
pub mod telemetry;
