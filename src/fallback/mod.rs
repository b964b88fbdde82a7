//! Offline generation used whenever the model path fails. Nothing here touches the network
//! and nothing here can fail.

pub mod day_plan_generator;
pub mod dish_catalog;
pub mod recipe_generator;
pub mod sampling;

pub use day_plan_generator::generate_fallback_day_plans;
pub use recipe_generator::{generate_fallback_recipes, FallbackOptions};
