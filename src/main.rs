use anyhow::{Context, Result};
use dinezzy::analytics::EventTracker;
use dinezzy::cli::{parse_args, Command};
use dinezzy::config::{ProviderKind, Settings};
use dinezzy::pipeline::RecipePipeline;
use dinezzy::telemetry::init_tracing;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output as JSON")?;
    println!("{}", rendered);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys

    let cli = parse_args();

    let mut settings = Settings::from_env().context("Failed to load settings from the environment")?;
    if let Some(provider) = &cli.provider {
        let kind: ProviderKind = provider.parse()?;
        settings = settings.with_provider(kind);
    }
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }

    init_tracing(&settings.log_level, settings.log_format);

    let provider = Arc::new(settings.build_provider());
    info!(model = provider.model(), key_env = %settings.api_key_env, "model client ready");

    let tracker = Arc::new(EventTracker::new(settings.analytics_capacity));
    let pipeline = RecipePipeline::new(provider.clone(), Arc::clone(&tracker));

    let output = match cli.command {
        Command::Search {
            ingredients,
            include_extra,
            meal_type,
        } => {
            let recipes = pipeline
                .search_recipes(&ingredients.join(" "), include_extra, meal_type)
                .await;
            serde_json::to_value(recipes)?
        }
        Command::DayPlan { ingredients } => {
            let plans = pipeline.generate_day_plan(&ingredients.join(" ")).await;
            serde_json::to_value(plans)?
        }
        Command::Ask { question } => {
            let outcome = pipeline.ask(&question.join(" ")).await;
            serde_json::to_value(outcome)?
        }
        Command::Models => serde_json::to_value(provider.get_available_models())?,
    };
    print_json(&output)?;

    if cli.analytics {
        print_json(&serde_json::to_value(pipeline.analytics_summary())?)?;
    }

    Ok(())
}
