use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{elapsed_ms, preview, prompt_seed, request_rng, RecipePipeline};
use crate::analytics::EventKind;
use crate::error::PipelineError;
use crate::fallback::generate_fallback_day_plans;
use crate::ingredient_parser::normalize_ingredients;
use crate::json_extractor::extract_json;
use crate::prompt_builder::{day_plan_prompt, day_plan_request, DAY_PLAN_COUNT};
use crate::recipe_cleaner::clean_day_plan_payload;
use crate::recipe_model::DayPlan;
use crate::schema_validator::validate_day_plans;

impl RecipePipeline {
    /// Three distinct full-day plans for free-text ingredients. Never fails.
    pub async fn generate_day_plan(&self, text: &str) -> Vec<DayPlan> {
        let started = Instant::now();
        let ingredients = normalize_ingredients(text);
        info!(?ingredients, "day plan generation started");
        self.tracker.record(
            EventKind::RequestStarted,
            json!({ "operation": "generate_day_plan", "ingredients": ingredients }),
        );

        let seed = prompt_seed(&mut request_rng());
        let (source, plans) = match self.day_plans_from_model(&ingredients, seed).await {
            Ok(plans) => ("model", plans),
            Err(err) => {
                warn!(reason = err.reason(), error = %err, "day plan falling back to offline generation");
                self.tracker.record(
                    EventKind::FallbackUsed,
                    json!({
                        "operation": "generate_day_plan",
                        "reason": err.reason(),
                        "error": err.to_string(),
                    }),
                );
                ("fallback", generate_fallback_day_plans(&ingredients))
            }
        };

        self.tracker.record(
            EventKind::Completed,
            json!({
                "operation": "generate_day_plan",
                "source": source,
                "planCount": plans.len(),
                "totalTimeMs": elapsed_ms(started),
            }),
        );
        plans
    }

    async fn day_plans_from_model(
        &self,
        ingredients: &[String],
        seed: u32,
    ) -> Result<Vec<DayPlan>, PipelineError> {
        let request = day_plan_request(day_plan_prompt(ingredients, seed));
        let (result, response_time_ms) = self.call_model(&request).await;
        let text = match result {
            Ok(text) => text,
            Err(err) => {
                self.tracker.record(
                    EventKind::ModelCallFailure,
                    json!({
                        "error": err.to_string(),
                        "responseTimeMs": response_time_ms,
                        "model": self.client.model_name(),
                    }),
                );
                return Err(err.into());
            }
        };
        self.tracker.record(
            EventKind::ModelCallSuccess,
            json!({
                "responseTimeMs": response_time_ms,
                "responseLength": text.len(),
                "model": self.client.model_name(),
            }),
        );
        debug!(preview = %preview(&text), "model response received");

        let payload = match extract_json(&text) {
            Ok(payload) => payload,
            Err(err) => {
                let err = PipelineError::from(err);
                self.tracker.record(
                    EventKind::ParseFailure,
                    json!({
                        "reason": err.reason(),
                        "error": err.to_string(),
                        "responsePreview": preview(&text),
                    }),
                );
                return Err(err);
            }
        };
        self.tracker.record(
            EventKind::ParseSuccess,
            json!({ "hasPlansArray": payload.get("plans").is_some_and(Value::is_array) }),
        );

        let mut cleaned = match clean_day_plan_payload(payload) {
            Ok(cleaned) => cleaned,
            Err(err) => {
                self.tracker.record(
                    EventKind::ValidationFailure,
                    json!({ "reason": err.reason(), "error": err.to_string() }),
                );
                return Err(err);
            }
        };
        let plan_count = cleaned.as_array().map_or(0, Vec::len);
        if let Value::Array(plans) = &mut cleaned {
            plans.truncate(DAY_PLAN_COUNT);
        }

        match validate_day_plans(&cleaned) {
            Ok(plans) => {
                self.tracker
                    .record(EventKind::ValidationSuccess, json!({ "planCount": plans.len() }));
                Ok(plans)
            }
            Err(err) => {
                let err = PipelineError::from(err);
                self.tracker.record(
                    EventKind::ValidationFailure,
                    json!({ "reason": err.reason(), "error": err.to_string(), "planCount": plan_count }),
                );
                Err(err)
            }
        }
    }
}
