use rand::Rng;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{elapsed_ms, preview, prompt_seed, request_rng, RecipePipeline};
use crate::analytics::EventKind;
use crate::error::PipelineError;
use crate::fallback::{generate_fallback_recipes, FallbackOptions};
use crate::ingredient_parser::normalize_ingredients;
use crate::json_extractor::extract_json;
use crate::prompt_builder::{recipe_prompt, recipe_request, RECIPE_COUNT};
use crate::recipe_cleaner::clean_recipe_payload;
use crate::recipe_model::{MealType, Recipe};
use crate::schema_validator::validate_recipes;

/// Fewer validated recipes than this and the model answer is discarded.
pub const MIN_MODEL_RECIPES: usize = 3;
/// A meal-type filter that leaves fewer recipes than this triggers a backfill.
pub const BACKFILL_TARGET: usize = 5;

impl RecipePipeline {
    /// Suggests 1 to 6 recipes for free-text ingredients. Never fails: every model-path error
    /// is answered with offline recipes.
    pub async fn search_recipes(
        &self,
        text: &str,
        include_extra: bool,
        meal_type: Option<MealType>,
    ) -> Vec<Recipe> {
        let started = Instant::now();
        let ingredients = normalize_ingredients(text);
        info!(?ingredients, include_extra, ?meal_type, "recipe search started");
        self.tracker.record(
            EventKind::RequestStarted,
            json!({
                "operation": "search_recipes",
                "ingredients": ingredients,
                "includeExtra": include_extra,
                "mealType": meal_type,
            }),
        );

        let mut rng = request_rng();
        let seed = prompt_seed(&mut rng);

        let (source, recipes) = match self
            .recipes_from_model(&ingredients, include_extra, meal_type, seed)
            .await
        {
            Ok(recipes) => {
                let recipes =
                    self.apply_meal_filter(recipes, &ingredients, include_extra, meal_type, &mut rng);
                ("model", recipes)
            }
            Err(err) => {
                warn!(reason = err.reason(), error = %err, "recipe search falling back to offline generation");
                self.tracker.record(
                    EventKind::FallbackUsed,
                    json!({
                        "operation": "search_recipes",
                        "reason": err.reason(),
                        "error": err.to_string(),
                        "ingredientCount": ingredients.len(),
                    }),
                );
                let opts = FallbackOptions {
                    include_extra,
                    meal_type,
                    target_count: RECIPE_COUNT,
                };
                ("fallback", generate_fallback_recipes(&ingredients, &opts, &mut rng))
            }
        };

        self.tracker.record(
            EventKind::Completed,
            json!({
                "operation": "search_recipes",
                "source": source,
                "finalRecipeCount": recipes.len(),
                "totalTimeMs": elapsed_ms(started),
                "filtered": meal_type.is_some(),
            }),
        );
        recipes
    }

    async fn recipes_from_model(
        &self,
        ingredients: &[String],
        include_extra: bool,
        meal_type: Option<MealType>,
        seed: u32,
    ) -> Result<Vec<Recipe>, PipelineError> {
        let request = recipe_request(recipe_prompt(ingredients, include_extra, meal_type, seed));
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
                        "responseLength": text.len(),
                        "responsePreview": preview(&text),
                    }),
                );
                return Err(err);
            }
        };
        let found = payload
            .get("recipes")
            .and_then(|recipes| recipes.as_array())
            .map_or(0, Vec::len);
        self.tracker
            .record(EventKind::ParseSuccess, json!({ "recipeCount": found }));

        // Shape errors from here on count as validation failures.
        let cleaned = match clean_recipe_payload(payload) {
            Ok(cleaned) => cleaned,
            Err(err) => {
                self.tracker.record(
                    EventKind::ValidationFailure,
                    json!({ "reason": err.reason(), "error": err.to_string() }),
                );
                return Err(err);
            }
        };

        if found < MIN_MODEL_RECIPES {
            self.tracker
                .record(EventKind::InsufficientRecipes, json!({ "recipeCount": found }));
            return Err(PipelineError::InsufficientRecipes {
                found,
                required: MIN_MODEL_RECIPES,
            });
        }

        match validate_recipes(&cleaned) {
            Ok(recipes) => {
                self.tracker.record(
                    EventKind::ValidationSuccess,
                    json!({ "recipeCount": recipes.len() }),
                );
                Ok(recipes)
            }
            Err(err) => {
                let err = PipelineError::from(err);
                self.tracker.record(
                    EventKind::ValidationFailure,
                    json!({ "reason": err.reason(), "error": err.to_string(), "recipeCount": found }),
                );
                Err(err)
            }
        }
    }

    /// Keeps only the requested meal type, topping up from the offline generator when too few
    /// survive. The result never exceeds `RECIPE_COUNT`.
    fn apply_meal_filter(
        &self,
        recipes: Vec<Recipe>,
        ingredients: &[String],
        include_extra: bool,
        meal_type: Option<MealType>,
        rng: &mut impl Rng,
    ) -> Vec<Recipe> {
        let Some(wanted) = meal_type else {
            return recipes.into_iter().take(RECIPE_COUNT).collect();
        };

        let mut filtered: Vec<Recipe> = recipes
            .into_iter()
            .filter(|recipe| recipe.meal_type == wanted)
            .collect();

        if filtered.len() < BACKFILL_TARGET {
            let opts = FallbackOptions {
                include_extra,
                meal_type: Some(wanted),
                target_count: BACKFILL_TARGET - filtered.len(),
            };
            let additional = generate_fallback_recipes(ingredients, &opts, rng);
            self.tracker.record(
                EventKind::BackfillGenerated,
                json!({
                    "mealType": wanted,
                    "originalCount": filtered.len(),
                    "additionalCount": additional.len(),
                }),
            );
            filtered.extend(additional);
        }

        filtered.truncate(RECIPE_COUNT);
        filtered
    }
}
