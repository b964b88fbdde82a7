use thiserror::Error;

use crate::api_connection::ApiConnectionError;
use crate::json_extractor::ExtractionError;
use crate::schema_validator::ValidationError;

/// Everything that can go wrong on the model path. None of these reach the caller of the
/// pipeline; each one routes to the fallback generator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("model call failed: {0}")]
    ModelCall(#[from] ApiConnectionError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("response has no recipes array")]
    MissingRecipesArray,
    #[error("response has an empty plans array")]
    NoPlans,
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("only {found} recipes returned, need at least {required}")]
    InsufficientRecipes { found: usize, required: usize },
    #[error("schema validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl PipelineError {
    /// Short machine-readable tag used in analytics payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            PipelineError::ModelCall(_) => "model_call_failed",
            PipelineError::Extraction(ExtractionError::NoJsonFound) => "no_json_found",
            PipelineError::Extraction(ExtractionError::InvalidJson(_)) => "invalid_json",
            PipelineError::MissingRecipesArray => "missing_recipes_array",
            PipelineError::NoPlans => "no_plans",
            PipelineError::UnexpectedShape(_) => "unexpected_shape",
            PipelineError::InsufficientRecipes { .. } => "insufficient_recipes",
            PipelineError::Validation(_) => "schema_mismatch",
        }
    }
}
