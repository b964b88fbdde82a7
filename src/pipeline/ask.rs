use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::RecipePipeline;
use crate::analytics::EventKind;
use crate::prompt_builder::question_request;

pub const ASK_FAILURE_TEXT: &str = "Sorry, I couldn't process your request. Please try again.";

/// Answer to a free-form cooking question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskOutcome {
    pub success: bool,
    pub text: String,
    pub response_time_ms: u64,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipePipeline {
    /// Sends the question straight to the model. There is no offline answer, so a failure comes
    /// back as an apology with `success == false`.
    pub async fn ask(&self, question: &str) -> AskOutcome {
        info!(length = question.len(), "cooking question received");
        let (result, response_time_ms) = self.call_model(&question_request(question)).await;
        let model = self.client.model_name().to_string();

        match result {
            Ok(text) => AskOutcome {
                success: true,
                text,
                response_time_ms,
                model,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "cooking question failed");
                self.tracker.record(
                    EventKind::Error,
                    json!({
                        "operation": "ask",
                        "error": err.to_string(),
                        "responseTimeMs": response_time_ms,
                    }),
                );
                AskOutcome {
                    success: false,
                    text: ASK_FAILURE_TEXT.to_string(),
                    response_time_ms,
                    model,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
