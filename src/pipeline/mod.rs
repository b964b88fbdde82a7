//! Request orchestration: normalize, prompt, call the model, extract, clean, validate, and fall
//! back to offline generation when any of that fails.

pub mod ask;
pub mod day_plan;
pub mod search;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

use crate::analytics::{AnalyticsSummary, EventTracker};
use crate::api_connection::{ApiConnectionError, ModelClient, TextGenerationRequest};

pub use ask::AskOutcome;

const PREVIEW_CHARS: usize = 200;

pub struct RecipePipeline {
    client: Arc<dyn ModelClient>,
    tracker: Arc<EventTracker>,
}

impl RecipePipeline {
    pub fn new(client: Arc<dyn ModelClient>, tracker: Arc<EventTracker>) -> Self {
        Self { client, tracker }
    }

    pub fn tracker(&self) -> &Arc<EventTracker> {
        &self.tracker
    }

    pub fn analytics_summary(&self) -> AnalyticsSummary {
        self.tracker.summarize()
    }

    /// Exactly one outbound call, no retry. Returns the raw text and the elapsed milliseconds.
    async fn call_model(
        &self,
        request: &TextGenerationRequest,
    ) -> (Result<String, ApiConnectionError>, u64) {
        let started = Instant::now();
        let result = self.client.generate_text(request).await;
        (result, elapsed_ms(started))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Per-request randomness. `StdRng` is `Send`, so it may live across the model await.
fn request_rng() -> StdRng {
    StdRng::from_entropy()
}

fn prompt_seed(rng: &mut impl Rng) -> u32 {
    rng.gen_range(0..10_000)
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
