pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, ModelClient};
pub use endpoints::{Provider, TextGenerationRequest};
