use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvailableModel {
    pub model_name: &'static str,
    pub model_source: &'static str,
}

/// Hosted chat-completion backends. Both speak the OpenAI-compatible wire format.
#[derive(Clone, Debug, Serialize)]
pub enum Provider {
    Groq {
        api_key: String,
        model: String,
        timeout_secs: Option<u64>,
    },
    OpenRouter {
        api_key: String,
        model: String,
        timeout_secs: Option<u64>,
    },
}

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub const GROQ_MODELS: &[AvailableModel] = &[
    AvailableModel {
        model_name: "llama-3.1-8b-instant",
        model_source: "groq",
    },
    AvailableModel {
        model_name: "llama-3.3-70b-versatile",
        model_source: "groq",
    },
];

pub const OPENROUTER_MODELS: &[AvailableModel] = &[AvailableModel {
    model_name: "meta-llama/llama-3.1-8b-instruct",
    model_source: "openrouter",
}];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<ChatCompletionUsage>,
}

/// What the pipeline asks of a text-generation backend, independent of wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub system: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl TextGenerationRequest {
    pub fn into_chat_request(self, model: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_carries_system_then_user() {
        let request = TextGenerationRequest {
            prompt: "Make dal".to_string(),
            system: "Return JSON".to_string(),
            max_tokens: 8000,
            temperature: Some(0.9),
        };
        let chat = request.into_chat_request(DEFAULT_MODEL);
        assert_eq!(chat.model, DEFAULT_MODEL);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].content, "Make dal");
        assert_eq!(chat.max_tokens, Some(8000));
    }

    #[test]
    fn test_unset_temperature_is_not_serialized() {
        let request = TextGenerationRequest {
            prompt: "p".to_string(),
            system: "s".to_string(),
            max_tokens: 6000,
            temperature: None,
        };
        let payload = serde_json::to_value(request.into_chat_request(DEFAULT_MODEL)).unwrap();
        assert!(payload.get("temperature").is_none());
        assert_eq!(payload["max_tokens"], 6000);
    }

    #[test]
    fn test_response_with_null_content_deserializes() {
        let body = r#"{"id":"x","created":1,"model":"m","choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
