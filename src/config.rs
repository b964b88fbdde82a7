//! Runtime settings, read from the process environment (after `.env` has been loaded).

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::analytics::DEFAULT_CAPACITY;
use crate::api_connection::endpoints::DEFAULT_MODEL;
use crate::api_connection::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenRouter,
}

impl ProviderKind {
    pub fn default_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            other => bail!("unknown LLM provider '{}' (expected groq or openrouter)", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub provider: ProviderKind,
    /// Name of the variable holding the API key. The key itself is read per call.
    pub api_key_env: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
    pub analytics_capacity: usize,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Groq,
            api_key_env: ProviderKind::Groq.default_key_env().to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            analytics_capacity: DEFAULT_CAPACITY,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads a dotenv-style file without touching the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let mut values = HashMap::new();
        let entries = dotenv::from_path_iter(path)
            .with_context(|| format!("Failed to open env file '{}'", path.display()))?;
        for entry in entries {
            let (key, value) =
                entry.with_context(|| format!("Malformed line in env file '{}'", path.display()))?;
            values.insert(key, value);
        }
        Self::from_lookup(|key| values.get(key).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        let provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse::<ProviderKind>()?,
            None => defaults.provider,
        };

        let timeout_secs = get("LLM_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("LLM_TIMEOUT_SECS must be a whole number, got '{}'", raw))
            })
            .transpose()?;

        let analytics_capacity = match get("ANALYTICS_CAPACITY") {
            Some(raw) => {
                let capacity = raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("ANALYTICS_CAPACITY must be a whole number, got '{}'", raw))?;
                if capacity == 0 {
                    bail!("ANALYTICS_CAPACITY must be greater than zero");
                }
                capacity
            }
            None => defaults.analytics_capacity,
        };

        let log_format = match get("LOG_FORMAT").map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(other) => bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
            None => defaults.log_format,
        };

        Ok(Settings {
            provider,
            api_key_env: get("LLM_API_KEY_ENV").unwrap_or_else(|| provider.default_key_env().to_string()),
            model: get("LLM_MODEL").unwrap_or(defaults.model),
            timeout_secs,
            analytics_capacity,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
        })
    }

    /// Switches provider. A key variable still at the old provider's default follows along.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        if self.api_key_env == self.provider.default_key_env() {
            self.api_key_env = provider.default_key_env().to_string();
        }
        self.provider = provider;
        self
    }

    pub fn build_provider(&self) -> Provider {
        let provider = match self.provider {
            ProviderKind::Groq => Provider::groq(&self.api_key_env, &self.model),
            ProviderKind::OpenRouter => Provider::openrouter(&self.api_key_env, &self.model),
        };
        provider.with_timeout(self.timeout_secs)
    }
}
