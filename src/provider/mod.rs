//! Model provider trait and the OpenAI-compatible implementation.

pub mod http;
pub mod openai_compatible;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TripConfig;
use crate::error::TripError;
use crate::models::ModelCapabilities;
use crate::types::{
    message::AgentToolCall, FinishReason, GenerationSettings, ModelMessage, ResponseFormat, Usage,
};

pub use openai_compatible::OpenAiCompatibleProvider;

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
    pub response_format: Option<ResponseFormat>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Capabilities of the model.
    fn capabilities(&self) -> &ModelCapabilities;

    /// Generate a completion (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, TripError>;
}

/// The two provider handles the assistant needs.
#[derive(Clone)]
pub struct ProviderPair {
    /// Serves the main travel agent.
    pub main: Arc<dyn ModelProvider>,
    /// Serves both guardrail classifiers.
    pub guardrail: Arc<dyn ModelProvider>,
}

/// Create a provider for `model_id` from an explicit config.
pub fn create_provider(
    model_id: &str,
    config: &TripConfig,
) -> Result<Arc<dyn ModelProvider>, TripError> {
    let api_key = config
        .api_key()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| TripError::Authentication("Missing GEMINI_API_KEY".into()))?;
    if model_id.trim().is_empty() {
        return Err(TripError::Configuration("model identifier is empty".into()));
    }
    let client = http::build_client(config.request_timeout)?;
    Ok(Arc::new(OpenAiCompatibleProvider::new(
        client,
        model_id.to_string(),
        api_key.to_string(),
        config.base_url.clone(),
    )))
}

/// Create the main and guardrail providers described by `config`.
pub fn create_providers(config: &TripConfig) -> Result<ProviderPair, TripError> {
    Ok(ProviderPair {
        main: create_provider(&config.main_model, config)?,
        guardrail: create_provider(&config.guardrail_model, config)?,
    })
}
