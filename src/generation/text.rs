//! Single-step text generation.
//!
//! Tool calls are returned to the caller rather than executed here; the
//! orchestrator decides when tools run.

use tracing::debug;

use crate::error::TripError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::types::*;

/// Make one completion call.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    tools: Option<Vec<ToolDefinition>>,
) -> Result<GenerateTextResult, TripError> {
    let tools = tools.filter(|t| !t.is_empty());
    let request = ProviderRequest {
        messages,
        response_format: settings.response_format.clone(),
        settings,
        tools,
    };

    debug!(
        provider = provider.provider_name(),
        model = provider.model_id(),
        messages = request.messages.len(),
        "generate_text: calling provider"
    );
    let response = provider.generate_text(&request).await?;
    debug!(
        model = provider.model_id(),
        finish_reason = ?response.finish_reason,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        tool_calls = response.tool_calls.len(),
        "generate_text: provider responded"
    );

    Ok(GenerateTextResult {
        text: response.text,
        tool_calls: response.tool_calls,
        usage: response.usage,
    })
}
