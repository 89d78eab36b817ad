//! The main travel agent.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::TripError;
use crate::generation::generate_text;
use crate::profile::ProfileContext;
use crate::provider::{ModelProvider, ToolDefinition};
use crate::tools::ToolSet;
use crate::types::*;

pub const TRAVEL_INSTRUCTIONS: &str = "\
You are a travel booking assistant. Help the user find and summarize flight and hotel options, \
explain costs clearly, and guide them through booking steps. \
Use the search_flights and search_hotels tools for prices and availability instead of guessing. \
Always state the total cost before confirming any booking. \
Maintain context from the entire conversation history provided.";

/// What the main agent produced for a turn.
#[derive(Debug, Clone)]
pub enum AgentReply {
    Text(String),
    ToolCalls(PendingTools),
}

/// Tool calls the agent is waiting on, plus the exchange so far.
#[derive(Debug, Clone)]
pub struct PendingTools {
    messages: Vec<ModelMessage>,
    calls: Vec<AgentToolCall>,
}

impl PendingTools {
    pub fn calls(&self) -> &[AgentToolCall] {
        &self.calls
    }
}

/// Main agent: profile-aware instructions, the tool descriptors and a
/// provider handle. Holds no per-turn state.
pub struct TravelAgent {
    provider: Arc<dyn ModelProvider>,
    instructions: String,
    tools: Vec<ToolDefinition>,
    settings: GenerationSettings,
    timeout: Duration,
}

impl TravelAgent {
    pub fn new(provider: Arc<dyn ModelProvider>, profile: &ProfileContext, tools: &ToolSet) -> Self {
        if !tools.is_empty() && !provider.capabilities().supports_tools {
            warn!(
                model = provider.model_id(),
                "model may not support function calling; searches can go unused"
            );
        }
        Self {
            provider,
            instructions: format!("{TRAVEL_INSTRUCTIONS}\n\n{}", profile.to_prompt_block()),
            tools: tools.definitions(),
            settings: GenerationSettings::builder().temperature(0.3).build(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// First call of a turn. `input` is the flattened conversation.
    pub async fn respond(&self, input: &str) -> Result<AgentReply, TripError> {
        let messages = vec![
            ModelMessage::system(self.instructions.clone()),
            ModelMessage::user(input),
        ];
        let result = self.call(messages.clone()).await?;

        if result.wants_tools() {
            debug!(calls = result.tool_calls.len(), "main agent requested tools");
            let mut messages = messages;
            messages.push(ModelMessage::assistant_tool_calls(&result.text, &result.tool_calls));
            return Ok(AgentReply::ToolCalls(PendingTools {
                messages,
                calls: result.tool_calls,
            }));
        }
        non_empty(result.text).map(AgentReply::Text)
    }

    /// Second call of a turn: hand back tool results and take the final text.
    pub async fn resume(
        &self,
        pending: PendingTools,
        results: Vec<AgentToolResult>,
    ) -> Result<String, TripError> {
        let mut messages = pending.messages;
        messages.extend(
            results
                .into_iter()
                .map(|r| ModelMessage::tool_result(r.tool_call_id, r.result, r.is_error)),
        );
        let result = self.call(messages).await?;
        if result.wants_tools() {
            warn!(
                calls = result.tool_calls.len(),
                "main agent asked for more tools after results; ignoring them"
            );
        }
        non_empty(result.text)
    }

    async fn call(&self, messages: Vec<ModelMessage>) -> Result<GenerateTextResult, TripError> {
        crate::util::timeout::with_timeout(
            self.timeout,
            generate_text(
                self.provider.as_ref(),
                messages,
                self.settings.clone(),
                Some(self.tools.clone()),
            ),
        )
        .await
    }
}

fn non_empty(text: String) -> Result<String, TripError> {
    if text.trim().is_empty() {
        return Err(TripError::InvalidState("main agent returned no text".into()));
    }
    Ok(text)
}
