//! Results returned by the generation helpers.

use super::message::AgentToolCall;
use super::usage::Usage;

/// Result of a single text generation call.
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    pub text: String,
    /// Tool calls the model asked for instead of (or alongside) text.
    pub tool_calls: Vec<AgentToolCall>,
    pub usage: Usage,
}

impl GenerateTextResult {
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Result of a structured-output generation.
#[derive(Debug, Clone)]
pub struct GenerateObjectResult<T> {
    pub object: T,
    pub usage: Usage,
}
