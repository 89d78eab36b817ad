//! Tool trait and the context handed to every tool call.

use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::TripError;
use crate::profile::ProfileContext;

/// Context available during tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Read-only traveller profile for the session.
    pub profile: Arc<ProfileContext>,
}

impl ToolExecutionContext {
    pub fn new(profile: Arc<ProfileContext>) -> Self {
        Self { profile }
    }
}

/// Core tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool with validated arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, TripError>;
}
