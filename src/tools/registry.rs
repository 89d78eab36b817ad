//! The fixed set of tools offered to the main agent.
//!
//! Tools are listed once when the assistant starts; the model sees exactly
//! these descriptors and a call to any other name is answered with an error
//! payload instead of being looked up dynamically.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::validation::validate_arguments;
use crate::provider::ToolDefinition;
use crate::types::message::{AgentToolCall, AgentToolResult};

/// Message the model sees whenever a tool produced nothing usable.
pub const NO_RESULTS: &str = "no results found";

/// An immutable, ordered collection of tools.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}

impl ToolSet {
    /// Build a set from a list of tools. Later duplicates of a name are dropped.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut unique: Vec<Arc<dyn Tool>> = Vec::with_capacity(tools.len());
        for tool in tools {
            if unique.iter().any(|t| t.name() == tool.name()) {
                warn!(tool = tool.name(), "duplicate tool name ignored");
                continue;
            }
            unique.push(tool);
        }
        Self { tools: unique }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Descriptors sent to the provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Run one call. Never fails: unknown tools, invalid arguments and
    /// handler errors all come back as an error payload saying no results
    /// were found.
    pub async fn execute(&self, call: &AgentToolCall, ctx: &ToolExecutionContext) -> AgentToolResult {
        let failure = |detail: String| AgentToolResult {
            tool_call_id: call.id.clone(),
            result: json!({ "results": [], "message": NO_RESULTS, "detail": detail }),
            is_error: true,
        };

        let Some(tool) = self.get(&call.name) else {
            warn!(tool = %call.name, "model requested an unknown tool");
            return failure(format!("unknown tool '{}'", call.name));
        };

        let args = ToolArguments::new(call.arguments.clone());
        if let Err(reason) = validate_arguments(args.raw(), &tool.parameters().schema) {
            warn!(tool = %call.name, %reason, "rejected tool arguments");
            return failure(reason);
        }

        match tool.execute(&args, ctx).await {
            Ok(result) => {
                debug!(tool = %call.name, "tool call succeeded");
                AgentToolResult {
                    tool_call_id: call.id.clone(),
                    result,
                    is_error: false,
                }
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripError;
    use crate::tools::types::AgentToolParameters;
    use async_trait::async_trait;

    struct Echo {
        params: AgentToolParameters,
        fail: bool,
    }

    impl Echo {
        fn new(fail: bool) -> Self {
            Self {
                params: AgentToolParameters::object()
                    .string("city", "City", true)
                    .build(),
                fail,
            }
        }
    }

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "echo the city"
        }
        fn parameters(&self) -> &AgentToolParameters {
            &self.params
        }
        async fn execute(
            &self,
            args: &ToolArguments,
            _ctx: &ToolExecutionContext,
        ) -> Result<serde_json::Value, TripError> {
            if self.fail {
                return Err(TripError::ToolExecution {
                    tool_name: "echo".into(),
                    message: "backend down".into(),
                });
            }
            Ok(json!({ "city": args.get_str("city")? }))
        }
    }

    fn call(name: &str, args: serde_json::Value) -> AgentToolCall {
        AgentToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments: args,
        }
    }

    #[tokio::test]
    async fn executes_known_tool() {
        let set = ToolSet::new(vec![Arc::new(Echo::new(false))]);
        let result = set
            .execute(&call("echo", json!({"city": "Rome"})), &ToolExecutionContext::default())
            .await;
        assert!(!result.is_error);
        assert_eq!(result.result["city"], "Rome");
        assert_eq!(result.tool_call_id, "call_1");
    }

    #[tokio::test]
    async fn unknown_tool_is_no_results() {
        let set = ToolSet::new(vec![Arc::new(Echo::new(false))]);
        let result = set
            .execute(&call("book_flight", json!({})), &ToolExecutionContext::default())
            .await;
        assert!(result.is_error);
        assert_eq!(result.result["message"], NO_RESULTS);
    }

    #[tokio::test]
    async fn invalid_arguments_never_reach_the_handler() {
        let set = ToolSet::new(vec![Arc::new(Echo::new(false))]);
        let result = set
            .execute(&call("echo", json!({})), &ToolExecutionContext::default())
            .await;
        assert!(result.is_error);
        assert!(result.result["detail"]
            .as_str()
            .unwrap()
            .contains("missing required field 'city'"));
    }

    #[tokio::test]
    async fn handler_errors_become_no_results() {
        let set = ToolSet::new(vec![Arc::new(Echo::new(true))]);
        let result = set
            .execute(&call("echo", json!({"city": "Rome"})), &ToolExecutionContext::default())
            .await;
        assert!(result.is_error);
        assert_eq!(result.result["results"], json!([]));
    }

    #[test]
    fn duplicate_names_are_dropped() {
        let set = ToolSet::new(vec![Arc::new(Echo::new(false)), Arc::new(Echo::new(true))]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.definitions()[0].name, "echo");
    }
}
