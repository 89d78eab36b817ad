//! Shared test helpers and a scripted mock provider.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use tripguard::config::TripConfig;
use tripguard::error::TripError;
use tripguard::models::ModelCapabilities;
use tripguard::orchestrator::Orchestrator;
use tripguard::provider::{ModelProvider, ProviderPair, ProviderRequest, ProviderResponse};
use tripguard::tools::StaticCatalog;
use tripguard::types::*;

/// One scripted reaction to a provider call.
pub enum Step {
    Text(String),
    ToolCall {
        id: String,
        name: String,
        args: serde_json::Value,
    },
    Fail(u16),
    Hang,
}

/// A mock provider that replays a script and records every request.
pub struct MockProvider {
    model_id: String,
    capabilities: ModelCapabilities,
    script: Mutex<Vec<Step>>,
    requests: Mutex<Vec<ProviderRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Arc<Self> {
        Self::with_capabilities(model_id, ModelCapabilities::full())
    }

    pub fn with_capabilities(model_id: &str, capabilities: ModelCapabilities) -> Arc<Self> {
        Arc::new(Self {
            model_id: model_id.to_string(),
            capabilities,
            script: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn push(&self, step: Step) {
        self.script.lock().unwrap().push(step);
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.push(Step::Text(text.to_string()));
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.push(Step::ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            args,
        });
    }

    /// Queue an HTTP-style failure.
    pub fn queue_failure(&self, status: u16) {
        self.push(Step::Fail(status));
    }

    /// Queue a call that never returns.
    pub fn queue_hang(&self) {
        self.push(Step::Hang);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, TripError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let step = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err(TripError::InvalidState(format!(
                    "{} has no scripted response left",
                    self.model_id
                )));
            }
            script.remove(0)
        };

        let usage = Usage {
            input_tokens: 10,
            output_tokens: 20,
            total_tokens: 30,
        };
        match step {
            Step::Text(text) => Ok(ProviderResponse {
                text,
                usage,
                tool_calls: vec![],
                finish_reason: Some(FinishReason::Stop),
            }),
            Step::ToolCall { id, name, args } => Ok(ProviderResponse {
                text: String::new(),
                usage,
                tool_calls: vec![message::AgentToolCall {
                    id,
                    name,
                    arguments: args,
                }],
                finish_reason: Some(FinishReason::ToolCalls),
            }),
            Step::Fail(status) => Err(TripError::api(status, "scripted failure")),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TripError::InvalidState("hang elapsed".into()))
            }
        }
    }
}

pub fn input_verdict(flagged: bool, reasoning: &str) -> String {
    json!({ "is_request_irrelevant_illegal": flagged, "reasoning": reasoning }).to_string()
}

pub fn output_verdict(flagged: bool, reasoning: &str) -> String {
    json!({ "is_response_violates": flagged, "reasoning": reasoning }).to_string()
}

/// Main and guardrail mocks plus an orchestrator wired to them.
pub struct Harness {
    pub main: Arc<MockProvider>,
    pub guardrail: Arc<MockProvider>,
    pub orchestrator: Orchestrator,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(TripConfig::new())
    }

    pub fn with_config(config: TripConfig) -> Self {
        let main = MockProvider::new("gemini-2.5-flash");
        let guardrail = MockProvider::new("gemini-2.0-flash");
        let orchestrator = Orchestrator::with_providers(
            ProviderPair {
                main: main.clone(),
                guardrail: guardrail.clone(),
            },
            &config,
            Arc::new(StaticCatalog::sample()),
        );
        Self {
            main,
            guardrail,
            orchestrator,
        }
    }
}
