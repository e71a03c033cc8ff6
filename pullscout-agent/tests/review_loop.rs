//! End-to-end loop tests against a scripted adapter and a real registry.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pullscout_adapters::traits::{
    AdapterMetadata, AdapterResult, InferenceRequest, ModelAdapter, ModelTurn, ToolCallRequest,
};
use pullscout_agent::{AgentError, ReviewAgent};
use pullscout_schema::ToolSchema;
use pullscout_tools::{ToolError, ToolRegistry, ToolSpec, WireFormat};
use serde::{Deserialize, Serialize};
use serde_json::json;

struct ScriptedAdapter {
    metadata: AdapterMetadata,
    turns: Mutex<VecDeque<ModelTurn>>,
    seen_requests: Mutex<Vec<InferenceRequest>>,
}

impl ScriptedAdapter {
    fn new(turns: Vec<ModelTurn>) -> Self {
        Self {
            metadata: AdapterMetadata::new("scripted", "test-model"),
            turns: Mutex::new(turns.into()),
            seen_requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ModelAdapter for ScriptedAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn complete(&self, request: InferenceRequest) -> AdapterResult<ModelTurn> {
        self.seen_requests.lock().unwrap().push(request);
        let turn = self
            .turns
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        Ok(turn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToolSchema)]
struct LookupInput {
    key: String,
}

fn registry_with_lookup() -> Arc<ToolRegistry> {
    let registry = ToolRegistry::new();
    let spec = ToolSpec::new(
        "lookup",
        "Looks up a value by key",
        |input: LookupInput| async move { Ok(format!("value-for-{}", input.key)) },
    )
    .expect("spec");
    registry
        .register(Arc::new(spec.bind(WireFormat::Json)))
        .expect("register");
    Arc::new(registry)
}

#[tokio::test]
async fn executes_tool_calls_then_returns_the_answer() {
    let adapter = Arc::new(ScriptedAdapter::new(vec![
        ModelTurn::new(
            "",
            vec![ToolCallRequest::new(
                "call_1",
                "lookup",
                json!({"key": "alpha"}),
            )],
        ),
        ModelTurn::new("the key maps to value-for-alpha", Vec::new()),
    ]));

    let agent = ReviewAgent::new(adapter.clone(), registry_with_lookup());
    let outcome = agent.run("what does alpha map to?").await.expect("outcome");

    assert_eq!(outcome.response(), "the key maps to value-for-alpha");
    assert_eq!(outcome.tool_calls().len(), 1);
    assert_eq!(outcome.tool_calls()[0].name(), "lookup");
    assert_eq!(outcome.tool_calls()[0].output(), "\"value-for-alpha\"");

    // Second request must replay the assistant call and carry the tool result.
    let requests = adapter.seen_requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    let replay = requests[1].messages();
    assert_eq!(replay.len(), 3);
    assert_eq!(replay[1].tool_calls().len(), 1);
    assert_eq!(replay[2].tool_call_id(), Some("call_1"));
}

#[tokio::test]
async fn advertises_descriptors_on_every_request() {
    let adapter = Arc::new(ScriptedAdapter::new(vec![ModelTurn::new(
        "done",
        Vec::new(),
    )]));

    let agent = ReviewAgent::new(adapter.clone(), registry_with_lookup());
    agent.run("hello").await.expect("outcome");

    let requests = adapter.seen_requests.lock().unwrap();
    assert_eq!(requests[0].tools().len(), 1);
    assert_eq!(requests[0].tools()[0].name(), "lookup");
    assert!(requests[0].system_prompt().is_some());
}

#[tokio::test]
async fn unknown_tool_calls_surface_as_tool_errors() {
    let adapter = Arc::new(ScriptedAdapter::new(vec![ModelTurn::new(
        "",
        vec![ToolCallRequest::new("call_1", "missing", json!({}))],
    )]));

    let agent = ReviewAgent::new(adapter, registry_with_lookup());
    let err = agent.run("go").await.expect_err("missing tool");

    assert!(matches!(
        err,
        AgentError::Tool {
            name,
            source: ToolError::UnknownTool { .. },
        } if name == "missing"
    ));
}

#[tokio::test]
async fn malformed_arguments_surface_as_decode_errors() {
    let adapter = Arc::new(ScriptedAdapter::new(vec![ModelTurn::new(
        "",
        vec![ToolCallRequest::new(
            "call_1",
            "lookup",
            json!({"wrong": "field"}),
        )],
    )]));

    let agent = ReviewAgent::new(adapter, registry_with_lookup());
    let err = agent.run("go").await.expect_err("bad arguments");

    assert!(matches!(
        err,
        AgentError::Tool {
            source: ToolError::Decode { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn turn_budget_is_enforced() {
    let tool_call_turn = || {
        ModelTurn::new(
            "",
            vec![ToolCallRequest::new(
                "call_n",
                "lookup",
                json!({"key": "again"}),
            )],
        )
    };
    let adapter = Arc::new(ScriptedAdapter::new(vec![
        tool_call_turn(),
        tool_call_turn(),
        tool_call_turn(),
    ]));

    let agent = ReviewAgent::new(adapter, registry_with_lookup()).with_max_turns(3);
    let err = agent.run("loop forever").await.expect_err("budget");

    assert!(matches!(
        err,
        AgentError::TurnBudgetExhausted { limit: 3 }
    ));
}
