//! Review agent loop.
//!
//! Advertises the registry's tool descriptors to a model adapter, executes
//! the tool calls the model asks for, and feeds the rendered results back
//! into the conversation until the model answers with plain content or the
//! turn budget runs out. Tool and adapter failures propagate unchanged;
//! this layer adds no retry, masking, or timeout of its own.

#![warn(missing_docs, clippy::pedantic)]

mod session;

pub use session::SessionId;

use std::sync::Arc;

use pullscout_adapters::traits::{
    AdapterError, InferenceRequest, MessageRole, ModelAdapter, PromptMessage,
};
use pullscout_tools::{ToolError, ToolRegistry};
use thiserror::Error;
use tracing::{debug, info};

/// Result alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Default system prompt used when none is configured.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior engineer reviewing GitHub pull requests. \
     Use the available tools to gather the pull request details and its comments before answering. \
     Be concrete and cite what you read.";

/// Default cap on model turns per session.
const DEFAULT_MAX_TURNS: usize = 8;

/// Errors raised while running a review session.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model adapter failed.
    #[error("model adapter failed: {source}")]
    Adapter {
        /// Underlying adapter error.
        #[from]
        source: AdapterError,
    },

    /// A tool invocation failed.
    #[error("tool `{name}` failed: {source}")]
    Tool {
        /// Name of the failing tool.
        name: String,
        /// Underlying tool error.
        source: ToolError,
    },

    /// The turn budget was exhausted before the model produced an answer.
    #[error("no answer after {limit} turns")]
    TurnBudgetExhausted {
        /// Configured maximum number of turns.
        limit: usize,
    },
}

/// Record of one executed tool call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallRecord {
    name: String,
    output: String,
}

impl ToolCallRecord {
    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rendered tool output that was fed back to the model.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }
}

/// Outcome of a completed review session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewOutcome {
    response: String,
    tool_calls: Vec<ToolCallRecord>,
}

impl ReviewOutcome {
    /// Returns the model's final answer.
    #[must_use]
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Returns the tool calls executed during the session, in order.
    #[must_use]
    pub fn tool_calls(&self) -> &[ToolCallRecord] {
        &self.tool_calls
    }
}

/// Agent that converses with a model while executing its tool calls.
pub struct ReviewAgent {
    adapter: Arc<dyn ModelAdapter>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_turns: usize,
}

impl std::fmt::Debug for ReviewAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let metadata = self.adapter.metadata();
        f.debug_struct("ReviewAgent")
            .field("provider", &metadata.provider())
            .field("model", &metadata.model())
            .field("max_turns", &self.max_turns)
            .finish_non_exhaustive()
    }
}

impl ReviewAgent {
    /// Creates an agent over the supplied adapter and registry.
    #[must_use]
    pub fn new(adapter: Arc<dyn ModelAdapter>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            adapter,
            tools,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Overrides the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Overrides the per-session turn budget.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Runs a session until the model answers without tool calls.
    ///
    /// # Errors
    ///
    /// Propagates adapter and tool failures unchanged and returns
    /// [`AgentError::TurnBudgetExhausted`] when the model keeps calling
    /// tools past the configured limit.
    pub async fn run(&self, goal: impl Into<String>) -> AgentResult<ReviewOutcome> {
        let session = SessionId::random();
        let descriptors = self.tools.descriptors();
        let mut messages = vec![PromptMessage::new(MessageRole::User, goal)];
        let mut records = Vec::new();

        info!(%session, tools = descriptors.len(), "starting review session");

        for turn in 0..self.max_turns {
            let request = InferenceRequest::new(messages.clone())?
                .with_system_prompt(self.system_prompt.clone())
                .with_tools(descriptors.clone());

            debug!(%session, turn, "requesting completion");
            let reply = self.adapter.complete(request).await?;

            if !reply.has_tool_calls() {
                info!(%session, turn, tool_calls = records.len(), "session complete");
                return Ok(ReviewOutcome {
                    response: reply.content().to_owned(),
                    tool_calls: records,
                });
            }

            messages.push(PromptMessage::assistant_calls(
                reply.content(),
                reply.tool_calls().to_vec(),
            ));

            for call in reply.tool_calls() {
                info!(%session, tool = call.name(), "executing tool call");
                let output = self
                    .tools
                    .execute(call.name(), call.arguments().clone())
                    .await
                    .map_err(|source| AgentError::Tool {
                        name: call.name().to_owned(),
                        source,
                    })?;
                let text = output.text().map_err(|source| AgentError::Tool {
                    name: call.name().to_owned(),
                    source,
                })?;
                messages.push(PromptMessage::tool_result(call.id(), text.clone()));
                records.push(ToolCallRecord {
                    name: call.name().to_owned(),
                    output: text,
                });
            }
        }

        Err(AgentError::TurnBudgetExhausted {
            limit: self.max_turns,
        })
    }
}
