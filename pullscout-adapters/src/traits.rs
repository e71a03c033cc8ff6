//! Shared model adapter traits and data structures.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use pullscout_tools::ToolDescriptor;
use serde_json::Value;
use thiserror::Error;

/// Result alias used by model adapters.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Error type shared by adapter implementations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Adapter is misconfigured or missing credentials.
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The supplied request was invalid for the target model.
    #[error("invalid inference request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, protocol, etc.).
    #[error("adapter transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider rejected the request due to rate limiting.
    #[error("adapter rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Suggested delay before retrying.
        retry_after: Option<Duration>,
    },

    /// The provider returned a malformed response.
    #[error("adapter response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}

/// Minimal metadata describing a model adapter instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterMetadata {
    provider: &'static str,
    model: String,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "openai").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Roles supported in chat-style prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    /// System messages steer the assistant behaviour.
    System,
    /// User-authored content.
    User,
    /// Assistant (model) responses.
    Assistant,
    /// Tool results returned to the conversation.
    Tool,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        })
    }
}

/// Tool invocation requested by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolCallRequest {
    id: String,
    name: String,
    arguments: Value,
}

impl ToolCallRequest {
    /// Creates a tool call request.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Returns the provider-assigned call identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the tool name the model asked for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw argument payload.
    #[must_use]
    pub fn arguments(&self) -> &Value {
        &self.arguments
    }
}

/// Represents an instruction or message in a chat-style prompt.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptMessage {
    role: MessageRole,
    content: String,
    tool_call_id: Option<String>,
    tool_calls: Vec<ToolCallRequest>,
}

impl PromptMessage {
    /// Creates a new prompt message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// Creates a tool-result message answering the supplied call id.
    #[must_use]
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_call_id: Some(call_id.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Creates an assistant message echoing the calls the model requested.
    ///
    /// Providers require the assistant turn that contained the tool calls to
    /// be replayed before their results.
    #[must_use]
    pub fn assistant_calls(content: impl Into<String>, calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_calls: calls,
        }
    }

    /// Returns the message role.
    #[must_use]
    pub const fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the call id a tool-result message answers.
    #[must_use]
    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }

    /// Returns the tool calls echoed by an assistant message.
    #[must_use]
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        &self.tool_calls
    }
}

/// Request submitted to a model adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceRequest {
    system_prompt: Option<String>,
    messages: Vec<PromptMessage>,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
    tools: Vec<ToolDescriptor>,
}

impl InferenceRequest {
    /// Creates a request with the supplied messages.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRequest`] if the message list is empty.
    pub fn new(messages: Vec<PromptMessage>) -> AdapterResult<Self> {
        if messages.is_empty() {
            return Err(AdapterError::invalid_request(
                "inference request requires at least one message",
            ));
        }

        Ok(Self {
            system_prompt: None,
            messages,
            max_output_tokens: None,
            temperature: None,
            tools: Vec::new(),
        })
    }

    /// Sets the system prompt that guides model behavior.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum output token budget.
    #[must_use]
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Declares the tools the model may call, by descriptor.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    /// Returns the system prompt if configured.
    #[must_use]
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Returns the prompt messages.
    #[must_use]
    pub fn messages(&self) -> &[PromptMessage] {
        &self.messages
    }

    /// Returns the configured maximum output tokens.
    #[must_use]
    pub const fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the declared tool descriptors.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

/// Completed model turn: assistant content plus any requested tool calls.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelTurn {
    content: String,
    tool_calls: Vec<ToolCallRequest>,
}

impl ModelTurn {
    /// Creates a turn from the assistant content and tool calls.
    #[must_use]
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
        }
    }

    /// Returns the assistant content; empty when the model only called tools.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the tool calls requested by the model.
    #[must_use]
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        &self.tool_calls
    }

    /// Returns `true` when the model asked for at least one tool call.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Trait implemented by all model adapters.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Returns basic metadata describing the adapter instance.
    fn metadata(&self) -> &AdapterMetadata;

    /// Executes one completion turn against the provider.
    ///
    /// The call may suspend while the provider is contacted; cancellation
    /// and timeout behaviour are whatever the adapter implementation does.
    async fn complete(&self, request: InferenceRequest) -> AdapterResult<ModelTurn>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_request_messages() {
        let err = InferenceRequest::new(Vec::new()).expect_err("messages required");
        assert!(matches!(err, AdapterError::InvalidRequest { .. }));
    }

    #[test]
    fn builds_request() {
        let request = InferenceRequest::new(vec![PromptMessage::new(MessageRole::User, "ping")])
            .unwrap()
            .with_max_output_tokens(256)
            .with_temperature(0.7);

        assert_eq!(request.messages().len(), 1);
        assert_eq!(request.max_output_tokens(), Some(256));
        assert_eq!(request.temperature(), Some(0.7));
        assert!(request.tools().is_empty());
    }

    #[test]
    fn tool_result_carries_call_id() {
        let message = PromptMessage::tool_result("call_1", "{\"ok\":true}");
        assert_eq!(message.role(), MessageRole::Tool);
        assert_eq!(message.tool_call_id(), Some("call_1"));
    }

    #[test]
    fn turn_reports_tool_calls() {
        let turn = ModelTurn::new(
            "",
            vec![ToolCallRequest::new("call_1", "echo", json!({"value": 1}))],
        );
        assert!(turn.has_tool_calls());
        assert_eq!(turn.tool_calls()[0].name(), "echo");

        let done = ModelTurn::new("all good", Vec::new());
        assert!(!done.has_tool_calls());
    }
}
