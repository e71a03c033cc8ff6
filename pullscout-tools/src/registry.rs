//! Runtime registry for bound tools.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::descriptor::ToolDescriptor;
use crate::wrapper::{AgentTool, ToolOutput};

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Registry that stores bound tools keyed by name.
///
/// Tool name uniqueness is enforced here, at registration time; descriptors
/// handed out afterwards are immutable and safe to share across concurrent
/// invocations.
#[derive(Default)]
pub struct ToolRegistry {
    inner: RwLock<HashMap<String, Arc<dyn AgentTool>>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("tool registry poisoned");
        let names: Vec<_> = inner.keys().cloned().collect();
        f.debug_struct("ToolRegistry")
            .field("registered", &names)
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bound tool under its descriptor name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] when the name is already present.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn register(&self, tool: Arc<dyn AgentTool>) -> ToolResult<()> {
        let name = tool.descriptor().name().to_owned();
        let mut inner = self.inner.write().expect("tool registry poisoned");
        if inner.contains_key(&name) {
            return Err(ToolError::DuplicateTool { name });
        }
        inner.insert(name, tool);
        Ok(())
    }

    /// Returns the tool registered under the supplied name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentTool>> {
        let inner = self.inner.read().ok()?;
        inner.get(name).cloned()
    }

    /// Executes a registered tool with raw arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] when the name is not registered,
    /// or propagates the decode/execution error surfaced by the tool.
    pub async fn execute(&self, name: &str, args: Value) -> ToolResult<ToolOutput> {
        let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_owned(),
        })?;
        debug!(tool = name, "executing tool");
        tool.execute(args).await
    }

    /// Lists the advertised descriptors, sorted by tool name.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let inner = self.inner.read().expect("tool registry poisoned");
        let mut descriptors: Vec<_> = inner
            .values()
            .map(|tool| tool.descriptor().clone())
            .collect();
        descriptors.sort_by(|a, b| a.name().cmp(b.name()));
        descriptors
    }
}

/// Errors produced by tool registration and invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool spec failed validation.
    #[error("invalid tool spec: {reason}")]
    InvalidSpec {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// Requested tool does not exist.
    #[error("tool `{name}` is not registered")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// Raw arguments did not conform to the declared input shape.
    #[error("failed to decode tool arguments: {reason}")]
    Decode {
        /// Human-readable decoding failure.
        reason: String,
    },

    /// Tool output could not be encoded for the wire.
    #[error("failed to encode tool output: {reason}")]
    Encode {
        /// Human-readable encoding failure.
        reason: String,
    },

    /// The bound function failed during execution.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the bound function.
        reason: String,
    },
}

impl ToolError {
    /// Creates a decode error from the supplied reason.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an encode error from the supplied reason.
    #[must_use]
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }

    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::wrapper::{ToolSpec, WireFormat};
    use serde_json::json;

    fn echo_tool(name: &str) -> Arc<dyn AgentTool> {
        let spec = ToolSpec::new(name, "Echo the supplied text", |text: String| async move {
            Ok(text)
        })
        .expect("spec");
        Arc::new(spec.bind(WireFormat::Json))
    }

    #[tokio::test]
    async fn register_and_execute_tool() {
        let registry = ToolRegistry::new();
        registry.register(echo_tool("echo")).unwrap();

        let output = registry
            .execute("echo", json!({"value": "hello"}))
            .await
            .unwrap();
        assert_eq!(output.text().unwrap(), "\"hello\"");
    }

    #[tokio::test]
    async fn duplicate_registration_errors() {
        let registry = ToolRegistry::new();
        registry.register(echo_tool("echo")).unwrap();

        let err = registry
            .register(echo_tool("echo"))
            .expect_err("duplicate registration should fail");
        assert!(matches!(err, ToolError::DuplicateTool { name } if name == "echo"));
    }

    #[tokio::test]
    async fn unknown_tool_errors() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("missing", Value::Null)
            .await
            .expect_err("unknown tool should error");
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "missing"));
    }

    #[test]
    fn descriptors_are_sorted_by_name() {
        let registry = ToolRegistry::new();
        registry.register(echo_tool("zulu")).unwrap();
        registry.register(echo_tool("alpha")).unwrap();

        let names: Vec<_> = registry
            .descriptors()
            .iter()
            .map(|descriptor| descriptor.name().to_owned())
            .collect();
        assert_eq!(names, ["alpha", "zulu"]);
    }
}
