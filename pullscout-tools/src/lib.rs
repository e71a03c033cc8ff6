//! Schema-driven tool registration and invocation.
//!
//! A strongly typed async function becomes a [`ToolSpec`]; binding it derives
//! a [`ToolDescriptor`] in the parameter vocabulary the calling model
//! understands and produces an erased [`AgentTool`] that decodes raw JSON
//! arguments, invokes the function, and renders the result on demand.

#![warn(missing_docs, clippy::pedantic)]

mod descriptor;
mod naming;
mod registry;
mod wrapper;

pub use descriptor::{ParameterDescriptor, ParameterType, ToolDescriptor, parameter_type};
pub use naming::canonical_tool_name;
pub use registry::{ToolError, ToolRegistry, ToolResult};
pub use wrapper::{AgentTool, BoundTool, ToolOutput, ToolSpec, WireFormat};
