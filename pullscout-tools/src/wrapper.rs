//! Typed tool construction and schema-driven invocation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use pullscout_schema::{StructuralSchema, ToolSchema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::descriptor::ToolDescriptor;
use crate::registry::{ToolError, ToolResult};

/// Wire format applied when a tool result is rendered as text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WireFormat {
    /// Compact JSON.
    #[default]
    Json,
    /// Indented JSON for human-facing transcripts.
    PrettyJson,
}

impl WireFormat {
    /// Encodes a value using this format.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Encode`] when serialization fails.
    pub fn encode<T: Serialize>(self, value: &T) -> ToolResult<String> {
        let encoded = match self {
            Self::Json => serde_json::to_string(value),
            Self::PrettyJson => serde_json::to_string_pretty(value),
        };
        encoded.map_err(|err| ToolError::encode(err.to_string()))
    }
}

/// Future produced by a typed tool handler.
pub type ToolFuture<B> = BoxFuture<'static, ToolResult<B>>;

/// A named, schema-described wrapper around a strongly typed async function.
///
/// The input and output shapes are derived from the types at construction
/// time; no hand-written schema is involved. Specs are immutable once built.
pub struct ToolSpec<A, B> {
    name: String,
    description: String,
    input_schema: StructuralSchema,
    output_schema: StructuralSchema,
    handler: Arc<dyn Fn(A) -> ToolFuture<B> + Send + Sync>,
}

impl<A, B> Clone for ToolSpec<A, B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
            output_schema: self.output_schema.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A, B> fmt::Debug for ToolSpec<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<A, B> ToolSpec<A, B>
where
    A: ToolSchema + DeserializeOwned + Send + 'static,
    B: ToolSchema + Serialize + Send + Sync + 'static,
{
    /// Creates a tool spec from an explicit name, description, and handler.
    ///
    /// The name is taken as given; use
    /// [`canonical_tool_name`](crate::canonical_tool_name) when deriving it
    /// from a declaration identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSpec`] when the name or description is
    /// empty.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> ToolResult<Self>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult<B>> + Send + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::InvalidSpec {
                reason: "tool name cannot be empty".into(),
            });
        }

        let description = description.into();
        if description.trim().is_empty() {
            return Err(ToolError::InvalidSpec {
                reason: "tool description cannot be empty".into(),
            });
        }

        Ok(Self {
            name,
            description,
            input_schema: A::schema(),
            output_schema: B::schema(),
            handler: Arc::new(move |input| -> ToolFuture<B> { Box::pin(handler(input)) }),
        })
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the derived input shape.
    #[must_use]
    pub fn input_schema(&self) -> &StructuralSchema {
        &self.input_schema
    }

    /// Returns the derived output shape.
    #[must_use]
    pub fn output_schema(&self) -> &StructuralSchema {
        &self.output_schema
    }

    /// Invokes the bound function with an already-typed input.
    ///
    /// # Errors
    ///
    /// Propagates whatever the bound function returns, unchanged.
    pub async fn invoke(&self, input: A) -> ToolResult<B> {
        (self.handler)(input).await
    }

    /// Binds the spec to a wire format, deriving its descriptor once.
    ///
    /// # Panics
    ///
    /// Panics when the input shape still contains an unresolved reference;
    /// see [`parameter_type`](crate::parameter_type).
    #[must_use]
    pub fn bind(self, format: WireFormat) -> BoundTool<A, B> {
        BoundTool::new(self, format)
    }
}

/// Type-erased call surface exposed to the host agent.
#[async_trait]
pub trait AgentTool: Send + Sync {
    /// Advertised contract the host uses to construct valid calls.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Decodes raw arguments, invokes the bound function, and wraps the
    /// output for on-demand rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Decode`] when the arguments do not conform to
    /// the declared input shape, or whatever error the bound function
    /// raised. Nothing is retried or masked here.
    async fn execute(&self, args: Value) -> ToolResult<ToolOutput>;
}

/// A [`ToolSpec`] bound to a wire format, ready for registration.
pub struct BoundTool<A, B> {
    spec: ToolSpec<A, B>,
    descriptor: ToolDescriptor,
    format: WireFormat,
}

impl<A, B> BoundTool<A, B>
where
    A: ToolSchema + DeserializeOwned + Send + 'static,
    B: ToolSchema + Serialize + Send + Sync + 'static,
{
    fn new(spec: ToolSpec<A, B>, format: WireFormat) -> Self {
        let descriptor =
            ToolDescriptor::for_input(spec.name(), spec.description(), spec.input_schema());
        Self {
            spec,
            descriptor,
            format,
        }
    }
}

impl<A, B> fmt::Debug for BoundTool<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundTool")
            .field("name", &self.spec.name)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<A, B> AgentTool for BoundTool<A, B>
where
    A: ToolSchema + DeserializeOwned + Send + 'static,
    B: ToolSchema + Serialize + Send + Sync + 'static,
{
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, args: Value) -> ToolResult<ToolOutput> {
        let input = decode_arguments::<A>(self.spec.input_schema(), args)?;
        let output = self.spec.invoke(input).await?;
        Ok(ToolOutput::new(output, self.format))
    }
}

/// Decodes a raw argument payload according to the input shape.
///
/// Scalar- and list-shaped inputs arrive wrapped in the synthetic `"value"`
/// field advertised by the descriptor; object-shaped inputs decode their
/// named fields directly. The two conventions must stay in lockstep with
/// [`ToolDescriptor::for_input`].
fn decode_arguments<A: DeserializeOwned>(
    shape: &StructuralSchema,
    args: Value,
) -> ToolResult<A> {
    let payload = match shape {
        StructuralSchema::Scalar(_) | StructuralSchema::List(_) => match args {
            Value::Object(mut fields) => fields
                .remove("value")
                .ok_or_else(|| ToolError::decode("missing required field `value`"))?,
            _ => {
                return Err(ToolError::decode(
                    "expected an argument object carrying a `value` field",
                ));
            }
        },
        _ => args,
    };
    serde_json::from_value(payload).map_err(|err| ToolError::decode(err.to_string()))
}

/// Tool result holding the typed output behind a lazily applied encoder.
///
/// The encoded text is produced only when [`ToolOutput::text`] is called,
/// with the format the tool was bound to; nothing is serialized eagerly.
pub struct ToolOutput {
    render: Box<dyn Fn() -> ToolResult<String> + Send + Sync>,
}

impl ToolOutput {
    /// Wraps a typed value with the format used to render it.
    #[must_use]
    pub fn new<B>(value: B, format: WireFormat) -> Self
    where
        B: Serialize + Send + Sync + 'static,
    {
        Self {
            render: Box::new(move || format.encode(&value)),
        }
    }

    /// Renders the output as text.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Encode`] when serialization fails.
    pub fn text(&self) -> ToolResult<String> {
        (self.render)()
    }
}

impl fmt::Debug for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolOutput").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pullscout_schema::ToolSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToolSchema)]
    struct TicketQuery {
        #[schema(description = "Queue holding the ticket")]
        queue: String,
        #[schema(description = "Ticket number")]
        number: u64,
        #[schema(description = "Include closed tickets")]
        include_closed: Option<bool>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToolSchema)]
    struct Ticket {
        queue: String,
        number: u64,
        tags: Vec<String>,
    }

    fn ticket_tool() -> ToolSpec<TicketQuery, Ticket> {
        ToolSpec::new("get_ticket", "Fetch a ticket", |query: TicketQuery| async move {
            Ok(Ticket {
                queue: query.queue,
                number: query.number,
                tags: vec!["open".to_owned()],
            })
        })
        .expect("spec")
    }

    #[test]
    fn spec_rejects_empty_name() {
        let err = ToolSpec::<TicketQuery, Ticket>::new(" ", "desc", |_q| async move {
            Err(ToolError::execution("unused"))
        })
        .expect_err("empty name");
        assert!(matches!(err, ToolError::InvalidSpec { .. }));
    }

    #[test]
    fn descriptor_derived_once_from_input_shape() {
        let bound = ticket_tool().bind(WireFormat::Json);
        let descriptor = bound.descriptor();

        assert_eq!(descriptor.name(), "get_ticket");
        let names: Vec<_> = descriptor.parameters().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["queue", "number", "include_closed"]);
        assert_eq!(descriptor.required(), ["queue", "number"]);
    }

    #[tokio::test]
    async fn executes_object_shaped_arguments() {
        let bound = ticket_tool().bind(WireFormat::Json);
        let output = bound
            .execute(json!({"queue": "infra", "number": 7}))
            .await
            .expect("execute");

        let text = output.text().expect("render");
        let ticket: Ticket = serde_json::from_str(&text).expect("parse");
        assert_eq!(ticket.queue, "infra");
        assert_eq!(ticket.number, 7);
    }

    #[tokio::test]
    async fn missing_required_field_is_a_decode_error() {
        let bound = ticket_tool().bind(WireFormat::Json);
        let err = bound
            .execute(json!({"queue": "infra"}))
            .await
            .expect_err("missing number");
        assert!(matches!(err, ToolError::Decode { .. }));
    }

    #[tokio::test]
    async fn scalar_arguments_unwrap_the_value_field() {
        let double = ToolSpec::new("double", "Doubles a number", |n: i64| async move {
            Ok(n * 2)
        })
        .expect("spec")
        .bind(WireFormat::Json);

        assert_eq!(double.descriptor().parameters()[0].name(), "value");

        let output = double.execute(json!({"value": 21})).await.expect("execute");
        assert_eq!(output.text().expect("render"), "42");
    }

    #[tokio::test]
    async fn scalar_arguments_without_value_field_fail_to_decode() {
        let double = ToolSpec::new("double", "Doubles a number", |n: i64| async move {
            Ok(n * 2)
        })
        .expect("spec")
        .bind(WireFormat::Json);

        let err = double.execute(json!({"n": 21})).await.expect_err("no value");
        assert!(matches!(err, ToolError::Decode { .. }));

        let err = double.execute(json!(21)).await.expect_err("bare payload");
        assert!(matches!(err, ToolError::Decode { .. }));
    }

    #[tokio::test]
    async fn list_arguments_unwrap_the_value_field() {
        let sum = ToolSpec::new("sum", "Sums numbers", |values: Vec<i64>| async move {
            Ok(values.iter().sum::<i64>())
        })
        .expect("spec")
        .bind(WireFormat::Json);

        let output = sum
            .execute(json!({"value": [1, 2, 3]}))
            .await
            .expect("execute");
        assert_eq!(output.text().expect("render"), "6");
    }

    #[tokio::test]
    async fn handler_errors_propagate_unchanged() {
        let failing = ToolSpec::<i64, i64>::new("fail", "Always fails", |_n| async move {
            Err(ToolError::execution("upstream unavailable"))
        })
        .expect("spec")
        .bind(WireFormat::Json);

        let err = failing
            .execute(json!({"value": 1}))
            .await
            .expect_err("handler error");
        assert!(matches!(err, ToolError::Execution { reason } if reason == "upstream unavailable"));
    }

    #[tokio::test]
    async fn round_trips_nested_values_through_the_codec() {
        let echo = ToolSpec::new("echo", "Echoes a ticket", |ticket: Ticket| async move {
            Ok(ticket)
        })
        .expect("spec")
        .bind(WireFormat::Json);

        let original = Ticket {
            queue: "storage".to_owned(),
            number: 41,
            tags: vec!["open".to_owned(), "urgent".to_owned()],
        };

        let encoded = WireFormat::Json.encode(&original).expect("encode");
        let args: Value = serde_json::from_str(&encoded).expect("raw args");
        let output = echo.execute(args).await.expect("execute");
        let recovered: Ticket =
            serde_json::from_str(&output.text().expect("render")).expect("decode");

        assert_eq!(recovered, original);
    }

    #[tokio::test]
    async fn scalar_round_trip_rewraps_the_value_field() {
        let echo = ToolSpec::new("echo_int", "Echoes a number", |n: i64| async move { Ok(n) })
            .expect("spec")
            .bind(WireFormat::Json);

        let encoded = WireFormat::Json.encode(&42_i64).expect("encode");
        let inner: Value = serde_json::from_str(&encoded).expect("value");
        let output = echo.execute(json!({"value": inner})).await.expect("execute");
        assert_eq!(output.text().expect("render"), "42");
    }

    #[derive(Debug, Clone, Serialize, Deserialize, ToolSchema)]
    struct Node {
        label: String,
        next: Option<Box<Node>>,
    }

    #[test]
    #[should_panic(expected = "unresolved schema reference")]
    fn binding_a_self_referential_input_is_fatal() {
        let spec = ToolSpec::new("walk", "Walks a node chain", |node: Node| async move {
            Ok(node.label)
        })
        .expect("spec");
        let _ = spec.bind(WireFormat::Json);
    }

    #[test]
    fn output_schema_is_recorded() {
        let spec = ticket_tool();
        assert!(spec.output_schema().is_object());
        assert!(spec.input_schema().is_object());
    }

    #[test]
    fn pretty_format_renders_indented_text() {
        let output = ToolOutput::new(
            Ticket {
                queue: "infra".to_owned(),
                number: 1,
                tags: Vec::new(),
            },
            WireFormat::PrettyJson,
        );
        let text = output.text().expect("render");
        assert!(text.contains('\n'));
    }
}
