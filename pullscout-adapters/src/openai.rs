//! `OpenAI` chat-completions adapter with tool calling.

use std::{env, fmt, time::Duration};

use async_trait::async_trait;
use hyper::body::to_bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Request, Uri};
use pullscout_tools::{ParameterDescriptor, ParameterType, ToolDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tokio::time::timeout;
use tracing::debug;

use crate::http_client::{HyperClient, build_https_client};
use crate::traits::{
    AdapterError, AdapterMetadata, AdapterResult, InferenceRequest, ModelAdapter, ModelTurn,
    PromptMessage, ToolCallRequest,
};

/// Environment variable used when loading configuration automatically.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the `OpenAI` adapter.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    default_temperature: Option<f32>,
}

impl OpenAiConfig {
    /// Creates a configuration using the supplied model identifier.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            model: model.into(),
            base_url: "https://api.openai.com/".to_owned(),
            timeout: Duration::from_secs(60),
            default_temperature: None,
        }
    }

    /// Loads the API key from the `OPENAI_API_KEY` environment variable.
    #[must_use]
    pub fn from_env(model: impl Into<String>) -> Self {
        let mut cfg = Self::new(model);
        cfg.api_key = env::var(OPENAI_API_KEY_ENV).ok();
        cfg
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> AdapterResult<Self> {
        let sanitized = sanitize_base_url(base_url.as_ref())?;
        self.base_url = sanitized;
        Ok(self)
    }

    /// Sets the default sampling temperature used when requests omit it.
    #[must_use]
    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = Some(temperature);
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supplies an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// `OpenAI` adapter that calls the official API over HTTPS.
pub struct OpenAiAdapter {
    client: HyperClient,
    endpoint: Uri,
    metadata: AdapterMetadata,
    api_key: String,
    timeout: Duration,
    default_temperature: Option<f32>,
}

impl fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("model", &self.metadata.model())
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiAdapter {
    /// Constructs a new adapter with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the API key is missing.
    pub fn new(config: OpenAiConfig) -> AdapterResult<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| AdapterError::configuration("OpenAI adapter requires an API key"))?;

        let metadata = AdapterMetadata::new("openai", config.model.clone());
        let endpoint = format!("{}v1/chat/completions", config.base_url)
            .parse::<Uri>()
            .map_err(|err| {
                AdapterError::configuration(format!("invalid OpenAI endpoint: {err}"))
            })?;

        let client = build_https_client()?;

        Ok(Self {
            client,
            endpoint,
            metadata,
            api_key,
            timeout: config.timeout,
            default_temperature: config.default_temperature,
        })
    }

    fn build_request(&self, request: &InferenceRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages().len() + 1);
        if let Some(system) = request.system_prompt() {
            messages.push(OpenAiMessage {
                role: "system".to_owned(),
                content: Some(system.to_owned()),
                tool_calls: None,
                tool_call_id: None,
            });
        }
        messages.extend(request.messages().iter().map(map_prompt_message));

        ChatCompletionRequest {
            model: self.metadata.model().to_owned(),
            messages,
            temperature: request.temperature().or(self.default_temperature),
            max_tokens: request.max_output_tokens(),
            tools: request.tools().iter().map(function_declaration).collect(),
            stream: false,
        }
    }
}

#[async_trait]
impl ModelAdapter for OpenAiAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn complete(&self, request: InferenceRequest) -> AdapterResult<ModelTurn> {
        debug!(
            model = self.metadata.model(),
            tools = request.tools().len(),
            "requesting chat completion"
        );
        let payload = self.build_request(&request);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            AdapterError::invalid_request(format!("failed to encode OpenAI request: {err}"))
        })?;

        let mut builder = Request::post(self.endpoint.clone());
        builder = builder.header(CONTENT_TYPE, "application/json");
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", self.api_key));

        let request = builder.body(Body::from(body)).map_err(|err| {
            AdapterError::transport(format!("failed to build OpenAI request: {err}"))
        })?;

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| AdapterError::transport("OpenAI request timed out"))?
            .map_err(|err| AdapterError::transport(format!("OpenAI request failed: {err}")))?;

        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.map_err(|err| {
            AdapterError::transport(format!("failed to read OpenAI response: {err}"))
        })?;

        if !status.is_success() {
            let reason = String::from_utf8_lossy(&bytes).to_string();
            return Err(AdapterError::Response {
                reason: format!("OpenAI returned {status}: {reason}"),
            });
        }

        let response: ChatCompletionResponse =
            serde_json::from_slice(&bytes).map_err(|err| AdapterError::Response {
                reason: format!("failed to decode OpenAI response: {err}"),
            })?;

        parse_turn(response)
    }
}

fn parse_turn(response: ChatCompletionResponse) -> AdapterResult<ModelTurn> {
    let message = response
        .choices
        .into_iter()
        .find_map(|choice| choice.message)
        .ok_or_else(|| AdapterError::Response {
            reason: "OpenAI response contained no choices".to_owned(),
        })?;

    let mut tool_calls = Vec::with_capacity(message.tool_calls.len());
    for call in message.tool_calls {
        let arguments: Value =
            serde_json::from_str(&call.function.arguments).map_err(|err| {
                AdapterError::Response {
                    reason: format!(
                        "malformed arguments for tool call `{}`: {err}",
                        call.function.name
                    ),
                }
            })?;
        tool_calls.push(ToolCallRequest::new(call.id, call.function.name, arguments));
    }

    Ok(ModelTurn::new(
        message.content.unwrap_or_default(),
        tool_calls,
    ))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OpenAiTool>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Serialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

fn map_prompt_message(message: &PromptMessage) -> OpenAiMessage {
    let tool_calls = if message.tool_calls().is_empty() {
        None
    } else {
        Some(message.tool_calls().iter().map(map_tool_call).collect())
    };

    // Assistant turns that only carried tool calls are replayed with null
    // content, matching what the provider originally produced.
    let content = if message.content().is_empty() && tool_calls.is_some() {
        None
    } else {
        Some(message.content().to_owned())
    };

    OpenAiMessage {
        role: message.role().to_string(),
        content,
        tool_calls,
        tool_call_id: message.tool_call_id().map(ToOwned::to_owned),
    }
}

fn map_tool_call(call: &ToolCallRequest) -> OpenAiToolCall {
    OpenAiToolCall {
        id: call.id().to_owned(),
        kind: "function",
        function: OpenAiFunctionCall {
            name: call.name().to_owned(),
            arguments: call.arguments().to_string(),
        },
    }
}

fn function_declaration(descriptor: &ToolDescriptor) -> OpenAiTool {
    let mut properties = Map::new();
    for parameter in descriptor.parameters() {
        properties.insert(parameter.name().to_owned(), parameter_schema(parameter));
    }

    OpenAiTool {
        kind: "function",
        function: OpenAiFunction {
            name: descriptor.name().to_owned(),
            description: descriptor.description().to_owned(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": descriptor.required(),
                "additionalProperties": false,
            }),
        },
    }
}

fn parameter_schema(parameter: &ParameterDescriptor) -> Value {
    let mut schema = type_schema(parameter.parameter_type());
    if !parameter.description().is_empty() {
        if let Some(object) = schema.as_object_mut() {
            object.insert(
                "description".to_owned(),
                Value::from(parameter.description()),
            );
        }
    }
    schema
}

fn type_schema(parameter_type: &ParameterType) -> Value {
    match parameter_type {
        ParameterType::Boolean => json!({"type": "boolean"}),
        ParameterType::Integer => json!({"type": "integer"}),
        ParameterType::Float => json!({"type": "number"}),
        ParameterType::String => json!({"type": "string"}),
        ParameterType::List(of) => json!({"type": "array", "items": type_schema(of)}),
        ParameterType::Object {
            properties,
            required,
        } => {
            let mut fields = Map::new();
            for parameter in properties {
                fields.insert(parameter.name().to_owned(), parameter_schema(parameter));
            }
            json!({
                "type": "object",
                "properties": fields,
                "required": required,
                "additionalProperties": false,
            })
        }
    }
}

fn sanitize_base_url(input: &str) -> AdapterResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(AdapterError::configuration(
            "OpenAI base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| AdapterError::configuration(format!("invalid OpenAI base URL: {err}")))?;
    Ok(base)
}
