//! Parameter vocabulary advertised to the calling model.

use pullscout_schema::{ObjectSchema, ScalarKind, StructuralSchema};

/// Parameter types understood by the calling model.
///
/// This vocabulary mirrors [`StructuralSchema`] but is deliberately simpler:
/// the model only distinguishes the primitive kinds, lists, and objects.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterType {
    /// Boolean parameter.
    Boolean,
    /// Whole-number parameter.
    Integer,
    /// Floating-point parameter.
    Float,
    /// Text parameter.
    String,
    /// Homogeneous list of a nested parameter type.
    List(Box<ParameterType>),
    /// Object parameter; fields outside `properties` are always rejected
    /// (the wire encoding emits `additionalProperties: false`).
    Object {
        /// Named parameters in declaration order.
        properties: Vec<ParameterDescriptor>,
        /// Names of the required parameters, in declaration order.
        required: Vec<String>,
    },
}

/// Descriptor for a single named parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    name: String,
    description: String,
    parameter_type: ParameterType,
}

impl ParameterDescriptor {
    /// Creates a descriptor for the supplied parameter.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_type: ParameterType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_type,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter description; empty when none was supplied.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameter type.
    #[must_use]
    pub fn parameter_type(&self) -> &ParameterType {
        &self.parameter_type
    }
}

/// Advertised, read-only contract for one tool.
///
/// Derived once when a tool is bound and safe to share across concurrent
/// invocations.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    parameters: Vec<ParameterDescriptor>,
    required: Vec<String>,
}

impl ToolDescriptor {
    /// Derives the descriptor for a tool with the supplied input shape.
    ///
    /// Object-shaped inputs expose one parameter per property with the
    /// declared required subset. Scalar- and list-shaped inputs synthesize a
    /// single required parameter named `"value"`, because the calling
    /// convention always expects a named-parameter object at the top level.
    ///
    /// # Panics
    ///
    /// Panics when the shape contains an unresolved
    /// [`StructuralSchema::Reference`]; see [`parameter_type`].
    #[must_use]
    pub fn for_input(name: &str, description: &str, input: &StructuralSchema) -> Self {
        match input {
            StructuralSchema::Object(object) => {
                let (parameters, required) = object_parameters(object);
                Self {
                    name: name.to_owned(),
                    description: description.to_owned(),
                    parameters,
                    required,
                }
            }
            shape => Self {
                name: name.to_owned(),
                description: description.to_owned(),
                parameters: vec![ParameterDescriptor::new(
                    "value",
                    shape.description().unwrap_or_default(),
                    parameter_type(shape),
                )],
                required: vec!["value".to_owned()],
            },
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the advertised parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Returns the names of the required parameters.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }
}

/// Translates a structural schema into the parameter vocabulary.
///
/// Total and deterministic for every resolved shape; `Const` scalars are
/// carried as text and map to [`ParameterType::String`].
///
/// # Panics
///
/// Panics when the schema contains a [`StructuralSchema::Reference`].
/// Schemas are always resolved before a tool is bound, so a surviving
/// reference is a generator defect rather than a recoverable condition.
#[must_use]
pub fn parameter_type(schema: &StructuralSchema) -> ParameterType {
    match schema {
        StructuralSchema::Scalar(ScalarKind::Bool) => ParameterType::Boolean,
        StructuralSchema::Scalar(ScalarKind::Int) => ParameterType::Integer,
        StructuralSchema::Scalar(ScalarKind::Float) => ParameterType::Float,
        StructuralSchema::Scalar(ScalarKind::String | ScalarKind::Const) => ParameterType::String,
        StructuralSchema::List(of) => ParameterType::List(Box::new(parameter_type(of))),
        StructuralSchema::Object(object) => {
            let (properties, required) = object_parameters(object);
            ParameterType::Object {
                properties,
                required,
            }
        }
        StructuralSchema::Reference => unimplemented!(
            "unresolved schema reference reached parameter translation"
        ),
    }
}

fn object_parameters(object: &ObjectSchema) -> (Vec<ParameterDescriptor>, Vec<String>) {
    let properties = object
        .properties()
        .iter()
        .map(|property| {
            ParameterDescriptor::new(
                property.name(),
                property.description(),
                parameter_type(property.schema()),
            )
        })
        .collect();
    let required = object
        .required_names()
        .into_iter()
        .map(ToOwned::to_owned)
        .collect();
    (properties, required)
}
