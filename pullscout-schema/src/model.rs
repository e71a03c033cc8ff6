//! Closed structural shape set shared across the tool layer.

use std::collections::BTreeSet;

/// Scalar kinds supported by the schema model.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarKind {
    /// Boolean value.
    Bool,
    /// Whole number.
    Int,
    /// Floating-point number.
    Float,
    /// Text value.
    String,
    /// Constant literal; carried as text on the wire.
    Const,
}

/// Structural description of a tool input or output type.
///
/// The shape set is deliberately closed: scalars, homogeneous lists, and
/// objects with named properties. [`StructuralSchema::Reference`] marks an
/// unresolved self-reference produced when generation detects a cycle; it is
/// never a valid shape at translation time.
#[derive(Clone, Debug, PartialEq)]
pub enum StructuralSchema {
    /// A single scalar value.
    Scalar(ScalarKind),
    /// A homogeneous list of a nested shape.
    List(Box<StructuralSchema>),
    /// An object with named, individually shaped properties.
    Object(ObjectSchema),
    /// An unresolved self-reference.
    Reference,
}

impl StructuralSchema {
    /// Convenience constructor for a list of the supplied shape.
    #[must_use]
    pub fn list(of: StructuralSchema) -> Self {
        Self::List(Box::new(of))
    }

    /// Returns `true` when the shape is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the description attached to an object shape, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(object) => object.description(),
            _ => None,
        }
    }
}

/// A named property inside an [`ObjectSchema`].
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    description: String,
    schema: StructuralSchema,
}

impl Property {
    /// Creates a property with the supplied name, description, and shape.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: StructuralSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the property description; empty when none was supplied.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the property shape.
    #[must_use]
    pub fn schema(&self) -> &StructuralSchema {
        &self.schema
    }
}

/// Object shape: an ordered mapping of property names to shapes plus the set
/// of required property names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectSchema {
    description: Option<String>,
    properties: Vec<Property>,
    required: BTreeSet<String>,
}

impl ObjectSchema {
    /// Creates an empty object shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a description to the object.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a property, marking it required when `required` is set.
    ///
    /// Declaration order is preserved; a later property with the same name is
    /// still appended and shadows nothing.
    pub fn push_property(&mut self, property: Property, required: bool) {
        if required {
            self.required.insert(property.name().to_owned());
        }
        self.properties.push(property);
    }

    /// Returns the object description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns `true` when the named property is required.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Returns the required property names in declaration order.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(Property::name)
            .filter(|name| self.required.contains(*name))
            .collect()
    }
}
