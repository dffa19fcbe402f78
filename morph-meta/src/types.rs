//! Core type definitions shared by both graphs.

use std::fmt;

use crate::ModelId;

/// Payload-free discriminant of a model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    Any,
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
    Tuple,
    Union,
    Dictionary,
    Enum,
    Reference,
}

impl ModelVariant {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::Any => "any",
            ModelVariant::String => "string",
            ModelVariant::Integer => "integer",
            ModelVariant::Float => "float",
            ModelVariant::Boolean => "boolean",
            ModelVariant::Object => "object",
            ModelVariant::Array => "array",
            ModelVariant::Tuple => "tuple",
            ModelVariant::Union => "union",
            ModelVariant::Dictionary => "dictionary",
            ModelVariant::Enum => "enum",
            ModelVariant::Reference => "reference",
        }
    }

    /// Returns true for variants that hold other models.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ModelVariant::Object
                | ModelVariant::Array
                | ModelVariant::Tuple
                | ModelVariant::Union
                | ModelVariant::Dictionary
        )
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged-union metadata: the property that tells members apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    pub discriminator: String,
}

impl Discriminator {
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
        }
    }
}

/// How a dictionary is laid out when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DictionarySerialization {
    /// The dictionary is a field of its own.
    #[default]
    Normal,
    /// The entries are flattened into the owning object.
    Unwrap,
}

/// Variant-agnostic metadata attached to every meta-model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaModelOptions {
    pub discriminator: Option<Discriminator>,
    /// Supertype models this model inherits from.
    pub extend: Vec<ModelId>,
    /// Literal value the model is restricted to.
    pub const_value: Option<serde_json::Value>,
    pub is_nullable: bool,
    /// Format hint such as `int64`, `float` or `binary`.
    pub format: Option<String>,
}

impl MetaModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = Some(Discriminator::new(discriminator));
        self
    }

    pub fn extend(mut self, model: ModelId) -> Self {
        self.extend.push(model);
        self
    }

    pub fn const_value(mut self, value: serde_json::Value) -> Self {
        self.const_value = Some(value);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}
