//! Capabilities a backend supplies to the constrainer.

use eyre::Result;
use indexmap::IndexMap;
use morphgen_meta::{
    ConstrainedEnumValue, ConstrainedGraph, ConstrainedId, ConstrainedMetaModel,
    ConstrainedProperty, EnumValue, MetaModel, MetaModelGraph, ModelVariant, ObjectProperty,
};

/// Context for computing a model name.
#[derive(Debug, Clone, Copy)]
pub struct ModelNameContext<'a> {
    pub model: &'a MetaModel,
    pub graph: &'a MetaModelGraph,
}

/// Context for computing a property key.
#[derive(Debug, Clone, Copy)]
pub struct PropertyKeyContext<'a> {
    pub property: &'a ObjectProperty,
    /// The object that owns the property.
    pub object: &'a MetaModel,
    /// Properties of the same object constrained so far, keyed by raw name.
    pub assigned: &'a IndexMap<String, ConstrainedProperty>,
}

impl PropertyKeyContext<'_> {
    /// Returns true if an earlier sibling already uses `key`.
    pub fn is_taken(&self, key: &str) -> bool {
        self.assigned.values().any(|p| p.property_name == key)
    }
}

/// Context for computing an enum key.
#[derive(Debug, Clone, Copy)]
pub struct EnumKeyContext<'a> {
    pub value: &'a EnumValue,
    pub model: &'a MetaModel,
    /// Values of the same enum constrained so far.
    pub assigned: &'a [ConstrainedEnumValue],
}

impl EnumKeyContext<'_> {
    pub fn is_taken(&self, key: &str) -> bool {
        self.assigned.iter().any(|v| v.key == key)
    }
}

/// Context for computing an enum value expression.
#[derive(Debug, Clone, Copy)]
pub struct EnumValueContext<'a> {
    pub value: &'a EnumValue,
    pub model: &'a MetaModel,
}

/// Context for computing a literal constant.
#[derive(Debug, Clone, Copy)]
pub struct ConstantContext<'a> {
    pub model: &'a ConstrainedMetaModel,
    pub graph: &'a ConstrainedGraph,
    pub value: &'a serde_json::Value,
}

/// Naming rules of a target, one method per naming concern.
pub trait Constraints {
    fn model_name(&self, ctx: &ModelNameContext<'_>) -> Result<String>;

    fn property_key(&self, ctx: &PropertyKeyContext<'_>) -> Result<String>;

    fn enum_key(&self, ctx: &EnumKeyContext<'_>) -> Result<String>;

    fn enum_value(&self, ctx: &EnumValueContext<'_>) -> Result<String>;

    /// Render a literal constant, or `None` if the target has no syntax for it.
    fn constant(&self, ctx: &ConstantContext<'_>) -> Result<Option<String>>;
}

/// Context for computing a type expression.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    pub id: ConstrainedId,
    pub model: &'a ConstrainedMetaModel,
    pub graph: &'a ConstrainedGraph,
    /// The property this model is the value of, if any.
    pub property: Option<&'a ConstrainedProperty>,
}

impl<'a> TypeContext<'a> {
    /// Type expression of another model in the same graph.
    pub fn type_of(&self, id: ConstrainedId) -> &'a str {
        &self.graph[id].ty
    }

    /// Name of another model in the same graph.
    pub fn name_of(&self, id: ConstrainedId) -> &'a str {
        &self.graph[id].name
    }
}

/// Type table of a target, one method per model variant.
///
/// Container methods run after the children have their type, except for
/// the variants reported by [`is_safe`](Self::is_safe), which are typed
/// before their children are visited.
pub trait TypeMapping {
    fn any(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn string(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn integer(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn float(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn boolean(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn object(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn reference(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn enumeration(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn array(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn tuple(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn union(&self, ctx: &TypeContext<'_>) -> Result<String>;
    fn dictionary(&self, ctx: &TypeContext<'_>) -> Result<String>;

    /// Variants whose type does not depend on the type of their children.
    fn is_safe(&self, variant: ModelVariant) -> bool {
        matches!(
            variant,
            ModelVariant::Any
                | ModelVariant::Boolean
                | ModelVariant::Float
                | ModelVariant::Integer
                | ModelVariant::String
                | ModelVariant::Reference
                | ModelVariant::Object
                | ModelVariant::Enum
        )
    }
}

/// Dispatch to the [`TypeMapping`] method for the model's variant.
pub fn map_type<T: TypeMapping + ?Sized>(mapping: &T, ctx: &TypeContext<'_>) -> Result<String> {
    match ctx.model.variant() {
        ModelVariant::Any => mapping.any(ctx),
        ModelVariant::String => mapping.string(ctx),
        ModelVariant::Integer => mapping.integer(ctx),
        ModelVariant::Float => mapping.float(ctx),
        ModelVariant::Boolean => mapping.boolean(ctx),
        ModelVariant::Object => mapping.object(ctx),
        ModelVariant::Reference => mapping.reference(ctx),
        ModelVariant::Enum => mapping.enumeration(ctx),
        ModelVariant::Array => mapping.array(ctx),
        ModelVariant::Tuple => mapping.tuple(ctx),
        ModelVariant::Union => mapping.union(ctx),
        ModelVariant::Dictionary => mapping.dictionary(ctx),
    }
}
