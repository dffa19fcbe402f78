use eyre::Result;
use morphgen_meta::{ConstrainedKind, ConstrainedMetaModel};
use serde_json::Value;

use super::{
    ConstantContext, Constraints, EnumKeyContext, EnumValueContext, ModelNameContext,
    PropertyKeyContext,
};
use crate::naming::{NameClass, NamingConvention};

/// Render a JSON value as a source literal.
///
/// Strings are quoted, numbers and booleans are kept as is, and objects and
/// arrays become the quoted JSON text.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.to_string(),
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()).to_string(),
    }
}

/// [`Constraints`] driven by a [`NamingConvention`].
///
/// Backends usually only differ in their convention and in how an enum
/// member is addressed from a constant (`Color.RED` against `Color::RED`).
#[derive(Debug, Clone, Copy)]
pub struct DefaultConstraints {
    pub naming: NamingConvention,
    /// Renders an enum member value.
    pub enum_value: fn(&Value) -> String,
    /// Separator between an enum name and one of its keys.
    pub member_separator: &'static str,
}

impl DefaultConstraints {
    pub fn new(naming: NamingConvention) -> Self {
        Self {
            naming,
            enum_value: render_literal,
            member_separator: ".",
        }
    }

    pub fn member_separator(mut self, separator: &'static str) -> Self {
        self.member_separator = separator;
        self
    }

    fn enum_member(&self, ctx: &ConstantContext<'_>) -> Option<String> {
        let model: &ConstrainedMetaModel = match ctx.model.kind {
            ConstrainedKind::Reference { target } => &ctx.graph[ctx.graph.resolve(target)],
            _ => ctx.model,
        };
        let ConstrainedKind::Enum { values } = &model.kind else {
            return None;
        };
        values
            .iter()
            .find(|v| &v.original_value == ctx.value)
            .map(|v| format!("{}{}{}", model.name, self.member_separator, v.key))
    }
}

impl Constraints for DefaultConstraints {
    fn model_name(&self, ctx: &ModelNameContext<'_>) -> Result<String> {
        Ok(self
            .naming
            .constrain_standalone(&ctx.model.name, NameClass::Model))
    }

    fn property_key(&self, ctx: &PropertyKeyContext<'_>) -> Result<String> {
        Ok(self.naming.constrain(
            &ctx.property.property_name,
            NameClass::Property,
            |key| ctx.is_taken(key),
        ))
    }

    fn enum_key(&self, ctx: &EnumKeyContext<'_>) -> Result<String> {
        Ok(self
            .naming
            .constrain(&ctx.value.key, NameClass::EnumKey, |key| ctx.is_taken(key)))
    }

    fn enum_value(&self, ctx: &EnumValueContext<'_>) -> Result<String> {
        Ok((self.enum_value)(&ctx.value.value))
    }

    fn constant(&self, ctx: &ConstantContext<'_>) -> Result<Option<String>> {
        Ok(Some(
            self.enum_member(ctx)
                .unwrap_or_else(|| render_literal(ctx.value)),
        ))
    }
}
