//! Default renderers of the TypeScript backend.
//!
//! - `class` - objects, as a class with private fields and accessors
//! - `interface` - objects, when the generator is set to interfaces
//! - `enum` - enums
//! - `type` - every other model, as a type alias

mod class;
mod enums;
mod interface;
mod type_alias;

use morphgen_codegen::render::Renderer;
use morphgen_meta::{ConstrainedGraph, ConstrainedProperty};

pub(crate) use class::register as register_class;
pub(crate) use enums::register as register_enum;
pub(crate) use interface::register as register_interface;
pub(crate) use type_alias::register as register_type_alias;

/// Renderer targets hooks are registered under.
pub mod targets {
    pub const CLASS: &str = "class";
    pub const INTERFACE: &str = "interface";
    pub const ENUM: &str = "enum";
    pub const TYPE: &str = "type";
}

/// The literal a constant property is pinned to.
pub(crate) fn const_value<'a>(
    graph: &'a ConstrainedGraph,
    property: &ConstrainedProperty,
) -> Option<&'a str> {
    graph[property.model]
        .options
        .const_value
        .as_ref()
        .and_then(|constant| constant.value.as_deref())
}

/// Type of `property`: its constant literal when it has one.
pub(crate) fn property_type<'a>(graph: &'a ConstrainedGraph, property: &ConstrainedProperty) -> &'a str {
    const_value(graph, property).unwrap_or(graph[property.model].ty.as_str())
}

/// `name: type`, or `name?: type` for optional properties.
pub(crate) fn property_signature(graph: &ConstrainedGraph, property: &ConstrainedProperty) -> String {
    let optional = if property.required { "" } else { "?" };
    format!(
        "{}{optional}: {}",
        property.property_name,
        property_type(graph, property)
    )
}

/// Wrap `body` in `{header} { ... }`, or `{header} {}` when it is empty.
pub(crate) fn render_definition(renderer: &Renderer<'_>, header: &str, body: &str) -> String {
    if body.is_empty() {
        return format!("{header} {{}}");
    }
    let mut builder = renderer.code_builder();
    builder
        .push_line(&format!("{header} {{"))
        .push_indent()
        .push_lines(body)
        .push_dedent()
        .push_line("}");
    builder.build_trimmed()
}
