//! Default renderers of the Rust backend.
//!
//! Each renderer registers its hooks on one target of the default preset.
//!
//! - `struct` - objects, as a struct with named fields
//! - `enum` - enums, as a unit-variant enum
//! - `tuple` - tuples, as a tuple struct
//! - `union` - unions, as an enum with one newtype variant per member

mod enums;
mod structs;
mod tuples;
mod unions;

use morphgen_meta::{ConstrainedGraph, ConstrainedId, ConstrainedKind};
use serde_json::Value;

pub(crate) use enums::register as register_enum;
pub(crate) use structs::register as register_struct;
pub(crate) use tuples::register as register_tuple;
pub(crate) use unions::register as register_union;

/// Renderer targets hooks are registered under.
pub mod targets {
    pub const STRUCT: &str = "struct";
    pub const ENUM: &str = "enum";
    pub const TUPLE: &str = "tuple";
    pub const UNION: &str = "union";
}

/// Import every rendered type needs for its derives.
pub const SERDE_IMPORT: &str = "use serde::{Deserialize, Serialize};";

/// Quote `value` as a Rust string literal.
pub(crate) fn quoted(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Type of a field or tuple slot holding `model`.
///
/// References are boxed so that recursive types have a known size.
pub(crate) fn slot_type(graph: &ConstrainedGraph, model: ConstrainedId, required: bool) -> String {
    let ty = &graph[model].ty;
    let ty = match graph[model].kind {
        ConstrainedKind::Reference { .. } => format!("Box<{ty}>"),
        _ => ty.clone(),
    };
    if required { ty } else { format!("Option<{ty}>") }
}

/// Join the header, body and trailing content of a type definition.
///
/// An empty body renders as `{header} {}`; an empty `trailer` is dropped.
pub(crate) fn render_definition(
    renderer: &morphgen_codegen::render::Renderer<'_>,
    preamble: &[String],
    header: &str,
    body: &str,
    trailer: &str,
) -> String {
    let mut builder = renderer.code_builder();
    for block in preamble {
        builder.push_lines(block);
    }
    if body.is_empty() {
        builder.push_line(&format!("{header} {{}}"));
    } else {
        builder
            .push_line(&format!("{header} {{"))
            .push_indent()
            .push_lines(body)
            .push_dedent()
            .push_line("}");
    }
    if !trailer.is_empty() {
        builder.push_blank().push_lines(trailer);
    }
    builder.build_trimmed()
}
