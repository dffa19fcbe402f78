//! Rust-specific naming conventions.

use morphgen_codegen::naming::{NamingConvention, escape_with_prefix, sanitize_identifier};
use morphgen_core::{to_pascal_case, to_snake_case};

/// Rust naming conventions.
///
/// Reserved words are escaped with the `reserved_` prefix rather than as raw
/// identifiers; field renderers keep the wire name in `#[serde(rename)]`.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    type_name: to_pascal_case,
    property: to_snake_case,
    enum_key: to_pascal_case,
    sanitize: sanitize_identifier,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    ],
    escape_reserved: escape_with_prefix,
};
