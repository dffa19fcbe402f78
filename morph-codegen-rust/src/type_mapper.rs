//! Rust type mapper implementation.

use eyre::Result;
use morphgen_codegen::constrain::{TypeContext, TypeMapping};
use morphgen_meta::ConstrainedKind;

/// Maps constrained models to Rust type syntax.
///
/// Numeric and string types honor the schema `format`; named models are
/// referred to by their bare name so that the generated module decides how
/// they are brought into scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapping;

fn format_of<'a>(ctx: &TypeContext<'a>) -> Option<&'a str> {
    ctx.model.options.format.as_deref()
}

/// Rust integer type for a schema integer `format`.
pub fn integer_type(format: Option<&str>) -> &'static str {
    match format {
        Some("int8" | "i8") => "i8",
        Some("int16" | "i16") => "i16",
        Some("int32" | "integer" | "i32") => "i32",
        Some("int64" | "long" | "i64") => "i64",
        Some("int128" | "i128") => "i128",
        Some("uint8" | "u8") => "u8",
        Some("uint16" | "u16") => "u16",
        Some("uint32" | "u32") => "u32",
        Some("uint64" | "u64") => "u64",
        Some("uint128" | "u128") => "u128",
        _ => "i32",
    }
}

/// Rust float type for a schema number `format`.
pub fn float_type(format: Option<&str>) -> &'static str {
    match format {
        Some("float" | "fp32" | "f32" | "float32") => "f32",
        _ => "f64",
    }
}

impl TypeMapping for RustTypeMapping {
    fn any(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("serde_json::Value".to_string())
    }

    fn string(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match format_of(ctx) {
            Some("bytes" | "binary") => Ok("Vec<u8>".to_string()),
            _ => Ok("String".to_string()),
        }
    }

    fn integer(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(integer_type(format_of(ctx)).to_string())
    }

    fn float(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(float_type(format_of(ctx)).to_string())
    }

    fn boolean(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("bool".to_string())
    }

    fn object(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn reference(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.name_of(ctx.graph.resolve(ctx.id)).to_string())
    }

    fn enumeration(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn array(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match ctx.model.kind {
            ConstrainedKind::Array { value } => Ok(format!("Vec<{}>", ctx.type_of(value))),
            _ => Ok("Vec<serde_json::Value>".to_string()),
        }
    }

    fn tuple(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn union(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }

    fn dictionary(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match ctx.model.kind {
            ConstrainedKind::Dictionary { key, value, .. } => Ok(format!(
                "std::collections::HashMap<{}, {}>",
                ctx.type_of(key),
                ctx.type_of(value)
            )),
            _ => Ok("std::collections::HashMap<String, serde_json::Value>".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use morphgen_codegen::constrain::constrain;
    use morphgen_meta::{
        DictionarySerialization, MetaModel, MetaModelGraph, MetaModelKind, MetaModelOptions,
    };

    use super::*;
    use crate::RustGenerator;

    fn field_types(graph: &MetaModelGraph, root: morphgen_meta::ModelId) -> Vec<String> {
        let generator = RustGenerator::default();
        let model = constrain(graph, root, &RustTypeMapping, &generator.constraints).unwrap();
        model
            .model()
            .properties()
            .unwrap()
            .values()
            .map(|p| model.graph[p.model].ty.clone())
            .collect()
    }

    #[test]
    fn test_format_tables() {
        assert_eq!(integer_type(None), "i32");
        assert_eq!(integer_type(Some("int64")), "i64");
        assert_eq!(integer_type(Some("uint8")), "u8");
        assert_eq!(integer_type(Some("date")), "i32");
        assert_eq!(float_type(Some("float")), "f32");
        assert_eq!(float_type(Some("double")), "f64");
    }

    #[test]
    fn test_map_primitives_and_containers() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Sample", MetaModelKind::object()));
        let id = graph.insert(
            MetaModel::new("id", MetaModelKind::Integer)
                .with_options(MetaModelOptions::new().format("int64")),
        );
        let ratio = graph.insert(MetaModel::new("ratio", MetaModelKind::Float));
        let blob = graph.insert(
            MetaModel::new("blob", MetaModelKind::String)
                .with_options(MetaModelOptions::new().format("binary")),
        );
        let flag = graph.insert(MetaModel::new("flag", MetaModelKind::Boolean));
        let extra = graph.insert(MetaModel::new("extra", MetaModelKind::Any));
        let item = graph.insert(MetaModel::new("item", MetaModelKind::String));
        let items = graph.insert(MetaModel::new("items", MetaModelKind::Array { value: item }));
        let key = graph.insert(MetaModel::new("key", MetaModelKind::String));
        let value = graph.insert(MetaModel::new("value", MetaModelKind::Integer));
        let counts = graph.insert(MetaModel::new(
            "counts",
            MetaModelKind::Dictionary {
                key,
                value,
                serialization: DictionarySerialization::Normal,
            },
        ));
        for (name, child) in [
            ("id", id),
            ("ratio", ratio),
            ("blob", blob),
            ("flag", flag),
            ("extra", extra),
            ("items", items),
            ("counts", counts),
        ] {
            graph.add_property(root, name, child, true);
        }

        assert_eq!(
            field_types(&graph, root),
            vec![
                "i64",
                "f64",
                "Vec<u8>",
                "bool",
                "serde_json::Value",
                "Vec<String>",
                "std::collections::HashMap<String, i32>",
            ]
        );
    }

    #[test]
    fn test_reference_uses_target_name() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Person", MetaModelKind::object()));
        let address = graph.insert(MetaModel::new("home address", MetaModelKind::object()));
        let reference = graph.reference("home address", address);
        graph.add_property(root, "home", reference, true);

        assert_eq!(field_types(&graph, root), vec!["HomeAddress"]);
    }
}
