//! Struct renderer for object models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::{ConstrainedGraph, ConstrainedId, ConstrainedKind, DictionarySerialization};

use super::{SERDE_IMPORT, quoted, render_definition, slot_type, targets::STRUCT};
use crate::derives::render_derive;

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(STRUCT, hooks::SELF, |r, _| {
            let model = r.model();
            r.add_dependency(SERDE_IMPORT);

            let struct_macro = r.run_preset(hooks::STRUCT_MACRO, HookItem::None)?;
            let mut fields = Vec::new();
            for property in model.properties().into_iter().flat_map(|p| p.values()) {
                fields.push(r.run_preset(hooks::FIELD_MACRO, HookItem::Property(property))?);
                fields.push(r.run_preset(hooks::FIELD, HookItem::Property(property))?);
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let doc = format!("/// {0} represents a {0} model.", model.name);
            Ok(render_definition(
                r,
                &[doc, struct_macro],
                &format!("pub struct {}", model.name),
                &r.render_block(fields, 1),
                &additional_content,
            ))
        })
        .hook(STRUCT, hooks::STRUCT_MACRO, |r, _| {
            Ok(render_derive(r.graph(), r.model_id()))
        })
        .hook(STRUCT, hooks::FIELD_MACRO, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            if is_unwrapped_dictionary(r.graph(), property.model) {
                return Ok("#[serde(flatten)]".to_string());
            }
            let mut serde_args = vec![format!(
                "rename = {}",
                quoted(&property.unconstrained_property_name)
            )];
            if !property.required {
                serde_args.push("skip_serializing_if = \"Option::is_none\"".to_string());
            }
            Ok(format!("#[serde({})]", serde_args.join(", ")))
        })
        .hook(STRUCT, hooks::FIELD, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            Ok(format!(
                "pub {}: {},",
                property.property_name,
                slot_type(r.graph(), property.model, property.required)
            ))
        })
}

/// Dictionaries serialized as `Unwrap` spread their entries into the owning
/// struct.
fn is_unwrapped_dictionary(graph: &ConstrainedGraph, id: ConstrainedId) -> bool {
    matches!(
        graph[graph.resolve(id)].kind,
        ConstrainedKind::Dictionary {
            serialization: DictionarySerialization::Unwrap,
            ..
        }
    )
}
