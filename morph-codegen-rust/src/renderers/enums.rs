//! Enum renderer for enum models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::ConstrainedKind;
use serde_json::Value;

use super::{SERDE_IMPORT, quoted, render_definition, targets::ENUM};
use crate::derives::render_derive;

/// Payload of enum values that are objects.
const MAP_PAYLOAD: &str = "std::collections::HashMap<String, serde_json::Value>";

/// The wire name of an enum value.
fn wire_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(ENUM, hooks::SELF, |r, _| {
            let model = r.model();
            r.add_dependency(SERDE_IMPORT);

            let struct_macro = r.run_preset(hooks::STRUCT_MACRO, HookItem::None)?;
            let mut items = Vec::new();
            if let ConstrainedKind::Enum { values } = &model.kind {
                for value in values {
                    items.push(r.run_preset(hooks::ITEM_MACRO, HookItem::EnumValue(value))?);
                    items.push(format!(
                        "{},",
                        r.run_preset(hooks::ITEM, HookItem::EnumValue(value))?
                    ));
                }
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let doc = format!("/// {0} represents a {0} model.", model.name);
            Ok(render_definition(
                r,
                &[doc, struct_macro],
                &format!("pub enum {}", model.name),
                &r.render_block(items, 1),
                &additional_content,
            ))
        })
        .hook(ENUM, hooks::STRUCT_MACRO, |r, _| {
            Ok(render_derive(r.graph(), r.model_id()))
        })
        .hook(ENUM, hooks::ITEM_MACRO, |_, args| {
            let HookItem::EnumValue(value) = args.item else {
                return Ok(args.content);
            };
            if value.original_value.is_object() {
                return Ok("#[serde(flatten)]".to_string());
            }
            Ok(format!(
                "#[serde(rename = {})]",
                quoted(&wire_name(&value.original_value))
            ))
        })
        .hook(ENUM, hooks::ITEM, |_, args| {
            let HookItem::EnumValue(value) = args.item else {
                return Ok(args.content);
            };
            if value.original_value.is_object() {
                return Ok(format!("{}({MAP_PAYLOAD})", value.key));
            }
            Ok(value.key.clone())
        })
}
