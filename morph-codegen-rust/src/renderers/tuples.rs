//! Tuple struct renderer for tuple models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::ConstrainedKind;

use super::{SERDE_IMPORT, slot_type, targets::TUPLE};
use crate::derives::render_derive;

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(TUPLE, hooks::SELF, |r, _| {
            let model = r.model();
            r.add_dependency(SERDE_IMPORT);

            let struct_macro = r.run_preset(hooks::STRUCT_MACRO, HookItem::None)?;
            let mut fields = Vec::new();
            if let ConstrainedKind::Tuple { values } = &model.kind {
                for value in values {
                    fields.push(r.run_preset(hooks::FIELD, HookItem::TupleValue(value))?);
                }
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let mut builder = r.code_builder();
            builder
                .push_line(&format!("/// {0} represents a {0} tuple.", model.name))
                .push_lines(&struct_macro)
                .push_line(&format!("pub struct {}({});", model.name, fields.join(", ")));
            if !additional_content.is_empty() {
                builder.push_blank().push_lines(&additional_content);
            }
            Ok(builder.build_trimmed())
        })
        .hook(TUPLE, hooks::STRUCT_MACRO, |r, _| {
            Ok(render_derive(r.graph(), r.model_id()))
        })
        .hook(TUPLE, hooks::FIELD, |r, args| {
            let HookItem::TupleValue(value) = args.item else {
                return Ok(args.content);
            };
            Ok(format!("pub {}", slot_type(r.graph(), value.value, true)))
        })
}
