//! Enum renderer for enum models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::ConstrainedKind;

use super::{render_definition, targets::ENUM};

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(ENUM, hooks::SELF, |r, _| {
            let model = r.model();
            let mut items = Vec::new();
            if let ConstrainedKind::Enum { values } = &model.kind {
                for value in values {
                    items.push(format!(
                        "{},",
                        r.run_preset(hooks::ITEM, HookItem::EnumValue(value))?
                    ));
                }
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let body = r.render_block([r.render_block(items, 1), additional_content], 2);
            Ok(render_definition(r, &format!("enum {}", model.name), &body))
        })
        .hook(ENUM, hooks::ITEM, |_, args| {
            let HookItem::EnumValue(value) = args.item else {
                return Ok(args.content);
            };
            Ok(format!("{} = {}", value.key, value.value))
        })
}
