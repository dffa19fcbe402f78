//! Interface renderer for object models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};

use super::{property_signature, render_definition, targets::INTERFACE};

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(INTERFACE, hooks::SELF, |r, _| {
            let model = r.model();
            let mut properties = Vec::new();
            for property in model.properties().into_iter().flat_map(|p| p.values()) {
                properties.push(r.run_preset(hooks::PROPERTY, HookItem::Property(property))?);
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let body = r.render_block([r.render_block(properties, 1), additional_content], 2);
            Ok(render_definition(r, &format!("interface {}", model.name), &body))
        })
        .hook(INTERFACE, hooks::PROPERTY, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            Ok(format!("{};", property_signature(r.graph(), property)))
        })
}
