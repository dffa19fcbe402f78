//! Built-in presets of the TypeScript backend.

use morphgen_codegen::{
    builder::CodeBuilder,
    preset::{HookItem, Preset, hooks},
};

use crate::renderers::{
    register_class, register_enum, register_interface, register_type_alias,
    targets::{CLASS, ENUM, INTERFACE, TYPE},
};

/// The default TypeScript renderers.
pub fn typescript_default_preset() -> Preset {
    let preset = Preset::new("typescript-default");
    let preset = register_class(preset);
    let preset = register_interface(preset);
    let preset = register_enum(preset);
    register_type_alias(preset)
}

fn jsdoc(description: &str) -> String {
    let mut builder = CodeBuilder::default();
    builder
        .push_line("/**")
        .push_doc(" *", description)
        .push_line(" */");
    builder.build_trimmed()
}

fn with_jsdoc(description: Option<&str>, content: String) -> String {
    match description {
        Some(description) => format!("{}\n{content}", jsdoc(description)),
        None => content,
    }
}

/// Prepend JSDoc comments taken from the `description` of the original
/// input, on models and on the properties of classes and interfaces.
pub fn description_preset() -> Preset {
    let mut preset = Preset::new("typescript-description");
    for target in [CLASS, INTERFACE, ENUM, TYPE] {
        preset = preset.hook(target, hooks::SELF, |r, args| {
            Ok(with_jsdoc(r.model().input_str("description"), args.content))
        });
    }
    for target in [CLASS, INTERFACE] {
        preset = preset.hook(target, hooks::PROPERTY, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            let description = r.graph()[property.model].input_str("description");
            Ok(with_jsdoc(description, args.content))
        });
    }
    preset
}
