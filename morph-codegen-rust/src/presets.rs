//! Built-in presets of the Rust backend.
//!
//! - [`rust_default_preset`] - the renderers every hook chain starts with
//! - [`description_preset`] - `///` docs from schema descriptions
//! - [`common_preset`] - `new` constructors and `Default` impls

use morphgen_codegen::{
    builder::CodeBuilder,
    preset::{HookItem, Preset, hooks},
    render::Renderer,
};
use morphgen_meta::{ConstrainedKind, ConstrainedMetaModel};
use serde::Deserialize;
use tracing::warn;

use crate::renderers::{
    register_enum, register_struct, register_tuple, register_union, slot_type,
    targets::{ENUM, STRUCT, TUPLE, UNION},
};

/// The default Rust renderers.
pub fn rust_default_preset() -> Preset {
    let preset = Preset::new("rust-default");
    let preset = register_struct(preset);
    let preset = register_enum(preset);
    let preset = register_tuple(preset);
    register_union(preset)
}

fn doc_comment(description: &str) -> String {
    let mut builder = CodeBuilder::default();
    builder.push_doc("///", description);
    builder.build_trimmed()
}

fn with_description(model: &ConstrainedMetaModel, content: String) -> String {
    match model.input_str("description") {
        Some(description) => format!("{}\n///\n{content}", doc_comment(description)),
        None => content,
    }
}

/// Prepend `///` docs taken from the `description` of the original input,
/// both on types and on struct fields.
pub fn description_preset() -> Preset {
    let mut preset = Preset::new("rust-description");
    for target in [STRUCT, ENUM, TUPLE, UNION] {
        preset = preset.hook(target, hooks::SELF, |r, args| {
            Ok(with_description(r.model(), args.content))
        });
    }
    preset.hook(STRUCT, hooks::FIELD_MACRO, |r, args| {
        let HookItem::Property(property) = args.item else {
            return Ok(args.content);
        };
        match r.graph()[property.model].input_str("description") {
            Some(description) => Ok(format!("{}\n{}", doc_comment(description), args.content)),
            None => Ok(args.content),
        }
    })
}

/// Options of [`common_preset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommonPresetOptions {
    /// `impl Default` for enums, using the schema `default` or the first value.
    pub implement_default: bool,
    /// `pub fn new(..)` for structs and tuple structs.
    pub implement_new: bool,
}

impl Default for CommonPresetOptions {
    fn default() -> Self {
        Self {
            implement_default: true,
            implement_new: true,
        }
    }
}

impl CommonPresetOptions {
    fn from_value(value: &serde_json::Value) -> eyre::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value.clone())?)
    }
}

fn append(content: String, block: String) -> String {
    if content.is_empty() {
        block
    } else {
        format!("{content}\n\n{block}")
    }
}

fn render_struct_new(r: &Renderer<'_>) -> String {
    let model = r.model();
    let graph = r.graph();
    let mut params = Vec::new();
    let mut fields = Vec::new();
    for property in model.properties().into_iter().flat_map(|p| p.values()) {
        let name = &property.property_name;
        let is_reference = matches!(graph[property.model].kind, ConstrainedKind::Reference { .. });
        let ty = &graph[property.model].ty;
        match (property.required, is_reference) {
            (true, true) => {
                params.push(format!("{name}: {ty}"));
                fields.push(format!("{name}: Box::new({name}),"));
            }
            (false, true) => {
                params.push(format!("{name}: Option<{ty}>"));
                fields.push(format!("{name}: {name}.map(Box::new),"));
            }
            (required, false) => {
                params.push(format!("{name}: {}", slot_type(graph, property.model, required)));
                fields.push(format!("{name},"));
            }
        }
    }

    r.code_builder()
        .line(&format!("impl {} {{", model.name))
        .indent()
        .line(&format!("pub fn new({}) -> Self {{", params.join(", ")))
        .indent()
        .line("Self {")
        .indent()
        .each(fields, |b, field| b.line(&field))
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .build_trimmed()
}

fn render_tuple_new(r: &Renderer<'_>) -> String {
    let model = r.model();
    let graph = r.graph();
    let ConstrainedKind::Tuple { values } = &model.kind else {
        return String::new();
    };
    let params: Vec<String> = values
        .iter()
        .map(|v| format!("value_{}: {}", v.index, slot_type(graph, v.value, true)))
        .collect();
    let args: Vec<String> = values.iter().map(|v| format!("value_{}", v.index)).collect();

    r.code_builder()
        .line(&format!("impl {} {{", model.name))
        .indent()
        .line(&format!("pub fn new({}) -> Self {{", params.join(", ")))
        .indent()
        .line(&format!("Self({})", args.join(", ")))
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .build_trimmed()
}

fn render_enum_default(r: &Renderer<'_>) -> Option<String> {
    let model = r.model();
    let ConstrainedKind::Enum { values } = &model.kind else {
        return None;
    };
    let chosen = match model.original_input.get("default") {
        Some(default) => values.iter().find(|v| &v.original_value == default),
        None => None,
    };
    let value = match chosen {
        Some(value) => value,
        None => {
            warn!(model = %model.name, "enum has no matching default, using its first value");
            values.first()?
        }
    };
    let variant = if value.original_value.is_object() {
        format!("Self::{}(Default::default())", value.key)
    } else {
        format!("Self::{}", value.key)
    };

    let code = r
        .code_builder()
        .line(&format!("impl Default for {} {{", model.name))
        .indent()
        .line("fn default() -> Self {")
        .indent()
        .line(&variant)
        .dedent()
        .line("}")
        .dedent()
        .line("}")
        .build_trimmed();
    Some(code)
}

/// Constructors and `Default` impls, configured by [`CommonPresetOptions`].
pub fn common_preset() -> Preset {
    Preset::new("rust-common")
        .hook(STRUCT, hooks::ADDITIONAL_CONTENT, |r, args| {
            let options = CommonPresetOptions::from_value(args.options)?;
            if !options.implement_new {
                return Ok(args.content);
            }
            Ok(append(args.content, render_struct_new(r)))
        })
        .hook(TUPLE, hooks::ADDITIONAL_CONTENT, |r, args| {
            let options = CommonPresetOptions::from_value(args.options)?;
            if !options.implement_new {
                return Ok(args.content);
            }
            Ok(append(args.content, render_tuple_new(r)))
        })
        .hook(ENUM, hooks::ADDITIONAL_CONTENT, |r, args| {
            let options = CommonPresetOptions::from_value(args.options)?;
            if !options.implement_default {
                return Ok(args.content);
            }
            match render_enum_default(r) {
                Some(block) => Ok(append(args.content, block)),
                None => Ok(args.content),
            }
        })
}
