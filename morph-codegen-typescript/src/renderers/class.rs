//! Class renderer for object models.
//!
//! Properties are stored in private `_name` fields, set from a single
//! `input` object in the constructor and exposed through accessors.
//! Constant properties are initialized in place and get no setter.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::ConstrainedProperty;

use super::{const_value, property_signature, property_type, render_definition, targets::CLASS};

fn or_undefined(property: &ConstrainedProperty) -> &'static str {
    if property.required { "" } else { " | undefined" }
}

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(CLASS, hooks::SELF, |r, _| {
            let model = r.model();
            let properties: Vec<_> = model.properties().into_iter().flat_map(|p| p.values()).collect();

            let mut fields = Vec::new();
            for &property in &properties {
                fields.push(r.run_preset(hooks::PROPERTY, HookItem::Property(property))?);
            }
            let ctor = r.run_preset(hooks::CTOR, HookItem::None)?;
            let mut accessors = Vec::new();
            for &property in &properties {
                let getter = r.run_preset(hooks::GETTER, HookItem::Property(property))?;
                let setter = r.run_preset(hooks::SETTER, HookItem::Property(property))?;
                accessors.push(r.render_block([getter, setter], 1));
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let body = r.render_block(
                [
                    r.render_block(fields, 1),
                    ctor,
                    r.render_block(accessors, 2),
                    additional_content,
                ],
                2,
            );
            Ok(render_definition(r, &format!("class {}", model.name), &body))
        })
        .hook(CLASS, hooks::PROPERTY, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            let signature = property_signature(r.graph(), property);
            match const_value(r.graph(), property) {
                Some(value) => Ok(format!("private _{signature} = {value};")),
                None => Ok(format!("private _{signature};")),
            }
        })
        .hook(CLASS, hooks::CTOR, |r, _| {
            let graph = r.graph();
            let mut params = Vec::new();
            let mut assignments = Vec::new();
            for property in r.model().properties().into_iter().flat_map(|p| p.values()) {
                if const_value(graph, property).is_some() {
                    continue;
                }
                let name = &property.property_name;
                params.push(format!("{},", property_signature(graph, property)));
                assignments.push(format!("this._{name} = input.{name};"));
            }
            if params.is_empty() {
                return Ok("constructor(input: {}) {}".to_string());
            }

            let mut builder = r.code_builder();
            builder
                .push_line("constructor(input: {")
                .push_indent()
                .push_lines(&params.join("\n"))
                .push_dedent()
                .push_line("}) {")
                .push_indent()
                .push_lines(&assignments.join("\n"))
                .push_dedent()
                .push_line("}");
            Ok(builder.build_trimmed())
        })
        .hook(CLASS, hooks::GETTER, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            let name = &property.property_name;
            Ok(format!(
                "get {name}(): {}{} {{ return this._{name}; }}",
                property_type(r.graph(), property),
                or_undefined(property)
            ))
        })
        .hook(CLASS, hooks::SETTER, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            if const_value(r.graph(), property).is_some() {
                return Ok(String::new());
            }
            let name = &property.property_name;
            Ok(format!(
                "set {name}({name}: {}{}) {{ this._{name} = {name}; }}",
                r.graph()[property.model].ty,
                or_undefined(property)
            ))
        })
}
