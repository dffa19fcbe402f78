//! Enum renderer for union models.

use morphgen_codegen::preset::{HookItem, Preset, hooks};
use morphgen_meta::ConstrainedKind;
use tracing::warn;

use super::{SERDE_IMPORT, quoted, render_definition, targets::UNION};
use crate::derives::render_derive;

pub(crate) fn register(preset: Preset) -> Preset {
    preset
        .hook(UNION, hooks::SELF, |r, _| {
            let model = r.model();
            let graph = r.graph();
            r.add_dependency(SERDE_IMPORT);

            let members: &[_] = match &model.kind {
                ConstrainedKind::Union { members } => members,
                _ => &[],
            };
            let struct_macro = r.run_preset(hooks::STRUCT_MACRO, HookItem::None)?;
            let mut items = Vec::new();
            for &member in members {
                items.push(r.run_preset(hooks::ITEM_MACRO, HookItem::UnionMember(member))?);
                items.push(format!(
                    "{},",
                    r.run_preset(hooks::ITEM, HookItem::UnionMember(member))?
                ));
            }
            let additional_content = r.run_preset(hooks::ADDITIONAL_CONTENT, HookItem::None)?;

            let types: Vec<&str> = members.iter().map(|&m| graph[m].ty.as_str()).collect();
            let doc = format!(
                "/// {} represents a union of types: {}",
                model.name,
                types.join(", ")
            );
            Ok(render_definition(
                r,
                &[doc, struct_macro],
                &format!("pub enum {}", model.name),
                &r.render_block(items, 1),
                &additional_content,
            ))
        })
        .hook(UNION, hooks::STRUCT_MACRO, |r, _| {
            let model = r.model();
            let representation = match &model.options.discriminator {
                Some(discriminator) => {
                    format!("#[serde(tag = {})]", quoted(&discriminator.discriminator))
                }
                None => {
                    warn!(
                        model = %model.name,
                        "union has no discriminator, falling back to serde's untagged representation"
                    );
                    "#[serde(untagged)]".to_string()
                }
            };
            Ok(r.render_block(
                [render_derive(r.graph(), r.model_id()), representation],
                1,
            ))
        })
        .hook(UNION, hooks::ITEM_MACRO, |r, args| {
            let HookItem::UnionMember(member) = args.item else {
                return Ok(args.content);
            };
            Ok(format!("#[serde(rename = {})]", quoted(&r.graph()[member].name)))
        })
        .hook(UNION, hooks::ITEM, |r, args| {
            let HookItem::UnionMember(member) = args.item else {
                return Ok(args.content);
            };
            let graph = r.graph();
            let ty = &graph[graph.resolve(member)].ty;
            Ok(format!("{}({ty})", graph[member].name))
        })
}
