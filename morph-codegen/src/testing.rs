//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use eyre::Result;
use morphgen_core::{to_camel_case, to_constant_case, to_pascal_case};
use morphgen_meta::{
    ConstrainedKind, EnumValue, MetaModel, MetaModelGraph, MetaModelKind, ModelId, ModelVariant,
};
use serde_json::json;

use crate::{
    builder::Indentation,
    constrain::{
        ConstantContext, ConstrainedModel, Constraints, DefaultConstraints, EnumKeyContext,
        EnumValueContext, ModelNameContext, PropertyKeyContext, TypeContext, TypeMapping,
    },
    generator::{GeneratorOptions, ModelGenerator, OutputModel},
    naming::{NamingConvention, escape_with_prefix, sanitize_identifier},
    preset::{HookItem, Preset, PresetWithOptions, hooks},
    render::{RenderOutput, Renderer},
    split::SplitOptions,
};

/// A small naming convention: PascalCase models, camelCase properties and
/// CONSTANT_CASE enum keys.
pub const TEST_NAMING: NamingConvention = NamingConvention {
    type_name: to_pascal_case,
    property: to_camel_case,
    enum_key: to_constant_case,
    sanitize: sanitize_identifier,
    reserved_words: &["enum", "return", "type"],
    escape_reserved: escape_with_prefix,
};

/// `Address { street_name: string, city: string }`, both required.
pub fn address_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let address = graph.insert(
        MetaModel::new("Address", MetaModelKind::object())
            .with_original_input(json!({"type": "object", "description": "A postal address."})),
    );
    let street = graph.insert(MetaModel::new("street_name", MetaModelKind::String));
    let city = graph.insert(MetaModel::new("city", MetaModelKind::String));
    graph.add_property(address, "street_name", street, true);
    graph.add_property(address, "city", city, true);
    (graph, address)
}

/// `Node { next?: Node }`, a direct self-reference that is not split yet.
pub fn node_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let node = graph.insert(MetaModel::new("Node", MetaModelKind::object()));
    graph.add_property(node, "next", node, false);
    (graph, node)
}

/// An object with a property named `enum`.
pub fn reserved_property_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let root = graph.insert(MetaModel::new("Token", MetaModelKind::object()));
    let kind = graph.insert(MetaModel::new("enum", MetaModelKind::String));
    graph.add_property(root, "enum", kind, true);
    (graph, root)
}

/// An enum whose keys `1` and `number 1` both constrain to `NUMBER_1`.
pub fn colliding_enum_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let root = graph.insert(MetaModel::new(
        "Level",
        MetaModelKind::Enum {
            values: vec![
                EnumValue::new("1", json!("1")),
                EnumValue::new("number 1", json!("number 1")),
            ],
        },
    ));
    (graph, root)
}

/// `Person { name: string, address?: Address, tags: string[], status: Status }`
/// with nested `Address` and `Status` models, for splitting backends.
pub fn person_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let person = graph.insert(
        MetaModel::new("Person", MetaModelKind::object())
            .with_original_input(json!({"description": "Someone with an address."})),
    );
    let name = graph.insert(MetaModel::new("name", MetaModelKind::String));
    let address = graph.insert(MetaModel::new("Address", MetaModelKind::object()));
    let city = graph.insert(MetaModel::new("city", MetaModelKind::String));
    graph.add_property(address, "city", city, true);

    let tag = graph.insert(MetaModel::new("tag", MetaModelKind::String));
    let tags = graph.insert(MetaModel::new("tags", MetaModelKind::Array { value: tag }));
    let status = graph.insert(MetaModel::new(
        "Status",
        MetaModelKind::Enum {
            values: vec![
                EnumValue::new("active", json!("active")),
                EnumValue::new("inactive", json!("inactive")),
            ],
        },
    ));

    graph.add_property(person, "name", name, true);
    graph.add_property(person, "address", address, false);
    graph.add_property(person, "tags", tags, true);
    graph.add_property(person, "status", status, true);
    (graph, person)
}

/// Type mapping and constraints of a TypeScript-like toy target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestTarget;

impl TestTarget {
    pub fn split_options() -> SplitOptions {
        SplitOptions {
            split_object: true,
            split_enum: true,
            ..Default::default()
        }
    }

    fn constraints() -> DefaultConstraints {
        DefaultConstraints::new(TEST_NAMING)
    }
}

impl TypeMapping for TestTarget {
    fn any(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("any".into())
    }
    fn string(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("string".into())
    }
    fn integer(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("number".into())
    }
    fn float(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("number".into())
    }
    fn boolean(&self, _: &TypeContext<'_>) -> Result<String> {
        Ok("boolean".into())
    }
    fn object(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }
    fn reference(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }
    fn enumeration(&self, ctx: &TypeContext<'_>) -> Result<String> {
        Ok(ctx.model.name.clone())
    }
    fn array(&self, ctx: &TypeContext<'_>) -> Result<String> {
        match ctx.model.kind {
            ConstrainedKind::Array { value } => Ok(format!("{}[]", ctx.type_of(value))),
            _ => Ok("any[]".into()),
        }
    }
    fn tuple(&self, ctx: &TypeContext<'_>) -> Result<String> {
        let members: Vec<&str> = ctx
            .model
            .kind
            .children()
            .into_iter()
            .map(|id| ctx.type_of(id))
            .collect();
        Ok(format!("[{}]", members.join(", ")))
    }
    fn union(&self, ctx: &TypeContext<'_>) -> Result<String> {
        let members: Vec<&str> = ctx
            .model
            .kind
            .children()
            .into_iter()
            .map(|id| ctx.type_of(id))
            .collect();
        Ok(members.join(" | "))
    }
    fn dictionary(&self, ctx: &TypeContext<'_>) -> Result<String> {
        let children = ctx.model.kind.children();
        Ok(format!(
            "Map<{}>",
            children
                .into_iter()
                .map(|id| ctx.type_of(id))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

impl Constraints for TestTarget {
    fn model_name(&self, ctx: &ModelNameContext<'_>) -> Result<String> {
        Self::constraints().model_name(ctx)
    }
    fn property_key(&self, ctx: &PropertyKeyContext<'_>) -> Result<String> {
        Self::constraints().property_key(ctx)
    }
    fn enum_key(&self, ctx: &EnumKeyContext<'_>) -> Result<String> {
        Self::constraints().enum_key(ctx)
    }
    fn enum_value(&self, ctx: &EnumValueContext<'_>) -> Result<String> {
        Self::constraints().enum_value(ctx)
    }
    fn constant(&self, ctx: &ConstantContext<'_>) -> Result<Option<String>> {
        Self::constraints().constant(ctx)
    }
}

fn test_preset() -> Preset {
    Preset::new("test")
        .hook("class", hooks::SELF, |r, _| {
            let model = r.model();
            let mut lines = Vec::new();
            for property in model.properties().into_iter().flat_map(|p| p.values()) {
                lines.push(r.run_preset(hooks::PROPERTY, HookItem::Property(property))?);
            }
            let body = r.indent(&r.render_block(lines, 1));
            Ok(format!("class {} {{\n{body}\n}}", model.name))
        })
        .hook("class", hooks::PROPERTY, |r, args| {
            let HookItem::Property(property) = args.item else {
                return Ok(args.content);
            };
            let ty = &r.graph()[property.model].ty;
            Ok(format!("{}: {ty};", property.property_name))
        })
}

/// A [`ModelGenerator`] for the toy target, rendering objects as classes.
#[derive(Debug, Clone)]
pub struct TestGenerator {
    options: GeneratorOptions,
    constraints: DefaultConstraints,
    preset: Preset,
}

impl TestGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let naming = TEST_NAMING.with_overrides(&options.naming_convention);
        Self {
            options,
            constraints: DefaultConstraints::new(naming),
            preset: test_preset(),
        }
    }
}

impl Default for TestGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl ModelGenerator for TestGenerator {
    /// Namespace to wrap each model in.
    type CompleteOptions = String;

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn split_options(&self) -> SplitOptions {
        TestTarget::split_options()
    }

    fn type_mapping(&self) -> &dyn TypeMapping {
        &TestTarget
    }

    fn constraints(&self) -> &dyn Constraints {
        &self.constraints
    }

    fn default_preset(&self) -> &Preset {
        &self.preset
    }

    fn render(
        &self,
        model: &ConstrainedModel,
        presets: &[PresetWithOptions],
    ) -> crate::Result<RenderOutput> {
        let variant = model.model().variant();
        if variant != ModelVariant::Object {
            return Err(crate::Error::UnsupportedModel {
                model: model.model().name.clone(),
                variant,
            });
        }
        let indentation = self.options.indentation.unwrap_or(Indentation::spaces(2));
        Renderer::new(&model.graph, model.root, "class", presets, indentation).render()
    }

    fn validate_complete_options(&self, namespace: &String) -> crate::Result<()> {
        if self.constraints.naming.is_reserved(namespace) {
            return Err(crate::Error::reserved_keyword(namespace, "namespace"));
        }
        Ok(())
    }

    fn render_complete(&self, output: &OutputModel, namespace: &String) -> crate::Result<String> {
        let indentation = self.options.indentation.unwrap_or(Indentation::spaces(2));
        Ok(format!(
            "namespace {namespace} {{\n{}\n}}",
            indentation.apply(&output.result, 1)
        ))
    }
}
