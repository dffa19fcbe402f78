//! Lowering meta-models into constrained meta-models.
//!
//! Constraining happens in two passes over one [`ConstrainedGraph`]:
//!
//! - `lower` - creates one constrained node per meta-model identity and
//!   names models, properties and enum members through [`Constraints`]
//! - `types` - computes type expressions through [`TypeMapping`], breaking
//!   type cycles and resolving union discriminators
//!
//! Both passes stop at the first failing callback; no partial graph is
//! returned.

mod defaults;
mod lower;
mod traits;
mod types;

use morphgen_meta::{ConstrainedGraph, ConstrainedId, ConstrainedMetaModel, MetaModelGraph, ModelId};
use tracing::debug;

pub use defaults::{DefaultConstraints, render_literal};
pub use traits::{
    ConstantContext, Constraints, EnumKeyContext, EnumValueContext, ModelNameContext,
    PropertyKeyContext, TypeContext, TypeMapping, map_type,
};

use self::{lower::Lowering, types::TypeApplication};
use crate::Result;

/// The result of constraining one model.
#[derive(Debug, Clone)]
pub struct ConstrainedModel {
    pub graph: ConstrainedGraph,
    pub root: ConstrainedId,
}

impl ConstrainedModel {
    /// The constrained counterpart of the model that was constrained.
    pub fn model(&self) -> &ConstrainedMetaModel {
        &self.graph[self.root]
    }
}

/// Constrain the model `root` and everything reachable from it.
///
/// The meta-model graph is only read. Each call builds its own constrained
/// graph, so constraining the same graph twice gives equal results.
pub fn constrain<T, C>(
    meta: &MetaModelGraph,
    root: ModelId,
    mapping: &T,
    constraints: &C,
) -> Result<ConstrainedModel>
where
    T: TypeMapping + ?Sized,
    C: Constraints + ?Sized,
{
    let mut lowering = Lowering::new(meta, constraints);
    let root = lowering.lower(root)?;
    let mut graph = lowering.into_graph();

    TypeApplication::new(mapping, constraints, &mut graph).apply(root, None)?;
    debug!(model = %graph[root].name, nodes = graph.len(), "constrained model");

    Ok(ConstrainedModel { graph, root })
}

#[cfg(test)]
mod tests {
    use morphgen_meta::{
        ConstrainedKind, EnumValue, MetaModel, MetaModelKind, MetaModelOptions, ModelVariant,
    };
    use serde_json::json;

    use super::*;
    use crate::{
        Error,
        split::split,
        testing::{
            TestTarget, address_fixture, colliding_enum_fixture, node_fixture,
            reserved_property_fixture,
        },
    };

    #[test]
    fn test_address_naming() {
        let (graph, address) = address_fixture();
        let constrained = constrain(&graph, address, &TestTarget, &TestTarget).unwrap();
        let model = constrained.model();

        assert_eq!(model.name, "Address");
        assert_eq!(model.ty, "Address");
        let keys: Vec<&str> = model
            .properties()
            .unwrap()
            .values()
            .map(|p| p.property_name.as_str())
            .collect();
        assert_eq!(keys, vec!["streetName", "city"]);
        let street = &model.properties().unwrap()["street_name"];
        assert_eq!(constrained.graph[street.model].ty, "string");
        assert_eq!(street.owner, constrained.root);
    }

    #[test]
    fn test_sibling_properties_get_distinct_keys() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Address", MetaModelKind::object()));
        for raw in ["street_name", "streetName", "street-name"] {
            let id = graph.insert(MetaModel::new(raw, MetaModelKind::String));
            graph.add_property(root, raw, id, true);
        }

        let constrained = constrain(&graph, root, &TestTarget, &TestTarget).unwrap();
        let keys: Vec<&str> = constrained
            .model()
            .properties()
            .unwrap()
            .values()
            .map(|p| p.property_name.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["streetName", "reservedStreetName", "reservedReservedStreetName"]
        );
    }

    #[test]
    fn test_reserved_property_is_escaped() {
        let (graph, root) = reserved_property_fixture();
        let constrained = constrain(&graph, root, &TestTarget, &TestTarget).unwrap();
        let property = &constrained.model().properties().unwrap()["enum"];
        assert_eq!(property.property_name, "reservedEnum");
        assert_eq!(property.unconstrained_property_name, "enum");
    }

    #[test]
    fn test_self_reference_resolves_to_itself() {
        let (mut graph, node) = node_fixture();
        let models = split(&mut graph, node, &TestTarget::split_options());
        assert_eq!(models, vec![node]);

        let constrained = constrain(&graph, node, &TestTarget, &TestTarget).unwrap();
        let next = &constrained.model().properties().unwrap()["next"];
        let next_model = &constrained.graph[next.model];
        assert_eq!(next_model.ty, "Node");
        assert_eq!(
            next_model.kind,
            ConstrainedKind::Reference {
                target: constrained.root
            }
        );
    }

    #[test]
    fn test_unsplit_self_reference_terminates() {
        let (graph, node) = node_fixture();
        let constrained = constrain(&graph, node, &TestTarget, &TestTarget).unwrap();
        let next = &constrained.model().properties().unwrap()["next"];
        assert_eq!(next.model, constrained.root);
        assert_eq!(constrained.graph.len(), 1);
    }

    #[test]
    fn test_colliding_enum_keys() {
        let (graph, root) = colliding_enum_fixture();
        let constrained = constrain(&graph, root, &TestTarget, &TestTarget).unwrap();
        let ConstrainedKind::Enum { values } = &constrained.model().kind else {
            panic!("expected enum");
        };

        let keys: Vec<&str> = values.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["NUMBER_1", "RESERVED_NUMBER_1"]);
        assert_eq!(values[0].original_value, json!("1"));
        assert_eq!(values[1].original_value, json!("number 1"));
        assert_eq!(values[0].value, "\"1\"");
    }

    #[test]
    fn test_idempotent() {
        let (graph, address) = address_fixture();
        let first = constrain(&graph, address, &TestTarget, &TestTarget).unwrap();
        let second = constrain(&graph, address, &TestTarget, &TestTarget).unwrap();
        assert_eq!(first.graph.len(), second.graph.len());
        for ((_, a), (_, b)) in first.graph.iter().zip(second.graph.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_union_cycle_becomes_any() {
        let mut graph = MetaModelGraph::new();
        let union = graph.insert(MetaModel::new("Tree", MetaModelKind::Union { members: vec![] }));
        let leaf = graph.insert(MetaModel::new("leaf", MetaModelKind::String));
        let branches = graph.insert(MetaModel::new(
            "branches",
            MetaModelKind::Array { value: union },
        ));
        graph.get_mut(union).kind = MetaModelKind::Union {
            members: vec![leaf, branches],
        };

        let constrained = constrain(&graph, union, &TestTarget, &TestTarget).unwrap();
        let model = constrained.model();
        assert_eq!(model.ty, "string | any[]");

        let ConstrainedKind::Union { members } = &model.kind else {
            panic!("expected union");
        };
        let ConstrainedKind::Array { value } = constrained.graph[members[1]].kind else {
            panic!("expected array");
        };
        assert_eq!(constrained.graph[value].variant(), ModelVariant::Any);
        assert_eq!(constrained.graph[value].name, "Tree");
    }

    #[test]
    fn test_discriminator_type() {
        let mut graph = MetaModelGraph::new();
        let cat = graph.insert(MetaModel::new("Cat", MetaModelKind::object()));
        let dog = graph.insert(MetaModel::new("Dog", MetaModelKind::object()));
        for object in [cat, dog] {
            let kind = graph.insert(MetaModel::new("kind", MetaModelKind::String));
            graph.add_property(object, "kind", kind, true);
        }
        let cat_ref = graph.reference("Cat", cat);
        let dog_ref = graph.reference("Dog", dog);
        let pet = graph.insert(
            MetaModel::new(
                "Pet",
                MetaModelKind::Union {
                    members: vec![cat_ref, dog_ref],
                },
            )
            .with_options(MetaModelOptions::new().discriminator("kind")),
        );

        let constrained = constrain(&graph, pet, &TestTarget, &TestTarget).unwrap();
        let discriminator = constrained.model().options.discriminator.clone().unwrap();
        assert_eq!(discriminator.discriminator, "kind");
        assert_eq!(discriminator.ty.as_deref(), Some("string"));
    }

    #[test]
    fn test_constant_on_property() {
        let mut graph = MetaModelGraph::new();
        let object = graph.insert(MetaModel::new("Event", MetaModelKind::object()));
        let kind = graph.insert(
            MetaModel::new("kind", MetaModelKind::String)
                .with_options(MetaModelOptions::new().const_value(json!("created"))),
        );
        graph.add_property(object, "kind", kind, true);

        let constrained = constrain(&graph, object, &TestTarget, &TestTarget).unwrap();
        let property = &constrained.model().properties().unwrap()["kind"];
        let constant = constrained.graph[property.model]
            .options
            .const_value
            .clone()
            .unwrap();
        assert_eq!(constant.value.as_deref(), Some("\"created\""));
    }

    #[test]
    fn test_failing_callback_aborts() {
        struct Failing;
        impl TypeMapping for Failing {
            fn any(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("any".into())
            }
            fn string(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Err(eyre::eyre!("strings are not supported"))
            }
            fn integer(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("int".into())
            }
            fn float(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("float".into())
            }
            fn boolean(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("bool".into())
            }
            fn object(&self, ctx: &TypeContext<'_>) -> eyre::Result<String> {
                Ok(ctx.model.name.clone())
            }
            fn reference(&self, ctx: &TypeContext<'_>) -> eyre::Result<String> {
                Ok(ctx.model.name.clone())
            }
            fn enumeration(&self, ctx: &TypeContext<'_>) -> eyre::Result<String> {
                Ok(ctx.model.name.clone())
            }
            fn array(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("array".into())
            }
            fn tuple(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("tuple".into())
            }
            fn union(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("union".into())
            }
            fn dictionary(&self, _: &TypeContext<'_>) -> eyre::Result<String> {
                Ok("dictionary".into())
            }
        }

        let (graph, address) = address_fixture();
        let err = constrain(&graph, address, &Failing, &TestTarget).unwrap_err();
        assert!(matches!(err, Error::Lowering { ref model, .. } if model == "StreetName"));
    }

    #[test]
    fn test_enum_values_keep_original() {
        let mut graph = MetaModelGraph::new();
        let status = graph.insert(MetaModel::new(
            "status",
            MetaModelKind::Enum {
                values: vec![
                    EnumValue::new("active", json!("active")),
                    EnumValue::new("2", json!(2)),
                ],
            },
        ));
        let constrained = constrain(&graph, status, &TestTarget, &TestTarget).unwrap();
        let ConstrainedKind::Enum { values } = &constrained.model().kind else {
            panic!("expected enum");
        };
        assert_eq!(constrained.model().name, "Status");
        assert_eq!(values[0].key, "ACTIVE");
        assert_eq!(values[1].key, "NUMBER_2");
        assert_eq!(values[1].value, "2");
        assert_eq!(values[1].original_key, "2");
    }
}
