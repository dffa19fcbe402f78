//! Splitting nested models out into independently addressable ones.

use std::collections::HashSet;

use morphgen_meta::{MetaModelGraph, ModelId, ModelVariant};
use tracing::debug;

/// Which model variants become models of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub split_object: bool,
    pub split_enum: bool,
    pub split_union: bool,
    pub split_array: bool,
    pub split_tuple: bool,
    pub split_dictionary: bool,
    pub split_string: bool,
    pub split_integer: bool,
    pub split_float: bool,
    pub split_boolean: bool,
}

impl SplitOptions {
    /// Returns true if models of `variant` should be split out.
    pub fn matches(&self, variant: ModelVariant) -> bool {
        match variant {
            ModelVariant::Object => self.split_object,
            ModelVariant::Enum => self.split_enum,
            ModelVariant::Union => self.split_union,
            ModelVariant::Array => self.split_array,
            ModelVariant::Tuple => self.split_tuple,
            ModelVariant::Dictionary => self.split_dictionary,
            ModelVariant::String => self.split_string,
            ModelVariant::Integer => self.split_integer,
            ModelVariant::Float => self.split_float,
            ModelVariant::Boolean => self.split_boolean,
            ModelVariant::Any | ModelVariant::Reference => false,
        }
    }
}

/// Split every policy-matching model reachable from `root` out of its parent.
///
/// Matching children are replaced in their slot by a new reference and
/// registered once. The returned list starts with `root`, followed by the
/// split-out models in the order they were first reached.
pub fn split(graph: &mut MetaModelGraph, root: ModelId, options: &SplitOptions) -> Vec<ModelId> {
    let mut splitter = Splitter {
        graph,
        options,
        models: vec![root],
        seen: HashSet::new(),
    };
    splitter.visit(root);
    splitter.models
}

struct Splitter<'a> {
    graph: &'a mut MetaModelGraph,
    options: &'a SplitOptions,
    models: Vec<ModelId>,
    seen: HashSet<ModelId>,
}

impl Splitter<'_> {
    fn visit(&mut self, id: ModelId) {
        if !self.seen.insert(id) {
            return;
        }

        let children = self.graph.get(id).kind.children();
        for (slot, child) in children.into_iter().enumerate() {
            let replacement = self.try_split(child);
            if replacement != child {
                *self.graph.get_mut(id).kind.children_mut()[slot] = replacement;
            }
            self.visit(child);
        }
    }

    /// Register `id` as a model and return a reference to it, or return `id`
    /// unchanged if the policy does not match.
    fn try_split(&mut self, id: ModelId) -> ModelId {
        let model = self.graph.get(id);
        if !self.options.matches(model.variant()) {
            return id;
        }

        if !self.models.contains(&id) {
            debug!(model = %model.name, variant = %model.variant(), "split out model");
            self.models.push(id);
        }
        let name = model.name.clone();
        self.graph.reference(name, id)
    }
}

#[cfg(test)]
mod tests {
    use morphgen_meta::{MetaModel, MetaModelKind, MetaModelOptions};
    use serde_json::json;

    use super::*;

    fn objects_and_enums() -> SplitOptions {
        SplitOptions {
            split_object: true,
            split_enum: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_split_nested_object() {
        let mut graph = MetaModelGraph::new();
        let person = graph.insert(MetaModel::new("Person", MetaModelKind::object()));
        let address = graph.insert(MetaModel::new("Address", MetaModelKind::object()));
        let name = graph.insert(MetaModel::new("name", MetaModelKind::String));
        graph.add_property(person, "name", name, true);
        graph.add_property(person, "address", address, false);

        let models = split(&mut graph, person, &objects_and_enums());
        assert_eq!(models, vec![person, address]);

        let MetaModelKind::Object { properties } = &graph[person].kind else {
            panic!("expected object");
        };
        assert_eq!(properties["name"].model, name);
        let slot = properties["address"].model;
        assert_eq!(
            graph[slot].kind,
            MetaModelKind::Reference { target: address }
        );
        assert_eq!(graph[slot].name, "Address");
    }

    #[test]
    fn test_split_count_with_shared_child() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Root", MetaModelKind::object()));
        let a = graph.insert(MetaModel::new("A", MetaModelKind::object()));
        let b = graph.insert(MetaModel::new("B", MetaModelKind::object()));
        graph.add_property(root, "a", a, true);
        graph.add_property(root, "b", b, true);
        graph.add_property(root, "again", a, true);

        let models = split(&mut graph, root, &objects_and_enums());
        assert_eq!(models, vec![root, a, b]);
    }

    #[test]
    fn test_split_self_reference_terminates() {
        let mut graph = MetaModelGraph::new();
        let node = graph.insert(MetaModel::new("Node", MetaModelKind::object()));
        graph.add_property(node, "next", node, false);

        let models = split(&mut graph, node, &objects_and_enums());
        assert_eq!(models, vec![node]);

        let MetaModelKind::Object { properties } = &graph[node].kind else {
            panic!("expected object");
        };
        let next = properties["next"].model;
        assert_eq!(graph[next].kind, MetaModelKind::Reference { target: node });
    }

    #[test]
    fn test_split_through_unsplit_containers() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Root", MetaModelKind::object()));
        let color = graph.insert(MetaModel::new("Color", MetaModelKind::Enum { values: vec![] }));
        let list = graph.insert(MetaModel::new("colors", MetaModelKind::Array { value: color }));
        graph.add_property(root, "colors", list, true);

        let models = split(&mut graph, root, &objects_and_enums());
        assert_eq!(models, vec![root, color]);

        let MetaModelKind::Array { value } = graph[list].kind else {
            panic!("expected array");
        };
        assert_eq!(graph[value].kind, MetaModelKind::Reference { target: color });
    }

    #[test]
    fn test_split_depth_first_order() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Root", MetaModelKind::object()));
        let first = graph.insert(MetaModel::new("First", MetaModelKind::object()));
        let inner = graph.insert(MetaModel::new("Inner", MetaModelKind::object()));
        let second = graph.insert(MetaModel::new("Second", MetaModelKind::object()));
        graph.add_property(first, "inner", inner, true);
        graph.add_property(root, "first", first, true);
        graph.add_property(root, "second", second, true);

        let models = split(&mut graph, root, &objects_and_enums());
        assert_eq!(models, vec![root, first, inner, second]);
    }

    #[test]
    fn test_nothing_split_without_policy() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Root", MetaModelKind::object()));
        let child = graph.insert(MetaModel::new("Child", MetaModelKind::object()));
        graph.add_property(root, "child", child, true);

        let models = split(&mut graph, root, &SplitOptions::default());
        assert_eq!(models, vec![root]);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_split_reference_keeps_options() {
        let mut graph = MetaModelGraph::new();
        let favorite = graph.insert(MetaModel::new("Favorite", MetaModelKind::object()));
        let options = MetaModelOptions::new()
            .const_value(json!("blue"))
            .nullable()
            .format("color");
        let color = graph.insert(
            MetaModel::new("Color", MetaModelKind::Enum { values: vec![] })
                .with_options(options.clone()),
        );
        graph.add_property(favorite, "color", color, true);

        split(&mut graph, favorite, &objects_and_enums());

        let MetaModelKind::Object { properties } = &graph[favorite].kind else {
            panic!("expected object");
        };
        let slot = properties["color"].model;
        assert_ne!(slot, color);
        assert_eq!(graph[slot].kind, MetaModelKind::Reference { target: color });
        assert_eq!(graph[slot].options, options);
    }
}
