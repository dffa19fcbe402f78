//! Constrained meta-model graph.
//!
//! A constrained model is the lowering of a meta-model for one target: every
//! name is the final identifier and `ty` holds the target type expression.

use std::{collections::HashSet, fmt, ops::Index, sync::Arc};

use indexmap::IndexMap;

use crate::{DictionarySerialization, ModelId, ModelVariant};

/// Identity of a node in a [`ConstrainedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstrainedId(usize);

impl ConstrainedId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConstrainedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminator with the type of the discriminating property, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstrainedDiscriminator {
    pub discriminator: String,
    pub ty: Option<String>,
}

/// A literal constant rendered for the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedConst {
    pub original: serde_json::Value,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstrainedOptions {
    pub discriminator: Option<ConstrainedDiscriminator>,
    pub extend: Vec<ConstrainedId>,
    pub const_value: Option<ConstrainedConst>,
    pub is_nullable: bool,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstrainedProperty {
    /// Final, sanitized property key.
    pub property_name: String,
    /// Raw property name as found in the schema.
    pub unconstrained_property_name: String,
    pub required: bool,
    pub model: ConstrainedId,
    pub owner: ConstrainedId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstrainedTupleValue {
    pub index: usize,
    pub value: ConstrainedId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedEnumValue {
    /// Final, sanitized key.
    pub key: String,
    /// Value expression for the target.
    pub value: String,
    pub original_key: String,
    pub original_value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstrainedKind {
    Any,
    String,
    Integer,
    Float,
    Boolean,
    /// Properties keyed by their raw name.
    Object {
        properties: IndexMap<String, ConstrainedProperty>,
    },
    Array {
        value: ConstrainedId,
    },
    Tuple {
        values: Vec<ConstrainedTupleValue>,
    },
    Union {
        members: Vec<ConstrainedId>,
    },
    Dictionary {
        key: ConstrainedId,
        value: ConstrainedId,
        serialization: DictionarySerialization,
    },
    Enum {
        values: Vec<ConstrainedEnumValue>,
    },
    Reference {
        target: ConstrainedId,
    },
}

impl ConstrainedKind {
    pub fn variant(&self) -> ModelVariant {
        match self {
            ConstrainedKind::Any => ModelVariant::Any,
            ConstrainedKind::String => ModelVariant::String,
            ConstrainedKind::Integer => ModelVariant::Integer,
            ConstrainedKind::Float => ModelVariant::Float,
            ConstrainedKind::Boolean => ModelVariant::Boolean,
            ConstrainedKind::Object { .. } => ModelVariant::Object,
            ConstrainedKind::Array { .. } => ModelVariant::Array,
            ConstrainedKind::Tuple { .. } => ModelVariant::Tuple,
            ConstrainedKind::Union { .. } => ModelVariant::Union,
            ConstrainedKind::Dictionary { .. } => ModelVariant::Dictionary,
            ConstrainedKind::Enum { .. } => ModelVariant::Enum,
            ConstrainedKind::Reference { .. } => ModelVariant::Reference,
        }
    }

    /// Models held in this node's slots, in traversal order.
    pub fn children(&self) -> Vec<ConstrainedId> {
        match self {
            ConstrainedKind::Object { properties } => {
                properties.values().map(|property| property.model).collect()
            }
            ConstrainedKind::Array { value } => vec![*value],
            ConstrainedKind::Tuple { values } => values.iter().map(|v| v.value).collect(),
            ConstrainedKind::Union { members } => members.clone(),
            ConstrainedKind::Dictionary { key, value, .. } => vec![*key, *value],
            _ => Vec::new(),
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut ConstrainedId> {
        match self {
            ConstrainedKind::Object { properties } => properties
                .values_mut()
                .map(|property| &mut property.model)
                .collect(),
            ConstrainedKind::Array { value } => vec![value],
            ConstrainedKind::Tuple { values } => values.iter_mut().map(|v| &mut v.value).collect(),
            ConstrainedKind::Union { members } => members.iter_mut().collect(),
            ConstrainedKind::Dictionary { key, value, .. } => vec![key, value],
            _ => Vec::new(),
        }
    }
}

/// One schema node lowered for a target.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedMetaModel {
    pub name: String,
    /// Target type expression.
    pub ty: String,
    pub original_input: Arc<serde_json::Value>,
    pub options: ConstrainedOptions,
    pub kind: ConstrainedKind,
    /// The meta-model this node was lowered from.
    pub source: ModelId,
}

impl ConstrainedMetaModel {
    pub fn variant(&self) -> ModelVariant {
        self.kind.variant()
    }

    /// Properties of an object model, `None` for every other variant.
    pub fn properties(&self) -> Option<&IndexMap<String, ConstrainedProperty>> {
        match &self.kind {
            ConstrainedKind::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// A string field of the original input, such as `description`.
    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.original_input.get(field).and_then(|v| v.as_str())
    }
}

/// Arena holding the constrained models of one constrain pass.
#[derive(Debug, Clone, Default)]
pub struct ConstrainedGraph {
    nodes: Vec<ConstrainedMetaModel>,
}

impl ConstrainedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: ConstrainedMetaModel) -> ConstrainedId {
        self.nodes.push(model);
        ConstrainedId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: ConstrainedId) -> &ConstrainedMetaModel {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: ConstrainedId) -> &mut ConstrainedMetaModel {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstrainedId, &ConstrainedMetaModel)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, m)| (ConstrainedId(i), m))
    }

    /// Follow references until a non-reference model is reached.
    pub fn resolve(&self, id: ConstrainedId) -> ConstrainedId {
        let mut current = id;
        for _ in 0..self.nodes.len() {
            match self.get(current).kind {
                ConstrainedKind::Reference { target } => current = target,
                _ => return current,
            }
        }
        current
    }

    /// References reachable from `id` without crossing another reference.
    ///
    /// Supertypes listed in `extend` count as children. References back to
    /// `id` itself are skipped and each target is reported once, by the
    /// first reference that reaches it.
    pub fn nearest_dependencies(&self, id: ConstrainedId) -> Vec<ConstrainedId> {
        let mut visited = HashSet::from([id]);
        let mut targets = HashSet::new();
        let mut found = Vec::new();
        self.collect_dependencies(id, id, &mut visited, &mut targets, &mut found);
        found
    }

    fn collect_dependencies(
        &self,
        current: ConstrainedId,
        root: ConstrainedId,
        visited: &mut HashSet<ConstrainedId>,
        targets: &mut HashSet<ConstrainedId>,
        found: &mut Vec<ConstrainedId>,
    ) {
        let model = self.get(current);
        let children = model
            .kind
            .children()
            .into_iter()
            .chain(model.options.extend.iter().copied());

        for child in children {
            match self.get(child).kind {
                ConstrainedKind::Reference { target } => {
                    if target != root && targets.insert(target) {
                        found.push(child);
                    }
                }
                _ => {
                    if visited.insert(child) {
                        self.collect_dependencies(child, root, visited, targets, found);
                    }
                }
            }
        }
    }
}

impl Index<ConstrainedId> for ConstrainedGraph {
    type Output = ConstrainedMetaModel;

    fn index(&self, id: ConstrainedId) -> &ConstrainedMetaModel {
        self.get(id)
    }
}
