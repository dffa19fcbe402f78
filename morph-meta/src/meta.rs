//! Target-agnostic meta-model graph.

use std::{fmt, ops::Index, sync::Arc};

use indexmap::IndexMap;

use crate::{DictionarySerialization, MetaModelOptions, ModelVariant};

/// Identity of a node in a [`MetaModelGraph`].
///
/// Ids are only handed out by [`MetaModelGraph::insert`], so an id is always
/// valid for the graph that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(usize);

impl ModelId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A property of an object model.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    /// Raw property name as found in the schema.
    pub property_name: String,
    pub model: ModelId,
    pub required: bool,
    /// The object this property belongs to.
    pub owner: ModelId,
}

/// One positional slot of a tuple model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleValue {
    pub index: usize,
    pub value: ModelId,
}

/// One member of an enum model.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub key: String,
    pub value: serde_json::Value,
}

impl EnumValue {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Variant payload of a meta-model.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaModelKind {
    Any,
    String,
    Integer,
    Float,
    Boolean,
    Object {
        properties: IndexMap<String, ObjectProperty>,
    },
    Array {
        value: ModelId,
    },
    Tuple {
        values: Vec<TupleValue>,
    },
    Union {
        members: Vec<ModelId>,
    },
    Dictionary {
        key: ModelId,
        value: ModelId,
        serialization: DictionarySerialization,
    },
    Enum {
        values: Vec<EnumValue>,
    },
    /// Non-owning link to another model.
    Reference {
        target: ModelId,
    },
}

impl MetaModelKind {
    /// An object without properties.
    pub fn object() -> Self {
        MetaModelKind::Object {
            properties: IndexMap::new(),
        }
    }

    pub fn variant(&self) -> ModelVariant {
        match self {
            MetaModelKind::Any => ModelVariant::Any,
            MetaModelKind::String => ModelVariant::String,
            MetaModelKind::Integer => ModelVariant::Integer,
            MetaModelKind::Float => ModelVariant::Float,
            MetaModelKind::Boolean => ModelVariant::Boolean,
            MetaModelKind::Object { .. } => ModelVariant::Object,
            MetaModelKind::Array { .. } => ModelVariant::Array,
            MetaModelKind::Tuple { .. } => ModelVariant::Tuple,
            MetaModelKind::Union { .. } => ModelVariant::Union,
            MetaModelKind::Dictionary { .. } => ModelVariant::Dictionary,
            MetaModelKind::Enum { .. } => ModelVariant::Enum,
            MetaModelKind::Reference { .. } => ModelVariant::Reference,
        }
    }

    /// Models held in this node's slots, in traversal order.
    ///
    /// A reference target is not a slot: the reference does not own it.
    pub fn children(&self) -> Vec<ModelId> {
        match self {
            MetaModelKind::Object { properties } => {
                properties.values().map(|property| property.model).collect()
            }
            MetaModelKind::Array { value } => vec![*value],
            MetaModelKind::Tuple { values } => values.iter().map(|v| v.value).collect(),
            MetaModelKind::Union { members } => members.clone(),
            MetaModelKind::Dictionary { key, value, .. } => vec![*key, *value],
            _ => Vec::new(),
        }
    }

    /// Mutable access to the slots returned by [`children`](Self::children).
    pub fn children_mut(&mut self) -> Vec<&mut ModelId> {
        match self {
            MetaModelKind::Object { properties } => properties
                .values_mut()
                .map(|property| &mut property.model)
                .collect(),
            MetaModelKind::Array { value } => vec![value],
            MetaModelKind::Tuple { values } => values.iter_mut().map(|v| &mut v.value).collect(),
            MetaModelKind::Union { members } => members.iter_mut().collect(),
            MetaModelKind::Dictionary { key, value, .. } => vec![key, value],
            _ => Vec::new(),
        }
    }
}

/// One schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaModel {
    /// Semantic name. May be a placeholder until constraining.
    pub name: String,
    /// The schema fragment this model came from, passed through untouched.
    pub original_input: Arc<serde_json::Value>,
    pub options: MetaModelOptions,
    pub kind: MetaModelKind,
}

impl MetaModel {
    pub fn new(name: impl Into<String>, kind: MetaModelKind) -> Self {
        Self {
            name: name.into(),
            original_input: Arc::new(serde_json::Value::Null),
            options: MetaModelOptions::default(),
            kind,
        }
    }

    pub fn with_original_input(mut self, input: serde_json::Value) -> Self {
        self.original_input = Arc::new(input);
        self
    }

    pub fn with_options(mut self, options: MetaModelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn variant(&self) -> ModelVariant {
        self.kind.variant()
    }
}

/// Arena holding every meta-model of one input.
#[derive(Debug, Clone, Default)]
pub struct MetaModelGraph {
    nodes: Vec<MetaModel>,
}

impl MetaModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model and return its identity.
    pub fn insert(&mut self, model: MetaModel) -> ModelId {
        self.nodes.push(model);
        ModelId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: ModelId) -> &MetaModel {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: ModelId) -> &mut MetaModel {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all models in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &MetaModel)> {
        self.nodes.iter().enumerate().map(|(i, m)| (ModelId(i), m))
    }

    /// Add a property to an object model.
    ///
    /// Returns false, leaving the graph untouched, if `object` is not an object.
    pub fn add_property(
        &mut self,
        object: ModelId,
        name: impl Into<String>,
        model: ModelId,
        required: bool,
    ) -> bool {
        let MetaModelKind::Object { properties } = &mut self.get_mut(object).kind else {
            return false;
        };
        let name = name.into();
        properties.insert(
            name.clone(),
            ObjectProperty {
                property_name: name,
                model,
                required,
                owner: object,
            },
        );
        true
    }

    /// Insert a reference node pointing at `target`.
    ///
    /// The reference carries the target's original input and options, so a
    /// constant or nullability set on the target survives in the slot.
    pub fn reference(&mut self, name: impl Into<String>, target: ModelId) -> ModelId {
        let source = self.get(target);
        let model = MetaModel {
            name: name.into(),
            original_input: source.original_input.clone(),
            options: source.options.clone(),
            kind: MetaModelKind::Reference { target },
        };
        self.insert(model)
    }

    /// Follow references until a non-reference model is reached.
    ///
    /// A cycle made only of references resolves to the reference where the
    /// cycle closes.
    pub fn resolve(&self, id: ModelId) -> ModelId {
        let mut current = id;
        for _ in 0..self.nodes.len() {
            match self.get(current).kind {
                MetaModelKind::Reference { target } => current = target,
                _ => return current,
            }
        }
        current
    }
}

impl Index<ModelId> for MetaModelGraph {
    type Output = MetaModel;

    fn index(&self, id: ModelId) -> &MetaModel {
        self.get(id)
    }
}
