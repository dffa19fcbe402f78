//! First constrain pass: build the constrained graph and name everything.

use std::collections::HashMap;

use indexmap::IndexMap;
use morphgen_meta::{
    ConstrainedConst, ConstrainedDiscriminator, ConstrainedEnumValue, ConstrainedGraph,
    ConstrainedId, ConstrainedKind, ConstrainedMetaModel, ConstrainedOptions,
    ConstrainedProperty, ConstrainedTupleValue, MetaModel, MetaModelGraph, MetaModelKind, ModelId,
};
use tracing::trace;

use super::{
    Constraints, EnumKeyContext, EnumValueContext, ModelNameContext, PropertyKeyContext,
};
use crate::{Error, Result};

/// Recursive lowering with one constrained node per source identity.
pub(super) struct Lowering<'a, C: Constraints + ?Sized> {
    meta: &'a MetaModelGraph,
    constraints: &'a C,
    graph: ConstrainedGraph,
    memo: HashMap<ModelId, ConstrainedId>,
}

impl<'a, C: Constraints + ?Sized> Lowering<'a, C> {
    pub(super) fn new(meta: &'a MetaModelGraph, constraints: &'a C) -> Self {
        Self {
            meta,
            constraints,
            graph: ConstrainedGraph::new(),
            memo: HashMap::new(),
        }
    }

    pub(super) fn into_graph(self) -> ConstrainedGraph {
        self.graph
    }

    pub(super) fn lower(&mut self, id: ModelId) -> Result<ConstrainedId> {
        if let Some(&done) = self.memo.get(&id) {
            return Ok(done);
        }

        let meta = self.meta;
        let model = &meta[id];
        let name = self
            .constraints
            .model_name(&ModelNameContext { model, graph: meta })
            .map_err(|e| Error::lowering(&model.name, e))?;

        // registered before the children so a cycle resolves to this node
        let cid = self.graph.insert(placeholder(id, model, name));
        self.memo.insert(id, cid);
        trace!(model = %model.name, %id, "lowering model");

        let kind = self.lower_kind(model, cid)?;
        let extend = model
            .options
            .extend
            .iter()
            .map(|&parent| self.lower(parent))
            .collect::<Result<Vec<_>>>()?;

        let node = self.graph.get_mut(cid);
        node.kind = kind;
        node.options.extend = extend;
        Ok(cid)
    }

    fn lower_kind(&mut self, model: &'a MetaModel, cid: ConstrainedId) -> Result<ConstrainedKind> {
        let fail = |e: eyre::Report| Error::lowering(&model.name, e);

        let kind = match &model.kind {
            MetaModelKind::Any => ConstrainedKind::Any,
            MetaModelKind::String => ConstrainedKind::String,
            MetaModelKind::Integer => ConstrainedKind::Integer,
            MetaModelKind::Float => ConstrainedKind::Float,
            MetaModelKind::Boolean => ConstrainedKind::Boolean,
            MetaModelKind::Object { properties } => {
                let mut constrained: IndexMap<String, ConstrainedProperty> = IndexMap::new();
                for (raw, property) in properties {
                    let key = self
                        .constraints
                        .property_key(&PropertyKeyContext {
                            property,
                            object: model,
                            assigned: &constrained,
                        })
                        .map_err(fail)?;
                    let child = self.lower(property.model)?;
                    constrained.insert(
                        raw.clone(),
                        ConstrainedProperty {
                            property_name: key,
                            unconstrained_property_name: property.property_name.clone(),
                            required: property.required,
                            model: child,
                            owner: cid,
                        },
                    );
                }
                ConstrainedKind::Object {
                    properties: constrained,
                }
            }
            MetaModelKind::Array { value } => ConstrainedKind::Array {
                value: self.lower(*value)?,
            },
            MetaModelKind::Tuple { values } => {
                let values = values
                    .iter()
                    .map(|slot| {
                        Ok(ConstrainedTupleValue {
                            index: slot.index,
                            value: self.lower(slot.value)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                ConstrainedKind::Tuple { values }
            }
            MetaModelKind::Union { members } => {
                let members = members
                    .iter()
                    .map(|&member| self.lower(member))
                    .collect::<Result<Vec<_>>>()?;
                ConstrainedKind::Union { members }
            }
            MetaModelKind::Dictionary {
                key,
                value,
                serialization,
            } => ConstrainedKind::Dictionary {
                key: self.lower(*key)?,
                value: self.lower(*value)?,
                serialization: *serialization,
            },
            MetaModelKind::Enum { values } => {
                let mut constrained: Vec<ConstrainedEnumValue> = Vec::with_capacity(values.len());
                for value in values {
                    let key = self
                        .constraints
                        .enum_key(&EnumKeyContext {
                            value,
                            model,
                            assigned: &constrained,
                        })
                        .map_err(fail)?;
                    let rendered = self
                        .constraints
                        .enum_value(&EnumValueContext { value, model })
                        .map_err(fail)?;
                    constrained.push(ConstrainedEnumValue {
                        key,
                        value: rendered,
                        original_key: value.key.clone(),
                        original_value: value.value.clone(),
                    });
                }
                ConstrainedKind::Enum {
                    values: constrained,
                }
            }
            MetaModelKind::Reference { target } => ConstrainedKind::Reference {
                target: self.lower(*target)?,
            },
        };
        Ok(kind)
    }
}

fn placeholder(source: ModelId, model: &MetaModel, name: String) -> ConstrainedMetaModel {
    let options = ConstrainedOptions {
        discriminator: model
            .options
            .discriminator
            .as_ref()
            .map(|d| ConstrainedDiscriminator {
                discriminator: d.discriminator.clone(),
                ty: None,
            }),
        extend: Vec::new(),
        const_value: model
            .options
            .const_value
            .clone()
            .map(|original| ConstrainedConst {
                original,
                value: None,
            }),
        is_nullable: model.options.is_nullable,
        format: model.options.format.clone(),
    };

    ConstrainedMetaModel {
        name,
        ty: String::new(),
        original_input: model.original_input.clone(),
        options,
        kind: ConstrainedKind::Any,
        source,
    }
}
