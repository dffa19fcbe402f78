//! Second constrain pass: compute type expressions.
//!
//! Safe variants are typed before their children are visited. Other
//! variants are marked in progress, their children are typed, then they
//! are typed themselves. Reaching a node that is still in progress means
//! its type depends on itself; the edge is redirected to a fresh `Any`
//! node with the same name, input and options.

use std::collections::HashMap;

use morphgen_meta::{
    ConstrainedGraph, ConstrainedId, ConstrainedKind, ConstrainedMetaModel, ConstrainedProperty,
    ModelVariant,
};
use tracing::trace;

use super::{ConstantContext, Constraints, TypeContext, TypeMapping, map_type};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

pub(super) struct TypeApplication<'a, T: ?Sized, C: ?Sized> {
    mapping: &'a T,
    constraints: &'a C,
    graph: &'a mut ConstrainedGraph,
    visits: HashMap<ConstrainedId, Visit>,
}

impl<'a, T, C> TypeApplication<'a, T, C>
where
    T: TypeMapping + ?Sized,
    C: Constraints + ?Sized,
{
    pub(super) fn new(
        mapping: &'a T,
        constraints: &'a C,
        graph: &'a mut ConstrainedGraph,
    ) -> Self {
        Self {
            mapping,
            constraints,
            graph,
            visits: HashMap::new(),
        }
    }

    /// Type `id` and everything below it.
    ///
    /// Returns the node the parent slot should point at: `id` itself, or a
    /// substitute when `id` is part of a cycle of unsafe models.
    pub(super) fn apply(
        &mut self,
        id: ConstrainedId,
        property: Option<ConstrainedProperty>,
    ) -> Result<ConstrainedId> {
        match self.visits.get(&id).copied() {
            Some(Visit::Done) => return Ok(id),
            Some(Visit::InProgress) => return self.substitute_any(id, property),
            None => {}
        }

        let variant = self.graph[id].variant();
        let safe = self.mapping.is_safe(variant);
        self.visits.insert(id, Visit::InProgress);

        if safe {
            self.assign_type(id, property.as_ref())?;
            if variant != ModelVariant::Reference {
                self.assign_constant(id)?;
            }
            self.visits.insert(id, Visit::Done);
        }

        self.walk(id)?;

        if !safe {
            self.assign_type(id, property.as_ref())?;
            self.assign_constant(id)?;
            self.visits.insert(id, Visit::Done);
        }
        match variant {
            ModelVariant::Reference => self.assign_constant(id)?,
            ModelVariant::Union => self.resolve_discriminator(id),
            _ => {}
        }
        Ok(id)
    }

    fn walk(&mut self, id: ConstrainedId) -> Result<()> {
        let model = &self.graph[id];

        if let ConstrainedKind::Reference { target } = model.kind {
            let resolved = self.apply(target, None)?;
            if resolved != target {
                self.graph.get_mut(id).kind = ConstrainedKind::Reference { target: resolved };
            }
        } else {
            let children = model.kind.children();
            let properties: Vec<Option<ConstrainedProperty>> = match model.properties() {
                Some(properties) => properties.values().cloned().map(Some).collect(),
                None => vec![None; children.len()],
            };

            for (slot, (child, property)) in children.into_iter().zip(properties).enumerate() {
                let resolved = self.apply(child, property)?;
                if resolved != child {
                    *self.graph.get_mut(id).kind.children_mut()[slot] = resolved;
                }
            }
        }

        let extend = self.graph[id].options.extend.clone();
        for parent in extend {
            self.apply(parent, None)?;
        }
        Ok(())
    }

    fn substitute_any(
        &mut self,
        id: ConstrainedId,
        property: Option<ConstrainedProperty>,
    ) -> Result<ConstrainedId> {
        let cyclic = &self.graph[id];
        trace!(model = %cyclic.name, %id, "cyclic model replaced by any");
        let any = ConstrainedMetaModel {
            name: cyclic.name.clone(),
            ty: String::new(),
            original_input: cyclic.original_input.clone(),
            options: cyclic.options.clone(),
            kind: ConstrainedKind::Any,
            source: cyclic.source,
        };

        let any_id = self.graph.insert(any);
        self.assign_type(any_id, property.as_ref())?;
        self.assign_constant(any_id)?;
        self.visits.insert(any_id, Visit::Done);
        Ok(any_id)
    }

    fn assign_type(
        &mut self,
        id: ConstrainedId,
        property: Option<&ConstrainedProperty>,
    ) -> Result<()> {
        let graph = &*self.graph;
        let model = &graph[id];
        let ctx = TypeContext {
            id,
            model,
            graph,
            property,
        };
        let ty = map_type(self.mapping, &ctx).map_err(|e| Error::lowering(&model.name, e))?;
        self.graph.get_mut(id).ty = ty;
        Ok(())
    }

    fn assign_constant(&mut self, id: ConstrainedId) -> Result<()> {
        let graph = &*self.graph;
        let model = &graph[id];
        let Some(constant) = &model.options.const_value else {
            return Ok(());
        };

        let value = self
            .constraints
            .constant(&ConstantContext {
                model,
                graph,
                value: &constant.original,
            })
            .map_err(|e| Error::lowering(&model.name, e))?;

        if let Some(constant) = self.graph.get_mut(id).options.const_value.as_mut() {
            constant.value = value;
        }
        Ok(())
    }

    /// Give a union's discriminator the type of the discriminating property
    /// when every object member agrees on it.
    fn resolve_discriminator(&mut self, id: ConstrainedId) {
        let model = &self.graph[id];
        let (Some(discriminator), ConstrainedKind::Union { members }) =
            (&model.options.discriminator, &model.kind)
        else {
            return;
        };

        let mut types: Vec<&str> = Vec::new();
        for &member in members {
            let ConstrainedKind::Reference { target } = self.graph[member].kind else {
                continue;
            };
            let Some(properties) = self.graph[target].properties() else {
                continue;
            };
            let matching = properties
                .values()
                .find(|p| p.unconstrained_property_name == discriminator.discriminator);
            if let Some(property) = matching {
                let ty = self.graph[property.model].ty.as_str();
                if !types.contains(&ty) {
                    types.push(ty);
                }
            }
        }

        if let [ty] = types.as_slice() {
            let ty = ty.to_string();
            if let Some(discriminator) = self.graph.get_mut(id).options.discriminator.as_mut() {
                discriminator.ty = Some(ty);
            }
        }
    }
}
