//! Meta-model types for morphgen.
//!
//! This crate provides the two graphs the compilation pipeline works on:
//!
//! - [`MetaModelGraph`] - the target-agnostic representation produced by
//!   input processors and rewritten by the splitter.
//! - [`ConstrainedGraph`] - the per-target lowering produced by the
//!   constrainer, with sanitized names and computed type expressions.
//!
//! # Architecture
//!
//! ```text
//! schema → input processor → MetaModelGraph → split → constrain → ConstrainedGraph → render
//! ```
//!
//! Both graphs are arenas. Nodes are addressed by index ([`ModelId`],
//! [`ConstrainedId`]) and that index is the node's identity: two structurally
//! identical nodes are still two different models. References between
//! models are plain ids, so cycles need no shared ownership.

mod constrained;
mod meta;
mod types;

pub use constrained::{
    ConstrainedConst, ConstrainedDiscriminator, ConstrainedEnumValue, ConstrainedGraph,
    ConstrainedId, ConstrainedKind, ConstrainedMetaModel, ConstrainedOptions,
    ConstrainedProperty, ConstrainedTupleValue,
};
pub use meta::{
    EnumValue, MetaModel, MetaModelGraph, MetaModelKind, ModelId, ObjectProperty, TupleValue,
};
pub use types::{DictionarySerialization, Discriminator, MetaModelOptions, ModelVariant};
