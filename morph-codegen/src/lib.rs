//! Shared generation pipeline for morphgen backends.
//!
//! This crate turns a [`MetaModelGraph`](morphgen_meta::MetaModelGraph) into
//! source text for a target language. Backends (e.g., `morphgen-codegen-rust`)
//! supply the language-specific pieces and reuse everything else.
//!
//! # Module Organization
//!
//! - [`split`] - Splitting nested models into separately rendered ones
//! - [`constrain`] - Lowering to constrained models (names, types, constants)
//! - [`naming`] - Naming conventions and the identifier constraint pipeline
//! - [`preset`] - Hook-based customization of rendered output
//! - [`render`] - Per-model renderer state
//! - [`generator`] - The [`ModelGenerator`](generator::ModelGenerator) pipeline
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indentation)
//! - [`config`] - Generator configuration files
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod config;
pub mod constrain;
mod error;
pub mod generator;
pub mod naming;
pub mod preset;
pub mod render;
pub mod split;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
