//! Presets: named hooks that customize rendered output.
//!
//! A renderer target (`struct`, `class`, `enum`, ...) exposes named hooks.
//! For every hook the renderer folds over its preset chain: the backend's
//! default preset runs first with empty content, then each user preset gets
//! the content so far and returns the new content. A preset without the
//! hook leaves the content untouched.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use morphgen_meta::{ConstrainedEnumValue, ConstrainedId, ConstrainedProperty, ConstrainedTupleValue};
use serde_json::Value;

use crate::render::Renderer;

/// Hook names shared by the backends.
pub mod hooks {
    pub const SELF: &str = "self";
    pub const ADDITIONAL_CONTENT: &str = "additional_content";
    pub const PROPERTY: &str = "property";
    pub const ITEM: &str = "item";
    pub const FIELD: &str = "field";
    pub const CTOR: &str = "ctor";
    pub const GETTER: &str = "getter";
    pub const SETTER: &str = "setter";
    pub const STRUCT_MACRO: &str = "struct_macro";
    pub const FIELD_MACRO: &str = "field_macro";
    pub const ITEM_MACRO: &str = "item_macro";
}

/// The part of a model a hook is rendering.
#[derive(Debug, Clone, Copy)]
pub enum HookItem<'a> {
    /// The model as a whole.
    None,
    Property(&'a ConstrainedProperty),
    EnumValue(&'a ConstrainedEnumValue),
    /// A union member, by the id of the member node.
    UnionMember(ConstrainedId),
    TupleValue(&'a ConstrainedTupleValue),
}

/// Arguments passed to a hook.
#[derive(Debug, Clone)]
pub struct HookArgs<'a> {
    /// Content produced by the presets that ran before this one.
    pub content: String,
    /// Options registered together with the preset.
    pub options: &'a Value,
    pub item: HookItem<'a>,
}

/// A hook function.
pub type HookFn =
    Arc<dyn Fn(&mut Renderer<'_>, HookArgs<'_>) -> eyre::Result<String> + Send + Sync>;

/// A named set of hooks, grouped by renderer target.
///
/// # Example
///
/// ```
/// use morphgen_codegen::preset::{Preset, hooks};
///
/// let preset = Preset::new("banner").hook("struct", hooks::SELF, |_, args| {
///     Ok(format!("// generated\n{}", args.content))
/// });
/// assert!(preset.get("struct", hooks::SELF).is_some());
/// ```
#[derive(Clone, Default)]
pub struct Preset {
    name: String,
    hooks: IndexMap<String, IndexMap<String, HookFn>>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hooks: IndexMap::new(),
        }
    }

    /// Register `f` for `hook` on `target`, replacing an earlier registration.
    pub fn hook<F>(mut self, target: impl Into<String>, hook: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Renderer<'_>, HookArgs<'_>) -> eyre::Result<String> + Send + Sync + 'static,
    {
        self.hooks
            .entry(target.into())
            .or_default()
            .insert(hook.into(), Arc::new(f));
        self
    }

    pub fn get(&self, target: &str, hook: &str) -> Option<&HookFn> {
        self.hooks.get(target)?.get(hook)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<String> = self
            .hooks
            .iter()
            .flat_map(|(target, hooks)| hooks.keys().map(move |hook| format!("{target}.{hook}")))
            .collect();
        f.debug_struct("Preset")
            .field("name", &self.name)
            .field("hooks", &hooks)
            .finish()
    }
}

/// A preset together with the options its hooks receive.
#[derive(Debug, Clone)]
pub struct PresetWithOptions {
    pub preset: Preset,
    pub options: Value,
}

impl PresetWithOptions {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            options: Value::Null,
        }
    }

    pub fn with_options(preset: Preset, options: Value) -> Self {
        Self { preset, options }
    }
}

impl From<Preset> for PresetWithOptions {
    fn from(preset: Preset) -> Self {
        Self::new(preset)
    }
}
