//! Per-model renderer state.

use indexmap::IndexSet;
use morphgen_meta::{ConstrainedGraph, ConstrainedId, ConstrainedMetaModel};
use tracing::trace;

use crate::{
    Error, Result,
    builder::{CodeBuilder, Indentation},
    preset::{HookArgs, HookItem, PresetWithOptions, hooks},
};

/// What a renderer produced for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    pub result: String,
    pub rendered_name: String,
    pub dependencies: Vec<String>,
}

/// Renders one constrained model for one target.
///
/// A renderer is created per model and owns the dependency list collected
/// while its hooks run.
pub struct Renderer<'a> {
    graph: &'a ConstrainedGraph,
    model: ConstrainedId,
    target: &'static str,
    presets: &'a [PresetWithOptions],
    indentation: Indentation,
    dependencies: IndexSet<String>,
}

impl<'a> Renderer<'a> {
    pub fn new(
        graph: &'a ConstrainedGraph,
        model: ConstrainedId,
        target: &'static str,
        presets: &'a [PresetWithOptions],
        indentation: Indentation,
    ) -> Self {
        Self {
            graph,
            model,
            target,
            presets,
            indentation,
            dependencies: IndexSet::new(),
        }
    }

    pub fn model(&self) -> &'a ConstrainedMetaModel {
        &self.graph[self.model]
    }

    pub fn model_id(&self) -> ConstrainedId {
        self.model
    }

    pub fn graph(&self) -> &'a ConstrainedGraph {
        self.graph
    }

    /// The renderer target hooks are looked up under.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn indentation(&self) -> Indentation {
        self.indentation
    }

    /// Record a dependency line such as an import. Adding the same line
    /// twice keeps one copy.
    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        self.dependencies.insert(dependency.into());
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(String::as_str)
    }

    /// Indent every non-blank line of `content` by one level.
    pub fn indent(&self, content: &str) -> String {
        self.indentation.apply(content, 1)
    }

    /// Join the non-empty `lines`, separated by `newlines` line breaks.
    pub fn render_block<I, S>(&self, lines: I, newlines: usize) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let separator = "\n".repeat(newlines);
        lines
            .into_iter()
            .filter(|line| !line.as_ref().is_empty())
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&separator)
    }

    /// A code builder using this renderer's indentation.
    pub fn code_builder(&self) -> CodeBuilder {
        CodeBuilder::new(self.indentation)
    }

    /// Fold `hook` over the preset chain and return the resulting content.
    pub fn run_preset(&mut self, hook: &str, item: HookItem<'a>) -> eyre::Result<String> {
        let presets = self.presets;
        let mut content = String::new();
        for entry in presets {
            let Some(f) = entry.preset.get(self.target, hook) else {
                continue;
            };
            trace!(preset = entry.preset.name(), target = self.target, hook, "running hook");
            content = f(
                self,
                HookArgs {
                    content,
                    options: &entry.options,
                    item,
                },
            )?;
        }
        Ok(content)
    }

    /// Run the `self` hook and finish with the model's own name.
    pub fn render(self) -> Result<RenderOutput> {
        let name = self.model().name.clone();
        self.render_named(name)
    }

    /// Run the `self` hook and finish with `rendered_name`.
    pub fn render_named(mut self, rendered_name: String) -> Result<RenderOutput> {
        let result = self
            .run_preset(hooks::SELF, HookItem::None)
            .map_err(|e| Error::render(&self.model().name, e))?;
        Ok(RenderOutput {
            result,
            rendered_name,
            dependencies: self.dependencies.into_iter().collect(),
        })
    }
}
