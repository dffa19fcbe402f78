//! The generation pipeline shared by every backend.
//!
//! ```text
//! InputMetaModel → split → constrain → render → OutputModel
//! ```
//!
//! A backend implements [`ModelGenerator`] by supplying its split policy,
//! type mapping, constraints, default preset and renderers. The provided
//! methods run the pipeline.

use indexmap::{IndexMap, IndexSet};
use morphgen_meta::{MetaModelGraph, ModelId};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    Error, Result,
    builder::Indentation,
    config::GeneratorConfig,
    constrain::{ConstrainedModel, Constraints, TypeMapping, constrain},
    naming::NamingConventionOverrides,
    preset::{Preset, PresetWithOptions},
    render::RenderOutput,
    split::{SplitOptions, split},
};

/// A normalized input: one graph and its named root models.
#[derive(Debug, Clone, Default)]
pub struct InputMetaModel {
    pub graph: MetaModelGraph,
    /// Root models in the order they are generated.
    pub models: IndexMap<String, ModelId>,
    pub original_input: Value,
}

impl InputMetaModel {
    pub fn new(graph: MetaModelGraph) -> Self {
        Self {
            graph,
            models: IndexMap::new(),
            original_input: Value::Null,
        }
    }

    /// Register `id` as a root model.
    pub fn with_model(mut self, name: impl Into<String>, id: ModelId) -> Self {
        self.models.insert(name.into(), id);
        self
    }
}

/// Turns a raw document into an [`InputMetaModel`].
pub trait InputProcessor {
    fn process(&self, input: &Value) -> eyre::Result<InputMetaModel>;
}

/// An input processor for graphs that were built programmatically.
#[derive(Debug, Clone)]
pub struct PassthroughInput {
    model: InputMetaModel,
}

impl PassthroughInput {
    pub fn new(model: InputMetaModel) -> Self {
        Self { model }
    }
}

impl InputProcessor for PassthroughInput {
    fn process(&self, input: &Value) -> eyre::Result<InputMetaModel> {
        let mut model = self.model.clone();
        model.original_input = input.clone();
        Ok(model)
    }
}

/// One generated model.
///
/// An empty `model_name` marks a model that was skipped; consumers should
/// ignore it.
#[derive(Debug, Clone, Default)]
pub struct OutputModel {
    pub model_name: String,
    pub result: String,
    pub dependencies: Vec<String>,
    /// The constrained model the output was rendered from.
    pub model: Option<ConstrainedModel>,
}

impl OutputModel {
    fn rendered(output: RenderOutput, model: ConstrainedModel) -> Self {
        Self {
            model_name: output.rendered_name,
            result: output.result,
            dependencies: output.dependencies,
            model: Some(model),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.model_name.is_empty()
    }
}

/// Options common to every backend.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// User presets, applied after the backend's default preset in this order.
    pub presets: Vec<PresetWithOptions>,
    /// `None` keeps the backend's default indentation.
    pub indentation: Option<Indentation>,
    pub naming_convention: NamingConventionOverrides,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options read from a configuration file.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            presets: Vec::new(),
            indentation: config.indentation,
            naming_convention: config.naming.overrides(),
        }
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.presets.push(PresetWithOptions::new(preset));
        self
    }

    pub fn with_preset_options(mut self, preset: Preset, options: Value) -> Self {
        self.presets
            .push(PresetWithOptions::with_options(preset, options));
        self
    }

    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = Some(indentation);
        self
    }

    pub fn with_naming(mut self, naming: NamingConventionOverrides) -> Self {
        self.naming_convention = naming;
        self
    }
}

/// A code generator for one target language.
pub trait ModelGenerator {
    /// Options for [`generate_complete_models`](Self::generate_complete_models).
    type CompleteOptions;

    fn options(&self) -> &GeneratorOptions;

    fn split_options(&self) -> SplitOptions;

    fn type_mapping(&self) -> &dyn TypeMapping;

    fn constraints(&self) -> &dyn Constraints;

    /// The preset every hook chain starts with.
    fn default_preset(&self) -> &Preset;

    /// Render one constrained model.
    ///
    /// Returns [`Error::UnsupportedModel`] when the backend has no renderer
    /// for the model's variant.
    fn render(
        &self,
        model: &ConstrainedModel,
        presets: &[PresetWithOptions],
    ) -> Result<RenderOutput>;

    /// Check complete-model options before any model is processed.
    fn validate_complete_options(&self, options: &Self::CompleteOptions) -> Result<()>;

    /// Wrap a rendered model into a self-contained one.
    fn render_complete(
        &self,
        output: &OutputModel,
        options: &Self::CompleteOptions,
    ) -> Result<String>;

    /// The default preset followed by the user presets.
    fn preset_chain(&self) -> Vec<PresetWithOptions> {
        let mut chain = Vec::with_capacity(self.options().presets.len() + 1);
        chain.push(PresetWithOptions::new(self.default_preset().clone()));
        chain.extend(self.options().presets.iter().cloned());
        chain
    }

    /// Split every root, then constrain and render each resulting model.
    ///
    /// Models without a renderer come back as skipped outputs; any other
    /// error aborts the whole call.
    fn generate(&self, input: &InputMetaModel) -> Result<Vec<OutputModel>> {
        let mut graph = input.graph.clone();
        let policy = self.split_options();

        let mut models = IndexSet::new();
        for &root in input.models.values() {
            models.extend(split(&mut graph, root, &policy));
        }
        debug!(roots = input.models.len(), models = models.len(), "split input");

        let presets = self.preset_chain();
        let mut outputs = Vec::with_capacity(models.len());
        for id in models {
            let constrained = constrain(&graph, id, self.type_mapping(), self.constraints())?;
            match self.render(&constrained, &presets) {
                Ok(output) => outputs.push(OutputModel::rendered(output, constrained)),
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "skipping model");
                    outputs.push(OutputModel::default());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outputs)
    }

    /// Normalize `raw` through `processor`, then [`generate`](Self::generate).
    fn generate_from(
        &self,
        raw: &Value,
        processor: &dyn InputProcessor,
    ) -> Result<Vec<OutputModel>> {
        let input = processor.process(raw).map_err(Error::input)?;
        self.generate(&input)
    }

    /// Like [`generate`](Self::generate), but every output is wrapped with
    /// the imports and module scaffolding it needs to stand alone.
    fn generate_complete_models(
        &self,
        input: &InputMetaModel,
        options: &Self::CompleteOptions,
    ) -> Result<Vec<OutputModel>> {
        self.validate_complete_options(options)?;
        let mut outputs = self.generate(input)?;
        for output in outputs.iter_mut().filter(|o| !o.is_skipped()) {
            output.result = self.render_complete(output, options)?;
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use morphgen_meta::{MetaModel, MetaModelKind};
    use serde_json::json;

    use super::*;
    use crate::{
        preset::hooks,
        testing::{TestGenerator, address_fixture, node_fixture},
    };

    fn address_input() -> InputMetaModel {
        let (graph, address) = address_fixture();
        InputMetaModel::new(graph).with_model("Address", address)
    }

    #[test]
    fn test_generate_address() {
        let outputs = TestGenerator::default().generate(&address_input()).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].model_name, "Address");
        assert_eq!(
            outputs[0].result,
            "class Address {\n  streetName: string;\n  city: string;\n}"
        );
    }

    #[test]
    fn test_unsupported_models_are_skipped() {
        let mut graph = MetaModelGraph::new();
        let root = graph.insert(MetaModel::new("Root", MetaModelKind::object()));
        let tags = graph.insert(MetaModel::new("tags", MetaModelKind::Array { value: root }));
        graph.add_property(root, "tags", tags, true);
        let input = InputMetaModel::new(graph)
            .with_model("Root", root)
            .with_model("Tags", tags);

        let outputs = TestGenerator::default().generate(&input).unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].model_name, "Root");
        assert!(outputs[1].is_skipped());
        assert!(outputs[1].result.is_empty());
    }

    #[test]
    fn test_roots_are_deduplicated() {
        let (graph, node) = node_fixture();
        let input = InputMetaModel::new(graph)
            .with_model("Node", node)
            .with_model("Again", node);
        let outputs = TestGenerator::default().generate(&input).unwrap();
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_user_presets_follow_default() {
        let generator = TestGenerator::new(
            GeneratorOptions::new()
                .with_preset_options(
                    Preset::new("banner").hook("class", hooks::SELF, |_, args| {
                        let text = args.options["text"].as_str().unwrap_or_default();
                        Ok(format!("// {text}\n{}", args.content))
                    }),
                    json!({ "text": "first" }),
                )
                .with_preset(Preset::new("footer").hook("class", hooks::SELF, |_, args| {
                    Ok(format!("{}\n// end", args.content))
                })),
        );

        let outputs = generator.generate(&address_input()).unwrap();
        assert!(outputs[0].result.starts_with("// first\nclass Address {"));
        assert!(outputs[0].result.ends_with("}\n// end"));
    }

    #[test]
    fn test_generate_from_processor() {
        let outputs = TestGenerator::default()
            .generate_from(
                &json!({"title": "Address"}),
                &PassthroughInput::new(address_input()),
            )
            .unwrap();
        assert_eq!(outputs[0].model_name, "Address");
    }

    #[test]
    fn test_failing_processor() {
        struct Broken;
        impl InputProcessor for Broken {
            fn process(&self, _: &Value) -> eyre::Result<InputMetaModel> {
                Err(eyre::eyre!("not a schema"))
            }
        }

        let err = TestGenerator::default()
            .generate_from(&json!(null), &Broken)
            .unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
    }

    #[test]
    fn test_complete_models_validate_first() {
        let generator = TestGenerator::default();
        let err = generator
            .generate_complete_models(&address_input(), &"return".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let outputs = generator
            .generate_complete_models(&address_input(), &"models".to_string())
            .unwrap();
        assert!(outputs[0].result.starts_with("namespace models {\n"));
    }

    #[test]
    fn test_options_from_config() {
        let config = GeneratorConfig::from_toml_str(
            "indentation = { style = \"tabs\", size = 1 }\n[naming]\nproperty = \"snake\"\n",
        )
        .unwrap();
        let options = GeneratorOptions::from_config(&config);
        assert_eq!(options.indentation, Some(Indentation::tabs(1)));
        assert!(options.naming_convention.type_name.is_none());

        let outputs = TestGenerator::new(options)
            .generate(&address_input())
            .unwrap();
        assert_eq!(
            outputs[0].result,
            "class Address {\n\tstreet_name: string;\n\tcity: string;\n}"
        );
    }
}
