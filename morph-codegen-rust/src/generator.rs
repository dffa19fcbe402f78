use morphgen_codegen::{
    Error, Result,
    builder::{CodeBuilder, Indentation},
    config::GeneratorConfig,
    constrain::{ConstrainedModel, Constraints, DefaultConstraints, TypeMapping},
    generator::{GeneratorOptions, ModelGenerator, OutputModel},
    preset::{Preset, PresetWithOptions},
    render::{RenderOutput, Renderer},
    split::SplitOptions,
};
use morphgen_meta::ModelVariant;
use serde::Deserialize;
use tracing::debug;

use crate::{
    naming::RUST_NAMING,
    presets::rust_default_preset,
    renderers::targets::{ENUM, STRUCT, TUPLE, UNION},
    type_mapper::RustTypeMapping,
};

/// Options for complete Rust models, read from the `[rust]` section of a
/// configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RustCompleteOptions {
    /// Module the models live in, relative to the crate root
    /// (e.g., `models::v1`). `None` means the crate root itself.
    pub module: Option<String>,
}

impl RustCompleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.section("rust")
    }

    /// The `use` path prefix of a sibling model.
    fn use_prefix(&self) -> String {
        match &self.module {
            Some(module) => format!("crate::{module}::"),
            None => "crate::".to_string(),
        }
    }
}

/// Rust code generator producing serde-compatible types.
#[derive(Debug, Clone)]
pub struct RustGenerator {
    options: GeneratorOptions,
    pub(crate) constraints: DefaultConstraints,
    preset: Preset,
}

impl RustGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let naming = RUST_NAMING.with_overrides(&options.naming_convention);
        Self {
            options,
            constraints: DefaultConstraints::new(naming).member_separator("::"),
            preset: rust_default_preset(),
        }
    }

    fn indentation(&self) -> Indentation {
        self.options.indentation.unwrap_or(Indentation::RUST)
    }
}

impl Default for RustGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl ModelGenerator for RustGenerator {
    type CompleteOptions = RustCompleteOptions;

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn split_options(&self) -> SplitOptions {
        SplitOptions {
            split_object: true,
            split_enum: true,
            split_tuple: true,
            split_union: true,
            ..Default::default()
        }
    }

    fn type_mapping(&self) -> &dyn TypeMapping {
        &RustTypeMapping
    }

    fn constraints(&self) -> &dyn Constraints {
        &self.constraints
    }

    fn default_preset(&self) -> &Preset {
        &self.preset
    }

    fn render(
        &self,
        model: &ConstrainedModel,
        presets: &[PresetWithOptions],
    ) -> Result<RenderOutput> {
        let variant = model.model().variant();
        let target = match variant {
            ModelVariant::Object => STRUCT,
            ModelVariant::Enum => ENUM,
            ModelVariant::Tuple => TUPLE,
            ModelVariant::Union => UNION,
            _ => {
                return Err(Error::UnsupportedModel {
                    model: model.model().name.clone(),
                    variant,
                });
            }
        };
        debug!(model = %model.model().name, renderer = target, "rendering rust model");
        Renderer::new(&model.graph, model.root, target, presets, self.indentation()).render()
    }

    fn validate_complete_options(&self, options: &RustCompleteOptions) -> Result<()> {
        let Some(module) = &options.module else {
            return Ok(());
        };
        for segment in module.split("::") {
            if self.constraints.naming.is_reserved(segment) {
                return Err(Error::reserved_keyword(segment, "module"));
            }
        }
        Ok(())
    }

    fn render_complete(
        &self,
        output: &OutputModel,
        options: &RustCompleteOptions,
    ) -> Result<String> {
        let mut builder = CodeBuilder::new(self.indentation());
        for dependency in &output.dependencies {
            builder.push_line(dependency);
        }
        if let Some(model) = &output.model {
            let graph = &model.graph;
            let prefix = options.use_prefix();
            for reference in graph.nearest_dependencies(model.root) {
                let target = &graph[graph.resolve(reference)];
                builder.push_line(&format!("use {prefix}{};", target.name));
            }
        }
        if !builder.as_str().is_empty() {
            builder.push_blank();
        }
        builder.push_lines(&output.result);
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use morphgen_codegen::{generator::InputMetaModel, testing::address_fixture};

    use super::*;

    #[test]
    fn test_module_segments_are_checked() {
        let generator = RustGenerator::default();
        assert!(
            generator
                .validate_complete_options(&RustCompleteOptions::new().with_module("models::v1"))
                .is_ok()
        );
        let err = generator
            .validate_complete_options(&RustCompleteOptions::new().with_module("models::type"))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { ref name, .. } if name == "type"));
    }

    #[test]
    fn test_complete_options_from_config() {
        let config = GeneratorConfig::from_toml_str("[rust]\nmodule = \"models\"\n").unwrap();
        let options = RustCompleteOptions::from_config(&config).unwrap();
        assert_eq!(options.module.as_deref(), Some("models"));
        assert_eq!(options.use_prefix(), "crate::models::");

        let empty = RustCompleteOptions::from_config(&GeneratorConfig::default()).unwrap();
        assert_eq!(empty.use_prefix(), "crate::");
    }

    #[test]
    fn test_render_address() {
        let (graph, address) = address_fixture();
        let input = InputMetaModel::new(graph).with_model("Address", address);
        let outputs = RustGenerator::default().generate(&input).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].model_name, "Address");
        assert_eq!(
            outputs[0].dependencies,
            vec!["use serde::{Deserialize, Serialize};".to_string()]
        );
        assert!(outputs[0].result.contains("pub street_name: String,"));
    }
}
