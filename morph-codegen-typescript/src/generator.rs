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
use serde_json::Value;
use tracing::debug;

use crate::{
    naming::TS_NAMING,
    presets::typescript_default_preset,
    renderers::targets::{CLASS, ENUM, INTERFACE, TYPE},
    statements::{Export, ExportType, Import, ModuleSystem},
    type_mapper::TypeScriptTypeMapping,
};

/// What object models are rendered as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    #[default]
    Class,
    Interface,
}

/// Backend options, read from the `[typescript]` section of a
/// configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypeScriptOptions {
    pub model_type: ModelType,
    pub module_system: ModuleSystem,
}

impl TypeScriptOptions {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.section("typescript")
    }
}

/// Options for complete TypeScript models, read from the `[typescript]`
/// section of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypeScriptCompleteOptions {
    pub export_type: ExportType,
    /// Wrap every model in `export namespace <name>`. Namespaced models are
    /// meant to be concatenated into one file, so no imports are rendered.
    pub namespace: Option<String>,
}

impl TypeScriptCompleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_type(mut self, export_type: ExportType) -> Self {
        self.export_type = export_type;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.section("typescript")
    }
}

/// Render an enum value as a TypeScript enum initializer.
///
/// Enum members can only be strings or numbers, so everything else is
/// quoted as JSON text.
fn enum_value_literal(value: &Value) -> String {
    match value {
        Value::String(_) | Value::Number(_) => value.to_string(),
        other => Value::String(other.to_string()).to_string(),
    }
}

/// Prefix the first declaration line of a rendered model with `export`.
fn export_declaration(result: &str) -> String {
    const DECLARATIONS: [&str; 4] = ["class ", "interface ", "enum ", "type "];
    let mut exported = false;
    let lines: Vec<String> = result
        .lines()
        .map(|line| {
            if !exported && DECLARATIONS.iter().any(|d| line.starts_with(d)) {
                exported = true;
                format!("export {line}")
            } else {
                line.to_string()
            }
        })
        .collect();
    lines.join("\n")
}

/// TypeScript code generator producing classes, interfaces, enums and type
/// aliases.
#[derive(Debug, Clone)]
pub struct TypeScriptGenerator {
    options: GeneratorOptions,
    typescript: TypeScriptOptions,
    pub(crate) constraints: DefaultConstraints,
    preset: Preset,
}

impl TypeScriptGenerator {
    pub fn new(options: GeneratorOptions, typescript: TypeScriptOptions) -> Self {
        let naming = TS_NAMING.with_overrides(&options.naming_convention);
        let mut constraints = DefaultConstraints::new(naming);
        constraints.enum_value = enum_value_literal;
        Self {
            options,
            typescript,
            constraints,
            preset: typescript_default_preset(),
        }
    }

    /// A generator configured from the `indentation`, `[naming]` and
    /// `[typescript]` settings of `config`.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(
            GeneratorOptions::from_config(config),
            TypeScriptOptions::from_config(config)?,
        ))
    }

    fn indentation(&self) -> Indentation {
        self.options.indentation.unwrap_or(Indentation::TYPESCRIPT)
    }
}

impl Default for TypeScriptGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default(), TypeScriptOptions::default())
    }
}

impl ModelGenerator for TypeScriptGenerator {
    type CompleteOptions = TypeScriptCompleteOptions;

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn split_options(&self) -> SplitOptions {
        SplitOptions {
            split_object: true,
            split_enum: true,
            ..Default::default()
        }
    }

    fn type_mapping(&self) -> &dyn TypeMapping {
        &TypeScriptTypeMapping
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
        let target = match model.model().variant() {
            ModelVariant::Object => match self.typescript.model_type {
                ModelType::Class => CLASS,
                ModelType::Interface => INTERFACE,
            },
            ModelVariant::Enum => ENUM,
            _ => TYPE,
        };
        debug!(model = %model.model().name, renderer = target, "rendering typescript model");
        Renderer::new(&model.graph, model.root, target, presets, self.indentation()).render()
    }

    fn validate_complete_options(&self, options: &TypeScriptCompleteOptions) -> Result<()> {
        match &options.namespace {
            Some(namespace) if self.constraints.naming.is_reserved(namespace) => {
                Err(Error::reserved_keyword(namespace, "namespace"))
            }
            _ => Ok(()),
        }
    }

    fn render_complete(
        &self,
        output: &OutputModel,
        options: &TypeScriptCompleteOptions,
    ) -> Result<String> {
        let module_system = self.typescript.module_system;
        let mut builder = CodeBuilder::new(self.indentation());

        let imported = output.model.as_ref().filter(|_| options.namespace.is_none());
        if let Some(model) = imported {
            let graph = &model.graph;
            for reference in graph.nearest_dependencies(model.root) {
                let target = &graph[graph.resolve(reference)];
                builder.push_raw(
                    &Import::model(&target.name, options.export_type).build(module_system),
                );
            }
        }
        for dependency in &output.dependencies {
            builder.push_line(dependency);
        }
        if !builder.as_str().is_empty() {
            builder.push_blank();
        }

        match &options.namespace {
            Some(namespace) => {
                builder
                    .push_line(&format!("export namespace {namespace} {{"))
                    .push_indent()
                    .push_lines(&export_declaration(&output.result))
                    .push_dedent()
                    .push_line("}");
            }
            None => {
                builder.push_lines(&output.result);
                builder.push_raw(
                    &Export::model(&output.model_name, options.export_type).build(module_system),
                );
            }
        }
        Ok(builder.build())
    }
}
