//! TypeScript backend for morphgen.
//!
//! Renders objects as classes (or interfaces), enums as `enum`
//! declarations and every other model as a `type` alias. Complete models
//! add the imports of their dependencies and an export statement for ES
//! modules or CommonJS.
//!
//! ```
//! use morphgen_codegen::generator::{InputMetaModel, ModelGenerator};
//! use morphgen_codegen_typescript::TypeScriptGenerator;
//! use morphgen_meta::{MetaModel, MetaModelGraph, MetaModelKind};
//!
//! let mut graph = MetaModelGraph::new();
//! let address = graph.insert(MetaModel::new("Address", MetaModelKind::object()));
//! let city = graph.insert(MetaModel::new("city", MetaModelKind::String));
//! graph.add_property(address, "city", city, true);
//!
//! let input = InputMetaModel::new(graph).with_model("Address", address);
//! let outputs = TypeScriptGenerator::default().generate(&input).unwrap();
//! assert!(outputs[0].result.contains("private _city: string;"));
//! ```

mod generator;
mod naming;
mod presets;
mod renderers;
mod statements;
mod type_mapper;

pub use generator::{ModelType, TypeScriptCompleteOptions, TypeScriptGenerator, TypeScriptOptions};
pub use naming::TS_NAMING;
pub use presets::{description_preset, typescript_default_preset};
pub use renderers::targets;
pub use statements::{Export, ExportType, Import, ModuleSystem};
pub use type_mapper::TypeScriptTypeMapping;
