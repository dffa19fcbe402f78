//! Rust backend for morphgen.
//!
//! Renders objects as structs, enums as enums, tuples as tuple structs and
//! unions as enums of newtype variants, all deriving serde's `Serialize`
//! and `Deserialize`.
//!
//! ```
//! use morphgen_codegen::generator::{InputMetaModel, ModelGenerator};
//! use morphgen_codegen_rust::RustGenerator;
//! use morphgen_meta::{MetaModel, MetaModelGraph, MetaModelKind};
//!
//! let mut graph = MetaModelGraph::new();
//! let address = graph.insert(MetaModel::new("Address", MetaModelKind::object()));
//! let city = graph.insert(MetaModel::new("city", MetaModelKind::String));
//! graph.add_property(address, "city", city, true);
//!
//! let input = InputMetaModel::new(graph).with_model("Address", address);
//! let outputs = RustGenerator::default().generate(&input).unwrap();
//! assert!(outputs[0].result.contains("pub struct Address {"));
//! ```

mod derives;
mod generator;
mod naming;
mod presets;
mod renderers;
mod type_mapper;

pub use derives::{DeriveTrait, can_derive, derives_for};
pub use generator::{RustCompleteOptions, RustGenerator};
pub use naming::RUST_NAMING;
pub use presets::{CommonPresetOptions, common_preset, description_preset, rust_default_preset};
pub use renderers::{SERDE_IMPORT, targets};
pub use type_mapper::{RustTypeMapping, float_type, integer_type};
