//! Snapshot tests for Rust code generation.
//!
//! These tests verify that the generated Rust code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use morphgen_codegen::{
    generator::{GeneratorOptions, InputMetaModel, ModelGenerator, OutputModel},
    testing::{address_fixture, node_fixture, person_fixture},
};
use morphgen_codegen_rust::{
    RustCompleteOptions, RustGenerator, common_preset, description_preset,
};
use morphgen_meta::{
    DictionarySerialization, EnumValue, MetaModel, MetaModelGraph, MetaModelKind,
    MetaModelOptions, ModelId, TupleValue,
};
use serde_json::json;

fn input(graph: MetaModelGraph, name: &str, root: ModelId) -> InputMetaModel {
    InputMetaModel::new(graph).with_model(name, root)
}

/// Generate models and return the output of the named model.
fn render(generator: &RustGenerator, input: &InputMetaModel, name: &str) -> String {
    let outputs = generator.generate(input).expect("generation failed");
    find(&outputs, name).result.clone()
}

fn find<'a>(outputs: &'a [OutputModel], name: &str) -> &'a OutputModel {
    outputs
        .iter()
        .find(|o| o.model_name == name)
        .unwrap_or_else(|| panic!("{name} not generated"))
}

fn pet_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let cat = graph.insert(MetaModel::new("Cat", MetaModelKind::object()));
    let lives = graph.insert(MetaModel::new("lives", MetaModelKind::Integer));
    graph.add_property(cat, "lives", lives, true);
    let dog = graph.insert(MetaModel::new("Dog", MetaModelKind::object()));
    let good = graph.insert(MetaModel::new("good", MetaModelKind::Boolean));
    graph.add_property(dog, "good", good, true);
    let pet = graph.insert(
        MetaModel::new(
            "Pet",
            MetaModelKind::Union {
                members: vec![cat, dog],
            },
        )
        .with_options(MetaModelOptions::new().discriminator("petType")),
    );
    (graph, pet)
}

fn pair_fixture() -> (MetaModelGraph, ModelId) {
    let mut graph = MetaModelGraph::new();
    let label = graph.insert(MetaModel::new("label", MetaModelKind::String));
    let count = graph.insert(
        MetaModel::new("count", MetaModelKind::Integer)
            .with_options(MetaModelOptions::new().format("int64")),
    );
    let pair = graph.insert(MetaModel::new(
        "Pair",
        MetaModelKind::Tuple {
            values: vec![
                TupleValue {
                    index: 0,
                    value: label,
                },
                TupleValue {
                    index: 1,
                    value: count,
                },
            ],
        },
    ));
    (graph, pair)
}

#[test]
fn test_struct_with_nested_models() {
    let (graph, person) = person_fixture();
    let input = input(graph, "Person", person);
    let generator = RustGenerator::default();

    insta::assert_snapshot!(render(&generator, &input, "Person"), @r#"
    /// Person represents a Person model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Person {
        #[serde(rename = "name")]
        pub name: String,
        #[serde(rename = "address", skip_serializing_if = "Option::is_none")]
        pub address: Option<Box<Address>>,
        #[serde(rename = "tags")]
        pub tags: Vec<String>,
        #[serde(rename = "status")]
        pub status: Box<Status>,
    }
    "#);
}

#[test]
fn test_split_models_are_rendered() {
    let (graph, person) = person_fixture();
    let outputs = RustGenerator::default()
        .generate(&input(graph, "Person", person))
        .unwrap();

    let names: Vec<&str> = outputs.iter().map(|o| o.model_name.as_str()).collect();
    assert_eq!(names, vec!["Person", "Address", "Status"]);

    insta::assert_snapshot!(find(&outputs, "Address").result, @r#"
    /// Address represents a Address model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Address {
        #[serde(rename = "city")]
        pub city: String,
    }
    "#);

    insta::assert_snapshot!(find(&outputs, "Status").result, @r#"
    /// Status represents a Status model.
    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub enum Status {
        #[serde(rename = "active")]
        Active,
        #[serde(rename = "inactive")]
        Inactive,
    }
    "#);
}

#[test]
fn test_recursive_struct_is_boxed() {
    let (graph, node) = node_fixture();
    let generator = RustGenerator::default();

    insta::assert_snapshot!(render(&generator, &input(graph, "Node", node), "Node"), @r#"
    /// Node represents a Node model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Node {
        #[serde(rename = "next", skip_serializing_if = "Option::is_none")]
        pub next: Option<Box<Node>>,
    }
    "#);
}

#[test]
fn test_enum_with_object_value() {
    let mut graph = MetaModelGraph::new();
    let mixed = graph.insert(MetaModel::new(
        "Mixed",
        MetaModelKind::Enum {
            values: vec![
                EnumValue::new("1", json!(1)),
                EnumValue::new("extra", json!({ "a": 1 })),
            ],
        },
    ));
    let generator = RustGenerator::default();

    insta::assert_snapshot!(render(&generator, &input(graph, "Mixed", mixed), "Mixed"), @r#"
    /// Mixed represents a Mixed model.
    #[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
    pub enum Mixed {
        #[serde(rename = "1")]
        Number1,
        #[serde(flatten)]
        Extra(std::collections::HashMap<String, serde_json::Value>),
    }
    "#);
}

#[test]
fn test_tagged_union() {
    let (graph, pet) = pet_fixture();
    let outputs = RustGenerator::default()
        .generate(&input(graph, "Pet", pet))
        .unwrap();

    insta::assert_snapshot!(find(&outputs, "Pet").result, @r#"
    /// Pet represents a union of types: Cat, Dog
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    #[serde(tag = "petType")]
    pub enum Pet {
        #[serde(rename = "Cat")]
        Cat(Cat),
        #[serde(rename = "Dog")]
        Dog(Dog),
    }
    "#);
    assert!(
        find(&outputs, "Cat")
            .result
            .contains("#[derive(Clone, Copy, Debug,")
    );
}

#[test]
fn test_untagged_union() {
    let mut graph = MetaModelGraph::new();
    let text = graph.insert(MetaModel::new("text", MetaModelKind::String));
    let number = graph.insert(MetaModel::new("number", MetaModelKind::Float));
    let value = graph.insert(MetaModel::new(
        "Value",
        MetaModelKind::Union {
            members: vec![text, number],
        },
    ));
    let generator = RustGenerator::default();

    insta::assert_snapshot!(render(&generator, &input(graph, "Value", value), "Value"), @r#"
    /// Value represents a union of types: String, f64
    #[derive(Clone, Debug, Deserialize, PartialEq, PartialOrd, Serialize)]
    #[serde(untagged)]
    pub enum Value {
        #[serde(rename = "Text")]
        Text(String),
        #[serde(rename = "Number")]
        Number(f64),
    }
    "#);
}

#[test]
fn test_tuple_struct() {
    let (graph, pair) = pair_fixture();
    let generator = RustGenerator::default();

    insta::assert_snapshot!(render(&generator, &input(graph, "Pair", pair), "Pair"), @r#"
    /// Pair represents a Pair tuple.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Pair(pub String, pub i64);
    "#);
}

#[test]
fn test_common_preset() {
    let generator = RustGenerator::new(GeneratorOptions::new().with_preset(common_preset()));

    let (graph, person) = person_fixture();
    let outputs = generator.generate(&input(graph, "Person", person)).unwrap();
    insta::assert_snapshot!(find(&outputs, "Person").result, @r#"
    /// Person represents a Person model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Person {
        #[serde(rename = "name")]
        pub name: String,
        #[serde(rename = "address", skip_serializing_if = "Option::is_none")]
        pub address: Option<Box<Address>>,
        #[serde(rename = "tags")]
        pub tags: Vec<String>,
        #[serde(rename = "status")]
        pub status: Box<Status>,
    }

    impl Person {
        pub fn new(name: String, address: Option<Address>, tags: Vec<String>, status: Status) -> Self {
            Self {
                name,
                address: address.map(Box::new),
                tags,
                status: Box::new(status),
            }
        }
    }
    "#);
    insta::assert_snapshot!(find(&outputs, "Status").result, @r#"
    /// Status represents a Status model.
    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub enum Status {
        #[serde(rename = "active")]
        Active,
        #[serde(rename = "inactive")]
        Inactive,
    }

    impl Default for Status {
        fn default() -> Self {
            Self::Active
        }
    }
    "#);

    let (graph, pair) = pair_fixture();
    insta::assert_snapshot!(render(&generator, &input(graph, "Pair", pair), "Pair"), @r#"
    /// Pair represents a Pair tuple.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Pair(pub String, pub i64);

    impl Pair {
        pub fn new(value_0: String, value_1: i64) -> Self {
            Self(value_0, value_1)
        }
    }
    "#);
}

#[test]
fn test_common_preset_options() {
    let generator = RustGenerator::new(
        GeneratorOptions::new()
            .with_preset_options(common_preset(), json!({ "implement_new": false })),
    );
    let (graph, person) = person_fixture();
    let outputs = generator.generate(&input(graph, "Person", person)).unwrap();

    assert!(!find(&outputs, "Person").result.contains("impl Person"));
    assert!(find(&outputs, "Status").result.contains("impl Default for Status"));
}

#[test]
fn test_enum_default_from_schema() {
    let mut graph = MetaModelGraph::new();
    let level = graph.insert(
        MetaModel::new(
            "Level",
            MetaModelKind::Enum {
                values: vec![
                    EnumValue::new("low", json!("low")),
                    EnumValue::new("high", json!("high")),
                ],
            },
        )
        .with_original_input(json!({ "default": "high" })),
    );
    let generator = RustGenerator::new(GeneratorOptions::new().with_preset(common_preset()));

    let result = render(&generator, &input(graph, "Level", level), "Level");
    assert!(result.ends_with("fn default() -> Self {\n        Self::High\n    }\n}"));
}

#[test]
fn test_description_preset() {
    let (mut graph, address) = address_fixture();
    let zip = graph.insert(
        MetaModel::new("zip", MetaModelKind::String)
            .with_original_input(json!({ "description": "Postal code.\nDigits only." })),
    );
    graph.add_property(address, "zip", zip, false);
    let generator = RustGenerator::new(GeneratorOptions::new().with_preset(description_preset()));

    insta::assert_snapshot!(render(&generator, &input(graph, "Address", address), "Address"), @r#"
    /// A postal address.
    ///
    /// Address represents a Address model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Address {
        #[serde(rename = "street_name")]
        pub street_name: String,
        #[serde(rename = "city")]
        pub city: String,
        /// Postal code.
        /// Digits only.
        #[serde(rename = "zip", skip_serializing_if = "Option::is_none")]
        pub zip: Option<String>,
    }
    "#);
}

#[test]
fn test_complete_models() {
    let (graph, person) = person_fixture();
    let outputs = RustGenerator::default()
        .generate_complete_models(
            &input(graph, "Person", person),
            &RustCompleteOptions::new().with_module("models"),
        )
        .unwrap();

    insta::assert_snapshot!(find(&outputs, "Person").result, @r#"
    use serde::{Deserialize, Serialize};
    use crate::models::Address;
    use crate::models::Status;

    /// Person represents a Person model.
    #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
    pub struct Person {
        #[serde(rename = "name")]
        pub name: String,
        #[serde(rename = "address", skip_serializing_if = "Option::is_none")]
        pub address: Option<Box<Address>>,
        #[serde(rename = "tags")]
        pub tags: Vec<String>,
        #[serde(rename = "status")]
        pub status: Box<Status>,
    }
    "#);
    assert!(
        find(&outputs, "Status")
            .result
            .starts_with("use serde::{Deserialize, Serialize};\n\n/// Status")
    );
}

#[test]
fn test_unwrapped_dictionary_is_flattened() {
    let mut graph = MetaModelGraph::new();
    let labels = graph.insert(MetaModel::new("Labels", MetaModelKind::object()));
    let name = graph.insert(MetaModel::new("name", MetaModelKind::String));
    graph.add_property(labels, "name", name, true);
    for (property, serialization) in [
        ("extra", DictionarySerialization::Unwrap),
        ("counts", DictionarySerialization::Normal),
    ] {
        let key = graph.insert(MetaModel::new("key", MetaModelKind::String));
        let value = graph.insert(MetaModel::new("value", MetaModelKind::String));
        let dictionary = graph.insert(MetaModel::new(
            property,
            MetaModelKind::Dictionary {
                key,
                value,
                serialization,
            },
        ));
        graph.add_property(labels, property, dictionary, true);
    }

    let result = render(&RustGenerator::default(), &input(graph, "Labels", labels), "Labels");
    assert!(result.contains(
        "    #[serde(flatten)]\n    pub extra: std::collections::HashMap<String, String>,\n"
    ));
    assert!(result.contains(
        "    #[serde(rename = \"counts\")]\n    pub counts: std::collections::HashMap<String, String>,\n"
    ));
}
