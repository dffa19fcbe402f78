//! Core utilities for morphgen.
//!
//! This crate provides the identifier helpers every other morphgen crate
//! builds on: case conversion and replacement of characters that are not
//! valid in identifiers of most target languages.

mod special;
mod utils;

pub use special::{ReplaceOptions, replace_special_characters, special_character_word};
// String utilities
pub use utils::{
    split_words, to_camel_case, to_constant_case, to_kebab_case, to_pascal_case, to_snake_case,
};
