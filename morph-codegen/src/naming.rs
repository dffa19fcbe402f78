//! Naming conventions and the identifier constraint pipeline.
//!
//! Every identifier a backend emits goes through [`NamingConvention::constrain`],
//! which runs the same steps in the same order for every target:
//!
//! 1. replace disallowed characters
//! 2. prefix a leading digit (`number_`)
//! 3. replace an empty result (`empty`)
//! 4. escape reserved keywords (`reserved_`)
//! 5. on a clash with a name already given to a sibling, prefix `reserved_`
//!    and start over
//! 6. apply the case style
//!
//! The case style comes last so that two raw names only count as clashing
//! when their final identifiers are equal.

use morphgen_core::{
    ReplaceOptions, replace_special_characters, to_camel_case, to_constant_case, to_pascal_case,
    to_snake_case,
};
use serde::Deserialize;

/// Prefix used both for reserved keywords and for clashing names.
pub const RESERVED_PREFIX: &str = "reserved_";

/// Which kind of identifier is being constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    Model,
    Property,
    EnumKey,
}

/// Prefix a value that starts with a digit.
pub fn no_number_start(value: &str) -> String {
    if value.starts_with(|c: char| c.is_ascii_digit()) {
        format!("number_{value}")
    } else {
        value.to_string()
    }
}

/// Replace an empty value with a fallback token.
pub fn no_empty_value(value: &str) -> String {
    if value.is_empty() {
        "empty".to_string()
    } else {
        value.to_string()
    }
}

/// Escape a reserved keyword with [`RESERVED_PREFIX`].
pub fn escape_with_prefix(value: &str) -> String {
    format!("{RESERVED_PREFIX}{value}")
}

/// Escape `value` with [`RESERVED_PREFIX`] if `is_reserved` says so.
pub fn no_reserved_keywords(value: &str, is_reserved: impl Fn(&str) -> bool) -> String {
    if is_reserved(value) {
        escape_with_prefix(value)
    } else {
        value.to_string()
    }
}

/// Check a word against a keyword list.
pub fn is_reserved_keyword(word: &str, keywords: &[&str], case_insensitive: bool) -> bool {
    if case_insensitive {
        keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
    } else {
        keywords.contains(&word)
    }
}

/// Replace special characters, keeping spaces, dashes and underscores as
/// word separators for the case style.
pub fn sanitize_identifier(value: &str) -> String {
    let options = ReplaceOptions::new().exclude([' ', '-', '_']).separator("_");
    replace_special_characters(value, &options)
}

/// Named case styles, used where naming is configured from a file.
///
/// Every style joins words without spaces or dashes, since the sanitizer
/// keeps those as word separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    Pascal,
    Camel,
    Snake,
    Constant,
}

impl NamingStyle {
    pub fn formatter(self) -> fn(&str) -> String {
        match self {
            NamingStyle::Pascal => to_pascal_case,
            NamingStyle::Camel => to_camel_case,
            NamingStyle::Snake => to_snake_case,
            NamingStyle::Constant => to_constant_case,
        }
    }
}

/// Caller overrides for the case style of one name class.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingConventionOverrides {
    pub type_name: Option<fn(&str) -> String>,
    pub property: Option<fn(&str) -> String>,
}

/// Language-specific naming conventions.
///
/// Defines the case style per name class and the reserved words of the
/// target language.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Case style for model and type names (e.g., "street_address" -> "StreetAddress")
    pub type_name: fn(&str) -> String,
    /// Case style for property names
    pub property: fn(&str) -> String,
    /// Case style for enum keys
    pub enum_key: fn(&str) -> String,
    /// Replace characters the language does not allow in identifiers
    pub sanitize: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "enum" -> "reserved_enum")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word, ignoring case.
    pub fn is_reserved(&self, name: &str) -> bool {
        is_reserved_keyword(name, self.reserved_words, true)
    }

    /// Apply caller overrides on top of this convention.
    pub fn with_overrides(mut self, overrides: &NamingConventionOverrides) -> Self {
        if let Some(type_name) = overrides.type_name {
            self.type_name = type_name;
        }
        if let Some(property) = overrides.property {
            self.property = property;
        }
        self
    }

    pub fn formatter(&self, class: NameClass) -> fn(&str) -> String {
        match class {
            NameClass::Model => self.type_name,
            NameClass::Property => self.property,
            NameClass::EnumKey => self.enum_key,
        }
    }

    /// Run the full constraint pipeline on a raw name.
    ///
    /// `is_taken` reports whether a final identifier is already used by a
    /// sibling.
    pub fn constrain(
        &self,
        raw: &str,
        class: NameClass,
        is_taken: impl Fn(&str) -> bool,
    ) -> String {
        let format = self.formatter(class);
        let mut candidate = raw.to_string();
        loop {
            candidate = (self.sanitize)(&candidate);
            candidate = no_number_start(&candidate);
            candidate = no_empty_value(&candidate);
            if self.is_reserved(&candidate) || self.is_reserved(&format(&candidate)) {
                candidate = (self.escape_reserved)(&candidate);
            }

            let formatted = format(&candidate);
            // the case style may drop separators and expose a digit or nothing
            if formatted.is_empty() {
                candidate = "empty".to_string();
                continue;
            }
            if formatted.starts_with(|c: char| c.is_ascii_digit()) {
                candidate = format!("number_{candidate}");
                continue;
            }
            if !is_taken(&formatted) {
                return formatted;
            }
            candidate = format!("{RESERVED_PREFIX}{candidate}");
        }
    }

    /// Constrain a name that has no siblings, such as a model name.
    pub fn constrain_standalone(&self, raw: &str, class: NameClass) -> String {
        self.constrain(raw, class, |_| false)
    }
}
