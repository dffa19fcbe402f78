//! Generator configuration files.
//!
//! ```toml
//! indentation = { style = "spaces", size = 4 }
//!
//! [naming]
//! type_name = "pascal"
//! property = "snake"
//!
//! [rust]
//! module = "models"
//! ```
//!
//! Sections other than `indentation` and `naming` belong to a backend and
//! are kept as raw TOML until that backend reads them with
//! [`GeneratorConfig::section`].

use std::path::Path;

use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    Error, Result,
    builder::Indentation,
    naming::{NamingConventionOverrides, NamingStyle},
};

/// Case styles chosen in a configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub type_name: Option<NamingStyle>,
    pub property: Option<NamingStyle>,
}

impl NamingConfig {
    pub fn overrides(&self) -> NamingConventionOverrides {
        NamingConventionOverrides {
            type_name: self.type_name.map(NamingStyle::formatter),
            property: self.property.map(NamingStyle::formatter),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub indentation: Option<Indentation>,
    pub naming: NamingConfig,
    /// Backend sections, keyed by backend name.
    #[serde(flatten)]
    pub targets: toml::Table,
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config { source })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading generator configuration");
        Self::from_toml_str(&content)
    }

    /// Deserialize the section of one backend, or its default when the
    /// section is missing.
    pub fn section<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        match self.targets.get(name) {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|source| Error::Config { source }),
            None => Ok(T::default()),
        }
    }
}
