//! Error types for the generation pipeline.

use std::path::PathBuf;

use miette::Diagnostic;
use morphgen_meta::ModelVariant;
use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{name}' is a reserved keyword and cannot be used as {context}")]
    #[diagnostic(
        code(morphgen::reserved_keyword),
        help("choose a different {context} or prefix it, e.g. '{name}_models'")
    )]
    Configuration { name: String, context: String },

    #[error("no renderer for {variant} model '{model}'")]
    #[diagnostic(
        code(morphgen::unsupported_model),
        help("enable splitting for {variant} models or register a renderer for them")
    )]
    UnsupportedModel { model: String, variant: ModelVariant },

    #[error("failed to constrain model '{model}'")]
    #[diagnostic(code(morphgen::lowering))]
    Lowering {
        model: String,
        #[source]
        source: BoxedSource,
    },

    #[error("failed to process input")]
    #[diagnostic(code(morphgen::input))]
    Input {
        #[source]
        source: BoxedSource,
    },

    #[error("failed to render model '{model}'")]
    #[diagnostic(code(morphgen::render))]
    Render {
        model: String,
        #[source]
        source: BoxedSource,
    },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(morphgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse generator configuration")]
    #[diagnostic(code(morphgen::config))]
    Config {
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// A caller-chosen identifier clashed with a reserved keyword.
    pub fn reserved_keyword(name: impl Into<String>, context: impl Into<String>) -> Self {
        Error::Configuration {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Wrap a failing type-mapping or constraint callback.
    pub fn lowering(model: impl Into<String>, report: eyre::Report) -> Self {
        Error::Lowering {
            model: model.into(),
            source: report.into(),
        }
    }

    /// Wrap a failing input processor.
    pub fn input(report: eyre::Report) -> Self {
        Error::Input {
            source: report.into(),
        }
    }

    /// Wrap a failing preset or renderer.
    pub fn render(model: impl Into<String>, report: eyre::Report) -> Self {
        Error::Render {
            model: model.into(),
            source: report.into(),
        }
    }

    /// Returns true if the error only affects a single model of a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnsupportedModel { .. })
    }
}
