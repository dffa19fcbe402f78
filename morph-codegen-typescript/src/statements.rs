//! Import and export statements for the supported module systems.

use morphgen_codegen::builder::CodeBuilder;
use serde::Deserialize;

/// Module system the generated files are written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSystem {
    /// `import` / `export` statements.
    #[default]
    Esm,
    /// `require` / `module.exports`.
    Cjs,
}

/// How a model is exported from its file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    #[default]
    Named,
    Default,
}

/// Builder for import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    named: Vec<String>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            named: Vec::new(),
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Import the model `name` from its sibling file, the way `export_type`
    /// exported it.
    pub fn model(name: &str, export_type: ExportType) -> Self {
        let import = Self::new(format!("./{name}"));
        match export_type {
            ExportType::Named => import.named(name),
            ExportType::Default => import.default(name),
        }
    }

    pub fn render(&self, module_system: ModuleSystem, builder: CodeBuilder) -> CodeBuilder {
        match module_system {
            ModuleSystem::Esm => builder.line(&self.esm()),
            ModuleSystem::Cjs => self.cjs(builder),
        }
    }

    fn esm(&self) -> String {
        let named = self.named.join(", ");
        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => format!("import {def} from \"{}\";", self.from),
            (Some(def), false) => format!("import {def}, {{ {named} }} from \"{}\";", self.from),
            (None, false) => format!("import {{ {named} }} from \"{}\";", self.from),
            (None, true) => format!("import \"{}\";", self.from),
        }
    }

    fn cjs(&self, builder: CodeBuilder) -> CodeBuilder {
        let require = format!("require(\"{}\")", self.from);
        let named = self.named.join(", ");
        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => builder.line(&format!("const {def} = {require};")),
            (Some(def), false) => builder
                .line(&format!("const {def} = {require};"))
                .line(&format!("const {{ {named} }} = {def};")),
            (None, false) => builder.line(&format!("const {{ {named} }} = {require};")),
            (None, true) => builder.line(&format!("{require};")),
        }
    }

    /// Build the import as a string.
    pub fn build(&self, module_system: ModuleSystem) -> String {
        self.render(module_system, CodeBuilder::default()).build()
    }
}

/// Builder for export statements.
#[derive(Debug, Clone)]
pub struct Export {
    default: Option<String>,
    named: Vec<String>,
}

impl Export {
    pub fn new() -> Self {
        Self {
            default: None,
            named: Vec::new(),
        }
    }

    /// Export as default.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Export a named item.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Export the model `name` as `export_type` says.
    pub fn model(name: &str, export_type: ExportType) -> Self {
        match export_type {
            ExportType::Named => Self::new().named(name),
            ExportType::Default => Self::new().default(name),
        }
    }

    pub fn render(&self, module_system: ModuleSystem, builder: CodeBuilder) -> CodeBuilder {
        let builder = match (self.named.is_empty(), module_system) {
            (true, _) => builder,
            (false, ModuleSystem::Esm) => {
                builder.line(&format!("export {{ {} }};", self.named.join(", ")))
            }
            (false, ModuleSystem::Cjs) => builder.each(&self.named, |b, name| {
                b.line(&format!("exports.{name} = {name};"))
            }),
        };
        match (&self.default, module_system) {
            (None, _) => builder,
            (Some(def), ModuleSystem::Esm) => builder.line(&format!("export default {def};")),
            (Some(def), ModuleSystem::Cjs) => builder.line(&format!("module.exports = {def};")),
        }
    }

    /// Build the export as a string.
    pub fn build(&self, module_system: ModuleSystem) -> String {
        self.render(module_system, CodeBuilder::default()).build()
    }
}

impl Default for Export {
    fn default() -> Self {
        Self::new()
    }
}
