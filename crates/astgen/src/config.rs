//! Configuration for code generation.

use serde::{Deserialize, Serialize};

/// How variant field lists are written into record headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldRendering {
    /// Splice the field text exactly as written in the grammar.
    #[default]
    Verbatim,
    /// Re-render as `Type name, ...`, falling back to the verbatim text when
    /// the field list cannot be parsed.
    Normalized,
}

/// What to do with capability names that no declaration resolves, and with
/// duplicate declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityCheck {
    /// Don't check.
    Off,
    /// Log every issue and keep generating.
    #[default]
    Warn,
    /// Fail the run when any issue is found.
    Deny,
}

/// Configuration for code generation.
///
/// Use the builder pattern to construct:
/// ```ignore
/// let config = GenerationConfig::builder()
///     .package("my.lang")
///     .container("MyLangAST")
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct GenerationConfig {
    /// Package declared at the top of the generated file.
    #[builder(into, default = String::from("ast"))]
    pub package: String,

    /// Imports written after the package declaration.
    #[builder(default = default_imports())]
    pub imports: Vec<String>,

    /// Name of the outer interface all families are nested in.
    #[builder(into, default = String::from("Ast"))]
    pub container: String,

    /// Spaces per indentation level.
    #[builder(default = 4)]
    pub indent_width: usize,

    #[builder(default)]
    pub fields: FieldRendering,

    #[builder(default)]
    pub capability_check: CapabilityCheck,

    /// Capabilities declared outside the grammar, which resolve without a
    /// matching family.
    #[builder(default)]
    pub extern_capabilities: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub fn default_imports() -> Vec<String> {
    vec!["java.util.List".to_string(), "java.util.Map".to_string()]
}
