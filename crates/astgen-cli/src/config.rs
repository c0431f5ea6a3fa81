//! Project configuration stored in `astgen.toml`.
//!
//! ```toml
//! package = "MyLang"
//! container = "MyLangAST"
//! imports = ["java.util.List", "java.util.Map"]
//! indent-width = 4
//! fields = "verbatim"
//! capability-check = "deny"
//! extern-capabilities = ["Serializable"]
//! ```
//!
//! Every key is optional. Values given on the command line win over the file.

use std::path::{Path, PathBuf};

use astgen::{CapabilityCheck, FieldRendering, GenerationConfig};
use serde::Deserialize;

/// The standard configuration filename.
pub const CONFIG_FILENAME: &str = "astgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    pub package: Option<String>,
    pub container: Option<String>,
    pub imports: Option<Vec<String>>,
    pub indent_width: Option<usize>,
    pub fields: Option<FieldRendering>,
    pub capability_check: Option<CapabilityCheck>,
    #[serde(default)]
    pub extern_capabilities: Vec<String>,
}

impl ProjectConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parse configuration from a string.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Find the configuration file by searching upward from the given directory.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply file values on top of the generator defaults.
    pub fn into_generation_config(self) -> GenerationConfig {
        let defaults = GenerationConfig::default();
        GenerationConfig {
            package: self.package.unwrap_or(defaults.package),
            imports: self.imports.unwrap_or(defaults.imports),
            container: self.container.unwrap_or(defaults.container),
            indent_width: self.indent_width.unwrap_or(defaults.indent_width),
            fields: self.fields.unwrap_or(defaults.fields),
            capability_check: self.capability_check.unwrap_or(defaults.capability_check),
            extern_capabilities: self.extern_capabilities,
        }
    }
}
