//! Shared argument definitions.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use astgen::{CapabilityCheck, FieldRendering, GenerationConfig};
use clap::ValueEnum;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::util::search_dir;

/// Generation-related command-line arguments.
///
/// Can be embedded in other command Args using `#[command(flatten)]`.
#[derive(clap::Args, Clone, Default)]
pub struct GenerationArgs {
    /// Config file (default: astgen.toml searched upward from the input's directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Package of the generated file
    #[arg(long)]
    pub package: Option<String>,

    /// Name of the outer interface containing all families
    #[arg(long)]
    pub container: Option<String>,

    /// Import to add (repeatable), appended to the configured imports
    #[arg(long = "import", value_name = "IMPORT")]
    pub imports: Vec<String>,

    /// Drop the configured/default imports
    #[arg(long)]
    pub no_default_imports: bool,

    /// Spaces per indentation level
    #[arg(long)]
    pub indent: Option<usize>,

    /// How variant field lists are written
    #[arg(long, value_enum)]
    pub fields: Option<FieldsArg>,

    /// What to do with unresolved capabilities and duplicate names
    #[arg(long = "check", value_enum)]
    pub capability_check: Option<CheckArg>,

    /// Capability declared outside the grammar (repeatable)
    #[arg(long = "extern-capability", value_name = "NAME")]
    pub extern_capabilities: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FieldsArg {
    /// Splice field text as written
    Verbatim,
    /// Re-render fields as `Type name, ...`
    Normalized,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CheckArg {
    Off,
    Warn,
    Deny,
}

impl From<FieldsArg> for FieldRendering {
    fn from(arg: FieldsArg) -> Self {
        match arg {
            FieldsArg::Verbatim => FieldRendering::Verbatim,
            FieldsArg::Normalized => FieldRendering::Normalized,
        }
    }
}

impl From<CheckArg> for CapabilityCheck {
    fn from(arg: CheckArg) -> Self {
        match arg {
            CheckArg::Off => CapabilityCheck::Off,
            CheckArg::Warn => CapabilityCheck::Warn,
            CheckArg::Deny => CapabilityCheck::Deny,
        }
    }
}

impl GenerationArgs {
    /// Resolve the project config for `file` and apply the flags on top.
    pub fn load_config(&self, file: Option<&str>) -> anyhow::Result<GenerationConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let dir = search_dir(file);
                let dir = fs::canonicalize(&dir).unwrap_or(dir);
                ProjectConfig::find_config_file(&dir)
            }
        };
        let project = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                ProjectConfig::load(&path)
                    .with_context(|| format!("Error loading {}", path.display()))?
            }
            None => ProjectConfig::default(),
        };
        Ok(self.to_generation_config(project))
    }

    /// Build the generation config: defaults, then the project file, then flags.
    pub fn to_generation_config(&self, project: ProjectConfig) -> GenerationConfig {
        let mut config = project.into_generation_config();
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
        if let Some(container) = &self.container {
            config.container = container.clone();
        }
        if self.no_default_imports {
            config.imports.clear();
        }
        config.imports.extend(self.imports.iter().cloned());
        if let Some(indent) = self.indent {
            config.indent_width = indent;
        }
        if let Some(fields) = self.fields {
            config.fields = fields.into();
        }
        if let Some(check) = self.capability_check {
            config.capability_check = check.into();
        }
        config
            .extern_capabilities
            .extend(self.extern_capabilities.iter().cloned());
        config
    }
}
