//! Check command - reports every unresolved capability and duplicate name.

use std::path::PathBuf;

use astgen::CapabilityCheck;

use crate::args::GenerationArgs;
use crate::util::{display_path, exit_with, exit_with_error, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to grammar file (use '-' or omit for stdin)
    pub file: Option<String>,
    /// Config file (default: astgen.toml searched upward from the input's directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Name of the outer interface, which always resolves
    #[arg(long)]
    pub container: Option<String>,
    /// Capability declared outside the grammar (repeatable)
    #[arg(long = "extern-capability", value_name = "NAME")]
    pub extern_capabilities: Vec<String>,
}

pub fn run(args: Args) {
    let file = args.file.as_deref();
    let generation = GenerationArgs {
        config: args.config.clone(),
        container: args.container.clone(),
        extern_capabilities: args.extern_capabilities.clone(),
        ..Default::default()
    };
    let mut config = generation
        .load_config(file)
        .unwrap_or_else(|e| exit_with(e));
    config.capability_check = CapabilityCheck::Deny;
    let contents = read_input(file).unwrap_or_else(|e| exit_with(e));

    let grammar = match astgen::parse(&contents) {
        Ok(grammar) => grammar,
        Err(e) => exit_with_error(&astgen::Error::from(e), &contents, file),
    };

    if let Err(e) = astgen::check(&grammar, &config) {
        exit_with_error(&e, &contents, file);
    }

    let variants: usize = grammar.iter().map(|family| family.variants.len()).sum();
    println!(
        "{}: {} families, {} variants, no issues",
        display_path(file),
        grammar.len(),
        variants
    );
}
