use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use astgen::Emitter;
use tracing::info;

use crate::args::GenerationArgs;
use crate::util::{exit_with, exit_with_error, print_warnings, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to grammar file (use '-' or omit for stdin)
    pub file: Option<String>,
    /// Write generated source here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub generation: GenerationArgs,
}

pub fn run(args: Args) {
    let file = args.file.as_deref();
    let config = args
        .generation
        .load_config(file)
        .unwrap_or_else(|e| exit_with(e));
    let contents = read_input(file).unwrap_or_else(|e| exit_with(e));

    let grammar = match astgen::parse(&contents) {
        Ok(grammar) => grammar,
        Err(e) => exit_with_error(&astgen::Error::from(e), &contents, file),
    };
    match astgen::check(&grammar, &config) {
        Ok(issues) => print_warnings(&issues, &contents, file),
        Err(e) => exit_with_error(&e, &contents, file),
    }
    let source = Emitter::new(config).emit(&grammar);

    let written = match &args.output {
        Some(path) => fs::write(path, source.to_string())
            .with_context(|| format!("Error writing {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(source.to_string().as_bytes())
            .context("Error writing to stdout"),
    };
    if let Err(e) = written {
        exit_with(e);
    }
    let output = match &args.output {
        Some(path) => path.display().to_string(),
        None => String::from("<stdout>"),
    };
    info!(
        families = grammar.len(),
        lines = source.len(),
        %output,
        "wrote generated source"
    );
}
