use crate::util::{exit_with, exit_with_error, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to grammar file (use '-' or omit for stdin)
    pub file: Option<String>,
    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: Args) {
    let file = args.file.as_deref();
    let contents = read_input(file).unwrap_or_else(|e| exit_with(e));

    let grammar = match astgen::parse(&contents) {
        Ok(grammar) => grammar,
        Err(e) => exit_with_error(&astgen::Error::from(e), &contents, file),
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&grammar)
    } else {
        serde_json::to_string(&grammar)
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => exit_with(e.into()),
    }
}
