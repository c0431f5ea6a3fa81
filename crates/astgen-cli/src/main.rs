use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod args;
mod commands;
mod config;
mod util;

#[derive(Parser)]
#[command(name = "astgen", about = "Sealed AST hierarchy generator")]
struct Cli {
    /// Log debug output to stderr (overridden by ASTGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate source for a grammar
    Generate(commands::generate::Args),
    /// Print the parsed grammar model as JSON
    Inspect(commands::inspect::Args),
    /// Parse a grammar and report every unresolved or duplicate name
    Check(commands::check::Args),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("ASTGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
