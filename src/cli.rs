//! CLI entry for tag-graph, defining clap subcommands, setting up logging, and dispatching each command handler.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::command;

// The Cli struct represents the root of the command line interface.
#[derive(Parser, Debug)]
#[command(
    name = "tag-graph",
    about = "Draw the commits of each tag of a repository as a PlantUML diagram",
    version
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// subcommand's execute and args are defined in `command` module
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Render the tag graph to an image with PlantUML")]
    Render(command::render::RenderArgs),
    #[command(about = "Print the PlantUML source of the tag graph")]
    Diagram(command::diagram::DiagramArgs),
    #[command(about = "List the commits attributed to each tag")]
    Segments(command::segments::SegmentsArgs),
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second call (tests driving `parse` repeatedly) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parses the command line and runs the chosen subcommand.
/// - `args`: parse from command line if it's `None`, otherwise parse from the given args
pub fn parse(args: Option<&[&str]>) -> anyhow::Result<()> {
    let args = match args {
        Some(args) => Cli::try_parse_from(args)?,
        None => Cli::parse(),
    };
    init_tracing(args.verbose);

    match args.command {
        Commands::Render(args) => command::render::execute(args),
        Commands::Diagram(args) => command::diagram::execute(args),
        Commands::Segments(args) => command::segments::execute(args),
    }
}

/// Catches conflicting flags and bad defaults in the derived parser, see
/// [`Command::debug_assert`](https://docs.rs/clap/latest/clap/struct.Command.html#method.debug_assert).
#[test]
fn verify_cli() {
    use clap::CommandFactory;

    Cli::command().debug_assert()
}
