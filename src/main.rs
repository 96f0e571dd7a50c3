//! This is the main entry point for tag-graph.

use std::process::ExitCode;

use tag_graph::cli;

fn main() -> ExitCode {
    match cli::parse(None) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}
