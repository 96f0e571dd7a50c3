//! Prints the PlantUML source of the tag graph without rendering it.

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::{command::SourceArgs, internal::graph};

#[derive(Parser, Debug)]
pub struct DiagramArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
    /// Write the diagram to this file instead of stdout
    #[clap(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: DiagramArgs) -> anyhow::Result<()> {
    let (_, graph) = args.source.segment()?;
    let plantuml = graph::render(&graph);
    match args.out {
        Some(path) => fs::write(&path, plantuml + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{plantuml}"),
    }
    Ok(())
}
