//! Renders the tag graph to an image with PlantUML.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use crate::{
    command::SourceArgs,
    internal::graph,
    utils::visualizer::Visualizer,
};

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
    /// Path to plantuml.jar, overrides `visualization_tool`
    #[clap(long)]
    pub tool: Option<PathBuf>,
    /// Image to write (.png or .svg), overrides `output`
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Java launcher, overrides `java`
    #[clap(long)]
    pub java: Option<PathBuf>,
}

pub fn execute(args: RenderArgs) -> anyhow::Result<()> {
    let (mut config, graph) = args.source.segment()?;
    if let Some(tool) = args.tool {
        config.visualization_tool = Some(tool);
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(java) = args.java {
        config.java = java;
    }

    let plantuml = graph::render(&graph);
    let visualizer = Visualizer::new(&config.java, config.require_tool()?);
    let written = visualizer
        .render(&plantuml, &config.output)
        .context("failed to visualize graph")?;

    println!(
        "{} {} ({} tags, {} commits)",
        "Graph written to".green(),
        written.display(),
        graph.len(),
        graph.commit_count()
    );
    Ok(())
}
