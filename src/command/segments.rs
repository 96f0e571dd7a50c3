//! Lists the commits attributed to each tag.

use clap::Parser;
use colored::Colorize;

use crate::{
    command::SourceArgs,
    internal::{commit::CommitRecord, segment::CommitGraph},
};

const SHORT_ID_LEN: usize = 7;

#[derive(Parser, Debug)]
pub struct SegmentsArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
    /// Print the segments as JSON
    #[clap(long)]
    pub json: bool,
}

pub fn execute(args: SegmentsArgs) -> anyhow::Result<()> {
    let (_, graph) = args.source.segment()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print!("{}", render_segments(&graph));
    }
    Ok(())
}

/// One header line per tag followed by its commits, oldest first.
pub fn render_segments(graph: &CommitGraph) -> String {
    let mut output = String::new();
    for segment in graph.segments() {
        let count = match segment.commits.len() {
            1 => "1 commit".to_string(),
            n => format!("{n} commits"),
        };
        output.push_str(&format!("{} ({count})\n", segment.tag.bold()));
        for commit in &segment.commits {
            output.push_str(&format!("  {}\n", format_commit(commit)));
        }
    }
    output
}

fn format_commit(commit: &CommitRecord) -> String {
    let id = commit.id.as_str();
    let subject = commit.message.lines().next().unwrap_or_default();
    format!(
        "{} {} {} {}",
        id[..SHORT_ID_LEN.min(id.len())].yellow(),
        commit.author_timestamp,
        commit.author.cyan(),
        subject
    )
}
