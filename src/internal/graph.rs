//! PlantUML rendering of a tag-segmented commit graph.

use crate::internal::segment::{CommitGraph, TagSegment};

/// Renders `graph` as a PlantUML diagram: one package per tag, one node per
/// commit labelled with message, timestamp and author, and an edge between
/// each pair of consecutive commits.
pub fn render(graph: &CommitGraph) -> String {
    let mut plantuml = String::from("@startuml\n");
    for (position, segment) in graph.segments().iter().enumerate() {
        render_segment(&mut plantuml, position, segment);
    }
    plantuml.push_str("@enduml");
    plantuml
}

fn render_segment(plantuml: &mut String, position: usize, segment: &TagSegment) {
    let alias = node_alias(position, &segment.tag);
    plantuml.push_str(&format!("package \"{}\" {{\n", escape_label(&segment.tag)));
    for (idx, commit) in segment.commits.iter().enumerate() {
        plantuml.push_str(&format!(
            "node \"{}\\n{}\\n{}\" as {alias}_{idx}\n",
            escape_label(&commit.message),
            escape_label(&commit.author_timestamp),
            escape_label(&commit.author),
        ));
    }
    for idx in 1..segment.commits.len() {
        plantuml.push_str(&format!("{alias}_{} --> {alias}_{idx}\n", idx - 1));
    }
    plantuml.push_str("}\n");
}

/// `t<position>_<tag>` with every character outside `[A-Za-z0-9_]` replaced by `_`.
fn node_alias(position: usize, tag: &str) -> String {
    let tag: String = tag
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("t{position}_{tag}")
}

/// Keeps a label on one line inside double quotes. Backslashes are doubled
/// before newlines become `\n`.
fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\r', "")
        .replace('\n', "\\n")
        .replace('"', "'")
}
