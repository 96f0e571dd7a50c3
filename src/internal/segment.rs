//! Partitions history into per-tag segments, each bounded by the previous tag's commit.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    internal::{
        commit::CommitRecord,
        error::Result,
        object::ObjectId,
        tag::{self, ReferenceResolver},
        walk,
    },
    utils::storage::Storage,
};

/// The commits attributed to one tag, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSegment {
    pub tag: String,
    pub commits: Vec<CommitRecord>,
}

/// Tag segments in the order the tags were given.
///
/// Serializes as a JSON object from tag name to its commit list, keys in
/// segment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    segments: Vec<TagSegment>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a segment at the end, or replaces the segment of the same tag in place.
    pub fn insert(&mut self, segment: TagSegment) {
        match self.segments.iter_mut().find(|s| s.tag == segment.tag) {
            Some(existing) => *existing = segment,
            None => self.segments.push(segment),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&TagSegment> {
        self.segments.iter().find(|s| s.tag == tag)
    }

    pub fn segments(&self) -> &[TagSegment] {
        &self.segments
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of commits over all segments.
    pub fn commit_count(&self) -> usize {
        self.segments.iter().map(|s| s.commits.len()).sum()
    }
}

impl Serialize for CommitGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.segments.len()))?;
        for segment in &self.segments {
            map.serialize_entry(&segment.tag, &segment.commits)?;
        }
        map.end()
    }
}

/// Builds one segment per tag, in the given order.
///
/// Each tag's walk stops at the commit of the tag before it, so a commit is
/// attributed to the earliest tag that reaches it. Tags must be listed
/// oldest first for that to hold; a tag whose predecessor is not one of its
/// ancestors gets its whole history. With `peel_tags`, ids naming annotated
/// tag objects are followed to their commit before walking.
pub fn segment<S, R, T>(
    storage: &S,
    refs: &R,
    tag_names: &[T],
    peel_tags: bool,
) -> Result<CommitGraph>
where
    S: Storage + ?Sized,
    R: ReferenceResolver + ?Sized,
    T: AsRef<str>,
{
    let mut graph = CommitGraph::new();
    let mut previous: Option<ObjectId> = None;

    for name in tag_names {
        let name = name.as_ref();
        let mut tag_commit = refs.resolve_tag(name)?;
        if peel_tags {
            tag_commit = tag::peel_to_commit(storage, &tag_commit)?;
        }
        let commits = walk::walk(storage, &tag_commit, previous.as_ref())?;
        tracing::debug!("tag {}: {} commits", name, commits.len());
        graph.insert(TagSegment {
            tag: name.to_string(),
            commits,
        });
        previous = Some(tag_commit);
    }
    Ok(graph)
}
