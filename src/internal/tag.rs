//! Resolves tag names to the object ids they point at, from loose refs or `packed-refs`.

use std::{fs, io};

use crate::{
    internal::{
        error::{GraphError, Result},
        object::{self, ObjectId, ObjectType},
    },
    utils::{path::RepoLayout, storage::Storage},
};

// Constants for tag references
const TAG_REF_PREFIX: &str = "refs/tags/";
const TAG_OBJECT_PREFIX: &str = "object ";
const MAX_PEEL_DEPTH: usize = 8;

/// Maps a tag name to the id stored for it.
///
/// Implementations do a single lookup and never read the object itself.
pub trait ReferenceResolver {
    fn resolve_tag(&self, name: &str) -> Result<ObjectId>;
}

/// Reads `refs/tags/<name>`, falling back to `packed-refs`.
#[derive(Debug, Clone)]
pub struct LooseRefs {
    layout: RepoLayout,
}

impl LooseRefs {
    pub fn new(layout: RepoLayout) -> Self {
        Self { layout }
    }

    fn read_loose(&self, name: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.layout.tag(name)) {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound
                        | io::ErrorKind::NotADirectory
                        | io::ErrorKind::IsADirectory
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read_packed(&self, name: &str) -> Result<Option<String>> {
        let content = match fs::read_to_string(self.layout.packed_refs()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let full_ref_name = format!("{TAG_REF_PREFIX}{name}");
        Ok(find_packed_ref(&content, &full_ref_name).map(str::to_string))
    }
}

impl ReferenceResolver for LooseRefs {
    fn resolve_tag(&self, name: &str) -> Result<ObjectId> {
        let value = match self.read_loose(name)? {
            Some(value) => value,
            None => self
                .read_packed(name)?
                .ok_or_else(|| GraphError::TagNotFound(name.to_string()))?,
        };
        let id = value.parse::<ObjectId>()?;
        tracing::debug!("tag {} -> {}", name, id);
        Ok(id)
    }
}

/// Finds `full_ref_name` in `packed-refs` content: `<id> <ref>` lines,
/// skipping `#` comments and `^<id>` peel lines.
fn find_packed_ref<'a>(content: &'a str, full_ref_name: &str) -> Option<&'a str> {
    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| name.trim() == full_ref_name)
        .map(|(id, _)| id.trim())
}

/// Follows annotated tag objects through their `object` header until a commit is reached.
///
/// A lightweight tag's id is returned unchanged once its object is confirmed to be a commit.
pub fn peel_to_commit<S: Storage + ?Sized>(storage: &S, id: &ObjectId) -> Result<ObjectId> {
    let mut current = id.clone();
    // up to MAX_PEEL_DEPTH tag objects, then the commit itself
    for _ in 0..=MAX_PEEL_DEPTH {
        let payload = object::decode(storage, &current)?;
        match payload.kind {
            ObjectType::Commit => return Ok(current),
            ObjectType::Tag => {
                let target = payload
                    .text
                    .lines()
                    .take_while(|line| !line.is_empty())
                    .find_map(|line| line.strip_prefix(TAG_OBJECT_PREFIX))
                    .ok_or_else(|| GraphError::ObjectCorrupt {
                        id: current.to_string(),
                        reason: "tag object has no 'object' header".to_string(),
                    })?;
                tracing::debug!("peel tag object {} -> {}", current, target);
                current = target.trim().parse()?;
            }
            found => {
                return Err(GraphError::UnexpectedObjectType {
                    id: current.to_string(),
                    expected: ObjectType::Commit,
                    found,
                });
            }
        }
    }
    Err(GraphError::ObjectCorrupt {
        id: id.to_string(),
        reason: format!("tag chain deeper than {MAX_PEEL_DEPTH}"),
    })
}
