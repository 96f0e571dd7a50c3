//! A repository on disk: its loose object store and tag references.

use std::path::{Path, PathBuf};

use crate::{
    internal::{
        commit::CommitRecord,
        error::Result,
        object::{self, ObjectId, ObjectPayload},
        segment::{self, CommitGraph},
        tag::{LooseRefs, ReferenceResolver},
        walk,
    },
    utils::{path::RepoLayout, storage::local::LocalStorage},
};

#[derive(Debug, Clone)]
pub struct Repository {
    layout: RepoLayout,
    storage: LocalStorage,
    refs: LooseRefs,
}

impl Repository {
    /// Opens `root`, whose store lives in `root/store_dir`. Nothing is read until asked for.
    pub fn open(root: impl Into<PathBuf>, store_dir: impl AsRef<Path>) -> Self {
        Self::with_layout(RepoLayout::new(root, store_dir))
    }

    pub fn with_layout(layout: RepoLayout) -> Self {
        Repository {
            storage: LocalStorage::new(layout.objects()),
            refs: LooseRefs::new(layout.clone()),
            layout,
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn refs(&self) -> &LooseRefs {
        &self.refs
    }

    pub fn decode(&self, id: &ObjectId) -> Result<ObjectPayload> {
        object::decode(&self.storage, id)
    }

    pub fn resolve_tag(&self, name: &str) -> Result<ObjectId> {
        self.refs.resolve_tag(name)
    }

    pub fn walk(&self, start: &ObjectId, boundary: Option<&ObjectId>) -> Result<Vec<CommitRecord>> {
        walk::walk(&self.storage, start, boundary)
    }

    pub fn segment<T: AsRef<str>>(&self, tag_names: &[T], peel_tags: bool) -> Result<CommitGraph> {
        tracing::debug!(
            "segmenting {} tags in {}",
            tag_names.len(),
            self.layout.root().display()
        );
        segment::segment(&self.storage, &self.refs, tag_names, peel_tags)
    }
}
