//! Path builders for repository storage: objects, tag refs, and packed refs relative to the repository root.

use std::path::{Path, PathBuf};

pub const DEFAULT_STORE_DIR: &str = ".git";

/// Where the object store and references of one repository live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLayout {
    root: PathBuf,
    store_dir: PathBuf,
}

impl RepoLayout {
    pub fn new(root: impl Into<PathBuf>, store_dir: impl AsRef<Path>) -> Self {
        Self {
            root: root.into(),
            store_dir: store_dir.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<store_dir>`, e.g. `repo/.git`
    pub fn storage(&self) -> PathBuf {
        self.root.join(&self.store_dir)
    }

    pub fn objects(&self) -> PathBuf {
        self.storage().join("objects")
    }

    pub fn tags(&self) -> PathBuf {
        self.storage().join("refs").join("tags")
    }

    pub fn tag(&self, name: &str) -> PathBuf {
        self.tags().join(name)
    }

    pub fn packed_refs(&self) -> PathBuf {
        self.storage().join("packed-refs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = RepoLayout::new("/work/repo", ".git");
        assert_eq!(layout.objects(), PathBuf::from("/work/repo/.git/objects"));
        assert_eq!(
            layout.tag("v1.0"),
            PathBuf::from("/work/repo/.git/refs/tags/v1.0")
        );
        assert_eq!(
            layout.packed_refs(),
            PathBuf::from("/work/repo/.git/packed-refs")
        );
    }

    #[test]
    fn test_custom_store_dir() {
        let layout = RepoLayout::new("repo", ".objstore");
        assert_eq!(layout.storage(), PathBuf::from("repo/.objstore"));
    }
}
