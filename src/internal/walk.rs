//! First-parent ancestry walk from a commit back to an exclusive boundary or the history root.

use std::collections::HashSet;

use crate::{
    internal::{
        commit::{CommitRecord, ParsedCommit},
        error::{GraphError, Result},
        object::{self, ObjectId, ObjectType},
    },
    utils::storage::Storage,
};

/// Collects the commits from `start` back to `boundary` (exclusive), oldest first.
///
/// Without a boundary, or when the boundary is not on the first-parent
/// chain, the walk runs to the root commit. `start == boundary` gives an
/// empty list. Any decode or parse failure aborts the walk.
pub fn walk<S: Storage + ?Sized>(
    storage: &S,
    start: &ObjectId,
    boundary: Option<&ObjectId>,
) -> Result<Vec<CommitRecord>> {
    let mut commits = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = Some(start.clone());

    while let Some(id) = cursor.take() {
        if boundary == Some(&id) {
            break;
        }
        if !visited.insert(id.clone()) {
            return Err(GraphError::AncestryCycleDetected(id.to_string()));
        }

        let payload = object::decode(storage, &id)?.ensure_kind(ObjectType::Commit)?;
        let parsed =
            ParsedCommit::parse(&payload.text).map_err(|source| GraphError::MalformedCommit {
                id: id.to_string(),
                source,
            })?;
        cursor = parsed.first_parent().cloned();
        if cursor.is_none()
            && let Some(boundary) = boundary
        {
            tracing::warn!(
                "reached root commit {} without meeting boundary {}; {} is not an ancestor of {}",
                id,
                boundary,
                boundary,
                start
            );
        }
        commits.push(CommitRecord::new(id, parsed));
    }

    commits.reverse();
    tracing::debug!("walked {} commits from {}", commits.len(), start);
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::utils::{storage::local::LocalStorage, test::RepoFixture};

    fn ids(commits: &[CommitRecord]) -> Vec<ObjectId> {
        commits.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_walk_to_root() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit(None, "first");
        let c2 = fixture.commit(Some(&c1), "second");
        let c3 = fixture.commit(Some(&c2), "third");

        let commits = walk(fixture.storage(), &c3, None).unwrap();
        assert_eq!(ids(&commits), vec![c1, c2, c3]);
        assert_eq!(commits[0].message, "first");
        assert_eq!(commits[2].message, "third");
    }

    #[test]
    fn test_walk_stops_before_boundary() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit(None, "first");
        let c2 = fixture.commit(Some(&c1), "second");
        let c3 = fixture.commit(Some(&c2), "third");
        let c4 = fixture.commit(Some(&c3), "fourth");

        let commits = walk(fixture.storage(), &c4, Some(&c2)).unwrap();
        assert_eq!(ids(&commits), vec![c3, c4]);
    }

    #[test]
    fn test_walk_start_is_boundary() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit(None, "first");

        assert!(walk(fixture.storage(), &c1, Some(&c1)).unwrap().is_empty());
    }

    #[test]
    fn test_walk_follows_first_parent_only() {
        let fixture = RepoFixture::new();
        let base = fixture.commit(None, "base");
        let mainline = fixture.commit(Some(&base), "mainline");
        let side = fixture.commit(Some(&base), "side");
        let merge = fixture.commit_with_parents(&[&mainline, &side], "merge");

        let commits = walk(fixture.storage(), &merge, None).unwrap();
        assert_eq!(ids(&commits), vec![base, mainline, merge]);
    }

    #[test]
    fn test_walk_unreached_boundary_runs_to_root() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit(None, "first");
        let c2 = fixture.commit(Some(&c1), "second");
        let other = fixture.commit(None, "unrelated");

        let commits = walk(fixture.storage(), &c2, Some(&other)).unwrap();
        assert_eq!(ids(&commits), vec![c1, c2]);
    }

    #[test]
    fn test_walk_missing_parent() {
        let fixture = RepoFixture::new();
        let missing: ObjectId = "de".repeat(20).parse().unwrap();
        let orphan = fixture.commit(Some(&missing), "orphan");

        let err = walk(fixture.storage(), &orphan, None).unwrap_err();
        assert!(matches!(err, GraphError::ObjectNotFound(id) if id == missing.to_string()));
    }

    #[test]
    fn test_walk_rejects_non_commit() {
        let fixture = RepoFixture::new();
        let blob = fixture
            .storage()
            .put(b"just data", ObjectType::Blob)
            .unwrap();

        assert!(matches!(
            walk(fixture.storage(), &blob, None),
            Err(GraphError::UnexpectedObjectType { .. })
        ));
    }

    #[test]
    fn test_walk_malformed_commit_names_object() {
        let fixture = RepoFixture::new();
        let bad = fixture
            .storage()
            .put(b"author A <a@b.c> 1 +0000\nno separator", ObjectType::Commit)
            .unwrap();

        match walk(fixture.storage(), &bad, None) {
            Err(GraphError::MalformedCommit { id, .. }) => assert_eq!(id, bad.to_string()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_walk_detects_cycle() {
        // Two commit files that name each other as parent. Content hashes cannot
        // form a cycle, so write them under hand-picked ids.
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        let a: ObjectId = "aa".repeat(20).parse().unwrap();
        let b: ObjectId = "bb".repeat(20).parse().unwrap();
        for (id, parent) in [(&a, &b), (&b, &a)] {
            let body = format!("parent {parent}\nauthor A <a@b.c> 1 +0000\n\nloop\n");
            let full = format!("commit {}\0{}", body.len(), body);
            let path = storage.get_obj_path(id);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, LocalStorage::compress_zlib(full.as_bytes()).unwrap()).unwrap();
        }

        assert!(matches!(
            walk(&storage, &a, None),
            Err(GraphError::AncestryCycleDetected(id)) if id == a.to_string()
        ));
    }
}
