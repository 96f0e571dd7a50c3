//! Error types for reading the object store and segmenting history by tag.

use std::io;

use thiserror::Error;

use git_internal::internal::object::types::ObjectType;

/// Errors raised while decoding objects, resolving tags or walking ancestry.
///
/// Every variant names the object or tag that caused it, so callers can
/// report precisely without extra bookkeeping.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("object {id} is corrupt: {reason}")]
    ObjectCorrupt { id: String, reason: String },

    #[error("commit {id} is malformed: {source}")]
    MalformedCommit {
        id: String,
        #[source]
        source: MalformedCommit,
    },

    #[error("tag '{0}' not found")]
    TagNotFound(String),

    #[error("ancestry cycle detected at commit {0}")]
    AncestryCycleDetected(String),

    #[error("invalid object id '{0}'")]
    InvalidObjectId(String),

    #[error("object {id} is a {found}, expected a {expected}")]
    UnexpectedObjectType {
        id: String,
        expected: ObjectType,
        found: ObjectType,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Why a commit payload could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCommit {
    #[error("missing author line")]
    MissingAuthor,

    #[error("author line '{0}' lacks timestamp and timezone")]
    InvalidAuthor(String),

    #[error("missing blank line between headers and message")]
    MissingSeparator,

    #[error("invalid parent id '{0}'")]
    InvalidParent(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_offender() {
        let err = GraphError::MalformedCommit {
            id: "ab".repeat(20),
            source: MalformedCommit::MissingSeparator,
        };
        assert_eq!(
            err.to_string(),
            format!(
                "commit {} is malformed: missing blank line between headers and message",
                "ab".repeat(20)
            )
        );

        let err = GraphError::TagNotFound("v1.0".into());
        assert_eq!(err.to_string(), "tag 'v1.0' not found");
    }
}
