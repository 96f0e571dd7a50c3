//! Object identifiers, object types, and decoding of stored objects into payload text.

use std::{fmt, str::FromStr};

pub use git_internal::internal::object::types::ObjectType;
use serde::Serialize;

use crate::{
    internal::error::{GraphError, Result},
    utils::storage::Storage,
};

const SHA1_HEX_LEN: usize = 40;
const SHA256_HEX_LEN: usize = 64;

/// Hex identifier of one stored object, 40 chars for SHA-1 stores or 64 for SHA-256.
///
/// Kept as validated hex rather than `git_internal::hash::ObjectHash`: that type
/// parses against a process-wide hash kind, while ids here come from ref files
/// and object headers of whichever store is being read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fan-out directory name: the first two hex characters.
    pub fn fanout(&self) -> &str {
        &self.0[..2]
    }

    /// File name inside the fan-out directory.
    pub fn file_name(&self) -> &str {
        &self.0[2..]
    }

    /// For digests this crate computed itself, already lowercase hex.
    pub(crate) fn from_hex_unchecked(hex: String) -> Self {
        ObjectId(hex)
    }
}

impl FromStr for ObjectId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        let valid_len = s.len() == SHA1_HEX_LEN || s.len() == SHA256_HEX_LEN;
        if !valid_len || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GraphError::InvalidObjectId(s.to_string()));
        }
        Ok(ObjectId(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded content of one object. Lives only as long as the caller needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPayload {
    pub id: ObjectId,
    pub kind: ObjectType,
    pub text: String,
}

impl ObjectPayload {
    /// Fails with [`GraphError::UnexpectedObjectType`] unless the object has the given type.
    pub fn ensure_kind(self, expected: ObjectType) -> Result<Self> {
        if self.kind != expected {
            return Err(GraphError::UnexpectedObjectType {
                id: self.id.to_string(),
                expected,
                found: self.kind,
            });
        }
        Ok(self)
    }
}

/// Reads object `id` from `storage` and decodes its payload as UTF-8 text.
///
/// Decoding is all-or-nothing: a missing file is [`GraphError::ObjectNotFound`],
/// and a bad zlib stream, header or encoding is [`GraphError::ObjectCorrupt`].
pub fn decode<S: Storage + ?Sized>(storage: &S, id: &ObjectId) -> Result<ObjectPayload> {
    let (data, kind) = storage.get(id)?;
    let text = String::from_utf8(data).map_err(|e| GraphError::ObjectCorrupt {
        id: id.to_string(),
        reason: format!("payload is not valid UTF-8: {e}"),
    })?;
    tracing::trace!("decoded {} {} ({} bytes)", kind, id, text.len());
    Ok(ObjectPayload {
        id: id.clone(),
        kind,
        text,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::utils::storage::local::LocalStorage;

    #[test]
    fn test_object_id_validation() {
        let id: ObjectId = "ABCDEF0123456789abcdef0123456789abcdef01".parse().unwrap();
        assert_eq!(id.as_str(), "abcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(id.fanout(), "ab");
        assert_eq!(id.file_name(), "cdef0123456789abcdef0123456789abcdef01");

        assert!("a".repeat(64).parse::<ObjectId>().is_ok());
        assert!("abc".parse::<ObjectId>().is_err());
        assert!("g".repeat(40).parse::<ObjectId>().is_err());
        assert!(matches!(
            "".parse::<ObjectId>(),
            Err(GraphError::InvalidObjectId(_))
        ));
    }

    #[test]
    fn test_decode_commit_payload() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        let id = storage
            .put(b"tree 0\n\nhello", ObjectType::Commit)
            .unwrap();

        let payload = decode(&storage, &id).unwrap();
        assert_eq!(payload.kind, ObjectType::Commit);
        assert_eq!(payload.text, "tree 0\n\nhello");
        assert!(payload.ensure_kind(ObjectType::Commit).is_ok());
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        let id = storage.put(&[0xff, 0xfe, 0x00], ObjectType::Blob).unwrap();

        let err = decode(&storage, &id).unwrap_err();
        assert!(matches!(err, GraphError::ObjectCorrupt { .. }), "{err}");
    }

    #[test]
    fn test_ensure_kind_wrong_type() {
        let payload = ObjectPayload {
            id: "1".repeat(40).parse().unwrap(),
            kind: ObjectType::Tag,
            text: String::new(),
        };
        let err = payload.ensure_kind(ObjectType::Commit).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("object {} is a tag, expected a commit", "1".repeat(40))
        );
    }
}
