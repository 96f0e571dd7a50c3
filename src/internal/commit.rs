//! Commit payload parsing and the per-commit record carried through tag segments.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::internal::{error::MalformedCommit, object::ObjectId};

const AUTHOR_PREFIX: &str = "author ";
const PARENT_PREFIX: &str = "parent ";

/// Structured header fields and message of a commit payload.
///
/// All `parent` lines are kept in order. History walks follow only
/// [`ParsedCommit::first_parent`], so merge commits contribute their
/// mainline ancestry and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// `"<name> <email>"`, everything on the author line before the timestamp
    pub author: String,
    /// Seconds since the epoch, exactly as stored
    pub author_timestamp: String,
    pub author_timezone: String,
    pub parents: Vec<ObjectId>,
    pub message: String,
}

impl ParsedCommit {
    /// Parses `payload`: header lines, one blank line, then the message.
    ///
    /// Headers other than `author` and `parent` are skipped. Once the blank
    /// separator is seen every remaining line, blank or not, belongs to the
    /// message.
    pub fn parse(payload: &str) -> Result<Self, MalformedCommit> {
        let mut lines = payload.lines();
        let mut author = None;
        let mut parents = Vec::new();
        let mut separated = false;

        for line in lines.by_ref() {
            if line.is_empty() {
                separated = true;
                break;
            }
            if let Some(rest) = line.strip_prefix(AUTHOR_PREFIX) {
                if author.is_none() {
                    author = Some(parse_author(rest)?);
                }
            } else if let Some(rest) = line.strip_prefix(PARENT_PREFIX) {
                let parent = rest
                    .trim()
                    .parse::<ObjectId>()
                    .map_err(|_| MalformedCommit::InvalidParent(rest.to_string()))?;
                parents.push(parent);
            }
        }

        if !separated {
            return Err(MalformedCommit::MissingSeparator);
        }
        let (author, author_timestamp, author_timezone) =
            author.ok_or(MalformedCommit::MissingAuthor)?;

        Ok(ParsedCommit {
            author,
            author_timestamp,
            author_timezone,
            parents,
            message: lines.collect::<Vec<_>>().join("\n"),
        })
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Writes the fields back in commit header/body form.
    pub fn to_payload(&self) -> String {
        let mut payload = String::new();
        for parent in &self.parents {
            payload.push_str(&format!("{PARENT_PREFIX}{parent}\n"));
        }
        payload.push_str(&format!(
            "{AUTHOR_PREFIX}{} {} {}\n\n",
            self.author, self.author_timestamp, self.author_timezone
        ));
        if !self.message.is_empty() {
            payload.push_str(&self.message);
            payload.push('\n');
        }
        payload
    }
}

/// Shorthand for [`ParsedCommit::parse`].
pub fn parse_commit(payload: &str) -> Result<ParsedCommit, MalformedCommit> {
    ParsedCommit::parse(payload)
}

/// Splits `"<name> <email> <timestamp> <tz>"` at its last two spaces.
fn parse_author(rest: &str) -> Result<(String, String, String), MalformedCommit> {
    let mut parts = rest.trim_end().rsplitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(tz), Some(timestamp), Some(name)) if !tz.is_empty() && !timestamp.is_empty() => {
            Ok((name.trim_end().to_string(), timestamp.to_string(), tz.to_string()))
        }
        _ => Err(MalformedCommit::InvalidAuthor(rest.to_string())),
    }
}

/// One commit as it appears in a tag segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub id: ObjectId,
    pub author_timestamp: String,
    pub author: String,
    pub message: String,
}

impl CommitRecord {
    pub fn new(id: ObjectId, commit: ParsedCommit) -> Self {
        CommitRecord {
            id,
            author_timestamp: commit.author_timestamp,
            author: commit.author,
            message: commit.message,
        }
    }

    /// The raw timestamp as a UTC time, if it is a valid epoch value.
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.author_timestamp.parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: &str = "e1c2a9f0d9b5a0f1e3c4b5a6d7e8f9a0b1c2d3e4";
    const SECOND_PARENT: &str = "0123456789abcdef0123456789abcdef01234567";

    fn sample_payload() -> String {
        format!(
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             parent {PARENT}\n\
             parent {SECOND_PARENT}\n\
             author Jane Doe <jane@example.com> 1700000000 +0200\n\
             committer Jane Doe <jane@example.com> 1700000100 +0200\n\
             \n\
             Add tag graph\n\
             \n\
             author lines in the body are message text\n"
        )
    }

    #[test]
    fn test_parse_commit_fields() {
        let commit = parse_commit(&sample_payload()).unwrap();
        assert_eq!(commit.author, "Jane Doe <jane@example.com>");
        assert_eq!(commit.author_timestamp, "1700000000");
        assert_eq!(commit.author_timezone, "+0200");
        assert_eq!(commit.parents.len(), 2);
        assert_eq!(commit.first_parent().unwrap().as_str(), PARENT);
        assert_eq!(
            commit.message,
            "Add tag graph\n\nauthor lines in the body are message text"
        );
    }

    #[test]
    fn test_parse_root_commit() {
        let commit =
            parse_commit("tree abc\nauthor A <a@b.c> 1 +0000\ncommitter A <a@b.c> 1 +0000\n\ninit\n")
                .unwrap();
        assert!(commit.first_parent().is_none());
        assert_eq!(commit.message, "init");
    }

    #[test]
    fn test_parse_skips_signature_continuation_lines() {
        let payload = "tree abc\n\
                       author A <a@b.c> 5 +0000\n\
                       gpgsig -----BEGIN PGP SIGNATURE-----\n \n iQEz\n -----END PGP SIGNATURE-----\n\
                       \n\
                       signed\n";
        let commit = parse_commit(payload).unwrap();
        assert_eq!(commit.message, "signed");
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse_commit("tree abc\nauthor A <a@b.c> 1 +0000\n"),
            Err(MalformedCommit::MissingSeparator)
        );
    }

    #[test]
    fn test_missing_author() {
        assert_eq!(
            parse_commit("tree abc\ncommitter A <a@b.c> 1 +0000\n\nmsg\n"),
            Err(MalformedCommit::MissingAuthor)
        );
    }

    #[test]
    fn test_invalid_author_and_parent() {
        assert!(matches!(
            parse_commit("author nobody\n\nmsg"),
            Err(MalformedCommit::InvalidAuthor(_))
        ));
        assert!(matches!(
            parse_commit("parent xyz\nauthor A <a@b.c> 1 +0000\n\nmsg"),
            Err(MalformedCommit::InvalidParent(_))
        ));
    }

    #[test]
    fn test_reparse_serialized_payload() {
        let commit = parse_commit(&sample_payload()).unwrap();
        assert_eq!(parse_commit(&commit.to_payload()).unwrap(), commit);

        let empty = ParsedCommit {
            message: String::new(),
            parents: vec![],
            ..commit
        };
        assert_eq!(parse_commit(&empty.to_payload()).unwrap(), empty);
    }

    #[test]
    fn test_record_timestamp() {
        let id: ObjectId = PARENT.parse().unwrap();
        let record = CommitRecord::new(id, parse_commit(&sample_payload()).unwrap());
        assert_eq!(record.author_timestamp, "1700000000");
        assert_eq!(
            record.authored_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );

        let garbled = CommitRecord {
            author_timestamp: "yesterday".into(),
            ..record
        };
        assert!(garbled.authored_at().is_none());
    }
}
