//! Reads a repository's loose object store, splits its history into per-tag
//! commit segments, and renders them as a PlantUML diagram.
//!
//! ```no_run
//! use tag_graph::internal::{graph, repository::Repository};
//!
//! let repo = Repository::open("/path/to/repo", ".git");
//! let segments = repo.segment(&["v1.0", "v1.1"], false)?;
//! println!("{}", graph::render(&segments));
//! # Ok::<(), tag_graph::internal::error::GraphError>(())
//! ```

pub mod cli;
pub mod command;
pub mod internal;
pub mod utils;
