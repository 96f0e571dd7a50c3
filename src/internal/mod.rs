//! Internal layer: object decoding, commit parsing, tag resolution, ancestry walks, segmentation, and diagram rendering.

pub mod commit;
pub mod config;
pub mod error;
pub mod graph;
pub mod object;
pub mod repository;
pub mod segment;
pub mod tag;
pub mod walk;
