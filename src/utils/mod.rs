//! Utilities module aggregator exposing storage, path, visualizer, and testing helpers.

pub mod path;
pub mod storage;
pub mod visualizer;
