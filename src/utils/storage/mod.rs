//! Storage trait and the loose-object implementation for the object store.
pub mod local;

use crate::internal::{
    error::Result,
    object::{ObjectId, ObjectType},
};

/// Storage backend abstraction interface.
/// Reads are side-effect free; the store is treated as immutable while a walk runs.
pub trait Storage {
    /// Get object data by hash (decompressed, no header)
    /// Returns (Content, Type)
    fn get(&self, id: &ObjectId) -> Result<(Vec<u8>, ObjectType)>;

    /// Get the full inflated object, header included
    fn get_inflated(&self, id: &ObjectId) -> Result<Vec<u8>>;

    /// Put object data, returning the id it is stored under
    fn put(&self, data: &[u8], obj_type: ObjectType) -> Result<ObjectId>;

    /// Check if object exists
    fn exist(&self, id: &ObjectId) -> bool;
}
