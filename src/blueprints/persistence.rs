//! Storage seam for blueprints.
//!
//! Handlers depend on this trait rather than on a concrete store, so callers
//! can construct one store instance and share it (typically as
//! `Arc<dyn BlueprintPersistence>`), and tests can build a fresh one each.

use ahash::AHashSet;

use super::schema::Blueprint;
use crate::core::error::Result;

pub trait BlueprintPersistence: Send + Sync {
    /// Insert a blueprint whose `(author, name)` is not yet taken.
    ///
    /// Fails with `StoreError::AlreadyExists` on a collision; the stored
    /// record is never overwritten.
    fn save(&self, blueprint: Blueprint) -> Result<()>;

    /// Fetch one blueprint, or `StoreError::BlueprintNotFound`
    fn get(&self, author: &str, name: &str) -> Result<Blueprint>;

    /// Snapshot of every stored blueprint, in no particular order
    fn get_all(&self) -> AHashSet<Blueprint>;

    /// Every blueprint by `author`, or `StoreError::AuthorNotFound` if none
    fn get_by_author(&self, author: &str) -> Result<AHashSet<Blueprint>>;
}
