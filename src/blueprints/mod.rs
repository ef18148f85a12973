//! Blueprint storage
//!
//! This module holds the blueprint data model, the `BlueprintPersistence`
//! seam handlers depend on, and the in-memory store that implements it.

pub mod persistence;
pub mod registry;
pub mod schema;
pub mod seed;

pub use persistence::BlueprintPersistence;
pub use registry::InMemoryBlueprintStore;
pub use schema::*;
pub use seed::default_seed;
