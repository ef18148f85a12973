//! Blueprint Store - in-memory repository of authored point blueprints

pub mod blueprints;
pub mod core;
