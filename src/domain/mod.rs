//! Domain layer types and invariants.

pub mod class_names;
pub mod entities;
pub mod types;
