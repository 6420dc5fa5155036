//! Resource domain entities.

pub mod model;

pub use model::{ResourceRef, resource_type};
