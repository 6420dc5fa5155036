//! # sharegate-core
//!
//! Core crate for ShareGate. Contains the authorizer trait, configuration
//! schemas, typed identifiers, domain events, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other ShareGate crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
