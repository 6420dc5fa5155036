//! Core traits defined in `sharegate-core` and implemented by other crates.

pub mod authorizer;

pub use authorizer::Authorizer;
