//! Coarse-grained, action-keyed authorization.

pub mod authorizer;

pub use authorizer::StaticAuthorizer;
