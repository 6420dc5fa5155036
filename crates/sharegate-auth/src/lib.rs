//! # sharegate-auth
//!
//! Authorization for ShareGate.
//!
//! ## Modules
//!
//! - `acl`: share-management gate and record-level access helpers derived
//!   from ownership and the actor's own share entry
//! - `rbac`: coarse-grained, action-keyed authorizer

pub mod acl;
pub mod rbac;

pub use acl::{AuthorizationGate, CapabilityFlags, GateDecision, RecordAccess, ShareAuthority};
pub use rbac::StaticAuthorizer;
