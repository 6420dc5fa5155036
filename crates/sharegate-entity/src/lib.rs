//! # sharegate-entity
//!
//! Domain entity models for ShareGate: permission levels, principal and
//! resource references, shares, and the wire shapes exchanged with the
//! shares API. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod permission;
pub mod principal;
pub mod resource;
pub mod share;

pub use permission::{PermissionLevel, SharingAction};
pub use principal::{PrincipalKind, PrincipalRef, PrincipalSummary};
pub use resource::ResourceRef;
pub use share::{CommitRequest, Share, ShareOrigin, ShareRevoke, ShareUpsert};
