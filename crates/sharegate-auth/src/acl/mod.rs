//! Share-list based authorization: the share-management gate and
//! record-level access helpers.

pub mod checker;
pub mod gate;

pub use checker::{RecordAccess, level_of};
pub use gate::{AuthorizationGate, CapabilityFlags, GateDecision, ShareAuthority};
