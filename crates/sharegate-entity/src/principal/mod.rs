//! Principal domain entities.

pub mod model;

pub use model::{PrincipalKind, PrincipalRef, PrincipalSummary};
