//! Share domain entities.

pub mod model;
pub mod wire;

pub use model::{Share, ShareOrigin};
pub use wire::{CommitRequest, ShareRevoke, ShareUpsert};
