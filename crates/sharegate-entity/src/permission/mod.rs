//! Permission levels and sharing actions.

pub mod action;
pub mod level;

pub use action::SharingAction;
pub use level::PermissionLevel;
