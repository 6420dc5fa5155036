//! Coarse-grained sharing action definitions.

use serde::{Deserialize, Serialize};

/// Actions checked against the coarse-grained authorizer.
///
/// These are resource-type scoped: holding `SharingCreate` means the actor
/// may create shares on resources they already manage, not on any resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingAction {
    /// Create new shares.
    SharingCreate,
    /// Change or revoke existing shares.
    SharingUpdate,
    /// Read share lists.
    SharingSearch,
    /// Search the principal directory.
    PrincipalSearch,
    /// Resolve principal display labels.
    EntityLabelRead,
}

impl SharingAction {
    /// Return the action name understood by the authorizer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SharingCreate => "generic#sharing/create",
            Self::SharingUpdate => "generic#sharing/update",
            Self::SharingSearch => "generic#sharing/search",
            Self::PrincipalSearch => "generic#security:principal/search",
            Self::EntityLabelRead => "generic#entity:label/read",
        }
    }
}

impl std::fmt::Display for SharingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
