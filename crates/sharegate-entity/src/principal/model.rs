//! Principal references and directory summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

use sharegate_core::types::PrincipalId;

/// Kind of principal a share can be granted to.
///
/// Only `User` exists today; the tag is carried on the wire so that
/// group or team principals can be added without a format change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    /// An individual user account.
    #[default]
    User,
}

impl PrincipalKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference to a principal. Identity is `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalRef {
    /// Principal identifier.
    pub id: PrincipalId,
    /// Principal kind.
    #[serde(default)]
    pub kind: PrincipalKind,
}

impl PrincipalRef {
    /// Reference a user principal.
    pub fn user(id: impl Into<PrincipalId>) -> Self {
        Self {
            id: id.into(),
            kind: PrincipalKind::User,
        }
    }
}

/// Display metadata for a principal, as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSummary {
    /// Principal identifier.
    pub id: PrincipalId,
    /// Principal kind.
    #[serde(default, rename = "type")]
    pub kind: PrincipalKind,
    /// Display title.
    pub title: String,
    /// Optional avatar/icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PrincipalSummary {
    /// Create a user summary.
    pub fn user(id: impl Into<PrincipalId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: PrincipalKind::User,
            title: title.into(),
            icon: None,
        }
    }

    /// The reference identifying this principal.
    pub fn principal_ref(&self) -> PrincipalRef {
        PrincipalRef {
            id: self.id.clone(),
            kind: self.kind,
        }
    }
}
