//! Share-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to share reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShareEvent {
    /// A principal was granted (or re-granted) a level on a resource.
    Upserted {
        /// The resource type (document, datasource, ...).
        resource_type: String,
        /// The resource ID.
        resource_id: String,
        /// The principal receiving the grant.
        principal_id: String,
        /// Raw permission level value.
        permission: u8,
    },
    /// A principal's direct grant was revoked.
    Revoked {
        /// The resource type.
        resource_type: String,
        /// The resource ID.
        resource_id: String,
        /// The principal losing the grant.
        principal_id: String,
        /// Last known raw permission level, for audit.
        permission: u8,
    },
    /// A commit batch was applied.
    Committed {
        /// The resource type.
        resource_type: String,
        /// The resource ID.
        resource_id: String,
        /// Number of upserts in the batch.
        upserts: usize,
        /// Number of revokes in the batch.
        revokes: usize,
    },
}
