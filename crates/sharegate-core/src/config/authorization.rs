//! Coarse-grained authorization configuration.

use serde::{Deserialize, Serialize};

/// Action grants for the static authorizer.
///
/// Grants are keyed by action name (e.g. `generic#sharing/create`), not by
/// resource instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// Action names granted to the current actor. `"*"` grants everything.
    #[serde(default)]
    pub granted_actions: Vec<String>,
}
