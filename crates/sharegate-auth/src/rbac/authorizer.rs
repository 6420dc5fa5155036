//! Configuration-backed coarse-grained authorizer.

use std::collections::HashSet;

use sharegate_core::config::authorization::AuthorizationConfig;
use sharegate_core::error::AppError;
use sharegate_core::traits::Authorizer;
use sharegate_entity::permission::SharingAction;

/// Wildcard grant matching every action.
pub const WILDCARD: &str = "*";

/// Grants a fixed set of action names.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthorizer {
    /// Granted action names.
    granted: HashSet<String>,
}

impl StaticAuthorizer {
    /// Creates an authorizer granting exactly `actions`.
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an authorizer from configuration.
    pub fn from_config(config: &AuthorizationConfig) -> Self {
        Self::new(config.granted_actions.iter().cloned())
    }

    /// Grants every action.
    pub fn allow_all() -> Self {
        Self::new([WILDCARD])
    }

    /// Grants the given sharing actions.
    pub fn with_actions(actions: &[SharingAction]) -> Self {
        Self::new(actions.iter().map(|a| a.as_str()))
    }

    /// Returns `Ok(())` if the action is granted, or an authorization error.
    pub fn require(&self, action: SharingAction) -> Result<(), AppError> {
        if self.has_auth(action.as_str()) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Action '{action}' is not granted"
            )))
        }
    }
}

impl Authorizer for StaticAuthorizer {
    fn has_auth(&self, action: &str) -> bool {
        self.granted.contains(WILDCARD) || self.granted.contains(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_grants() {
        let auth = StaticAuthorizer::with_actions(&[SharingAction::SharingCreate]);
        assert!(auth.has_auth("generic#sharing/create"));
        assert!(!auth.has_auth("generic#sharing/update"));
        assert!(auth.require(SharingAction::SharingUpdate).is_err());
    }

    #[test]
    fn test_wildcard_and_config() {
        assert!(StaticAuthorizer::allow_all().has_auth("generic#entity:label/read"));

        let config = AuthorizationConfig {
            granted_actions: vec!["generic#sharing/search".to_string()],
        };
        let auth = StaticAuthorizer::from_config(&config);
        assert!(auth.require(SharingAction::SharingSearch).is_ok());
        assert!(!StaticAuthorizer::default().has_auth("generic#sharing/search"));
    }
}
