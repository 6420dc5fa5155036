//! Share editing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Raw values of the permission level set, in ascending order.
///
/// Kept here as plain integers so configuration can be validated without
/// depending on the entity crate.
pub const PERMISSION_LEVEL_VALUES: [u8; 6] = [0, 1, 2, 4, 8, 16];

/// Share editing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Levels offered in the change-level menu and the add form.
    #[serde(default = "default_selectable_levels")]
    pub selectable_levels: Vec<u8>,
    /// Maximum number of avatars rendered on the share trigger.
    #[serde(default = "default_avatar_limit")]
    pub avatar_limit: usize,
    /// Reject additions for principals already present in the draft.
    #[serde(default = "default_true")]
    pub reject_duplicates: bool,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            selectable_levels: default_selectable_levels(),
            avatar_limit: default_avatar_limit(),
            reject_duplicates: default_true(),
        }
    }
}

impl SharingConfig {
    /// Every selectable level must be a member of the permission level set.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.selectable_levels.is_empty() {
            return Err(AppError::configuration(
                "sharing.selectable_levels must not be empty",
            ));
        }
        if let Some(bad) = self
            .selectable_levels
            .iter()
            .find(|v| !PERMISSION_LEVEL_VALUES.contains(v))
        {
            return Err(AppError::configuration(format!(
                "sharing.selectable_levels contains {bad}, which is not a permission level"
            )));
        }
        if self.avatar_limit == 0 {
            return Err(AppError::configuration(
                "sharing.avatar_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_selectable_levels() -> Vec<u8> {
    vec![0, 1, 2, 4, 8]
}

fn default_avatar_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_member_level() {
        let config = SharingConfig {
            selectable_levels: vec![1, 3],
            ..SharingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains('3'));
    }

    #[test]
    fn test_rejects_empty_levels() {
        let config = SharingConfig {
            selectable_levels: Vec::new(),
            ..SharingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
