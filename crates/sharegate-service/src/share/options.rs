//! Permission levels offered in the level selector.

use serde::Serialize;

use sharegate_core::config::SharingConfig;
use sharegate_core::error::AppError;
use sharegate_entity::permission::PermissionLevel;

/// One entry of the level selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionOption {
    /// Level written when the option is picked.
    pub level: PermissionLevel,
    /// Label key shown to the user.
    pub label: &'static str,
}

/// Ordered, configured list of selectable levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionOptions(Vec<PermissionOption>);

impl PermissionOptions {
    /// Builds the options from `sharing.selectable_levels`.
    ///
    /// Entries keep the configured order. Repeated values are collapsed.
    pub fn from_config(config: &SharingConfig) -> Result<Self, AppError> {
        let mut options: Vec<PermissionOption> = Vec::with_capacity(config.selectable_levels.len());
        for value in &config.selectable_levels {
            let level = PermissionLevel::try_from(*value)?;
            if options.iter().all(|o| o.level != level) {
                options.push(PermissionOption {
                    level,
                    label: level.as_str(),
                });
            }
        }
        if options.is_empty() {
            return Err(AppError::configuration("No selectable permission levels configured"));
        }
        Ok(Self(options))
    }

    /// Whether `level` may be picked.
    pub fn contains(&self, level: PermissionLevel) -> bool {
        self.0.iter().any(|o| o.level == level)
    }

    /// Fails with a validation error unless `level` is selectable.
    pub fn ensure(&self, level: PermissionLevel) -> Result<(), AppError> {
        if self.contains(level) {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Permission level '{level}' is not selectable"
            )))
        }
    }

    /// Iterates the options in display order.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionOption> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PermissionOptions {
    fn default() -> Self {
        Self(
            [
                PermissionLevel::None,
                PermissionLevel::View,
                PermissionLevel::Comment,
                PermissionLevel::Edit,
                PermissionLevel::Share,
            ]
            .into_iter()
            .map(|level| PermissionOption {
                level,
                label: level.as_str(),
            })
            .collect(),
        )
    }
}
