//! Share permission levels.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sharegate_core::AppError;

/// Permission level held by a single share.
///
/// Ordered by privilege: `None < View < Comment < Edit < Share < All`.
///
/// The wire values are spaced as powers of two, but a share always holds
/// exactly one level and levels are compared by numeric order. They are
/// **not** bit flags: `Edit` does not contain `View`, and no operation in
/// this crate ORs levels together.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PermissionLevel {
    /// No access.
    #[default]
    None = 0,
    /// Read-only access.
    View = 1,
    /// Can add comments but not modify.
    Comment = 2,
    /// Can edit content and metadata.
    Edit = 4,
    /// Can manage the share list.
    Share = 8,
    /// Full control.
    All = 16,
}

impl PermissionLevel {
    /// Every level, in ascending order.
    pub const ALL_LEVELS: [PermissionLevel; 6] = [
        Self::None,
        Self::View,
        Self::Comment,
        Self::Edit,
        Self::Share,
        Self::All,
    ];

    /// Return the wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Numeric ordering of two levels.
    pub fn compare(self, other: PermissionLevel) -> Ordering {
        self.as_u8().cmp(&other.as_u8())
    }

    /// Check if this level is at least `threshold`.
    pub fn at_least(self, threshold: PermissionLevel) -> bool {
        self.compare(threshold) != Ordering::Less
    }

    /// Whether this level grants the "manage shares" capability.
    pub fn can_manage_shares(self) -> bool {
        self.at_least(Self::Share)
    }

    /// Return the label key of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::View => "view",
            Self::Comment => "comment",
            Self::Edit => "edit",
            Self::Share => "share",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PermissionLevel> for u8 {
    fn from(level: PermissionLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL_LEVELS
            .into_iter()
            .find(|level| level.as_u8() == value)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid permission level: {value}. Expected one of: 0, 1, 2, 4, 8, 16"
                ))
            })
    }
}

impl FromStr for PermissionLevel {
    type Err = AppError;

    /// Accepts either the label (`"edit"`) or the wire value (`"4"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.trim().parse::<u8>() {
            return Self::try_from(value);
        }
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "view" => Ok(Self::View),
            "comment" => Ok(Self::Comment),
            "edit" => Ok(Self::Edit),
            "share" => Ok(Self::Share),
            "all" => Ok(Self::All),
            _ => Err(AppError::validation(format!(
                "Invalid permission level: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_wire_values() {
        for pair in PermissionLevel::ALL_LEVELS.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].as_u8() < pair[1].as_u8());
            assert_eq!(pair[0].compare(pair[1]), Ordering::Less);
        }
        assert_eq!(
            PermissionLevel::Edit.compare(PermissionLevel::Edit),
            Ordering::Equal
        );
    }

    #[test]
    fn test_manage_shares_threshold() {
        let managing: Vec<_> = PermissionLevel::ALL_LEVELS
            .into_iter()
            .filter(|l| l.at_least(PermissionLevel::Share))
            .collect();
        assert_eq!(managing, vec![PermissionLevel::Share, PermissionLevel::All]);
        assert!(!PermissionLevel::Edit.can_manage_shares());
    }

    #[test]
    fn test_wire_value_is_not_a_bitmask() {
        // 5 would be VIEW|EDIT under bitmask reading; it is not a level.
        assert!(PermissionLevel::try_from(5).is_err());
        assert!(serde_json::from_str::<PermissionLevel>("12").is_err());
        assert_eq!(
            serde_json::from_str::<PermissionLevel>("8").unwrap(),
            PermissionLevel::Share
        );
        assert_eq!(serde_json::to_string(&PermissionLevel::All).unwrap(), "16");
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(PermissionLevel::default(), PermissionLevel::None);
        assert_eq!(PermissionLevel::default().as_u8(), 0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("EDIT".parse::<PermissionLevel>().unwrap(), PermissionLevel::Edit);
        assert_eq!("2".parse::<PermissionLevel>().unwrap(), PermissionLevel::Comment);
        assert!("owner".parse::<PermissionLevel>().is_err());
        assert!("3".parse::<PermissionLevel>().is_err());
    }
}
