//! Add-shares form submitted from the picker.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sharegate_core::error::AppError;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::principal::PrincipalSummary;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::Share;

use super::options::PermissionOptions;

/// Principals picked in the directory plus the level to grant them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AddSharesForm {
    /// Selected principals.
    #[validate(length(min = 1, message = "Select at least one principal"))]
    pub principals: Vec<PrincipalSummary>,
    /// Level granted to every selected principal.
    #[validate(required(message = "Select a permission level"))]
    pub permission: Option<PermissionLevel>,
}

impl AddSharesForm {
    pub fn new(principals: Vec<PrincipalSummary>, permission: PermissionLevel) -> Self {
        Self {
            principals,
            permission: Some(permission),
        }
    }

    /// Validates the form and builds one direct share per principal.
    pub fn into_shares(
        self,
        resource: &ResourceRef,
        options: &PermissionOptions,
    ) -> Result<Vec<Share>, AppError> {
        self.validate()?;
        let level = self
            .permission
            .ok_or_else(|| AppError::validation("Select a permission level"))?;
        options.ensure(level)?;

        Ok(self
            .principals
            .iter()
            .map(|p| Share::direct(p.principal_ref(), resource.clone(), level))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_core::error::ErrorKind;

    fn doc() -> ResourceRef {
        ResourceRef::new("document", "doc-1").with_path("/reports/")
    }

    #[test]
    fn test_requires_principal_and_level() {
        let empty = AddSharesForm::new(Vec::new(), PermissionLevel::View);
        let err = empty.into_shares(&doc(), &PermissionOptions::default()).unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let no_level = AddSharesForm {
            principals: vec![PrincipalSummary::user("bob", "Bob")],
            permission: None,
        };
        let err = no_level.into_shares(&doc(), &PermissionOptions::default()).unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_builds_direct_shares() {
        let form = AddSharesForm::new(
            vec![PrincipalSummary::user("bob", "Bob"), PrincipalSummary::user("dan", "Dan")],
            PermissionLevel::Edit,
        );
        let shares = form.into_shares(&doc(), &PermissionOptions::default()).unwrap();
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| !s.is_inherited()));
        assert_eq!(shares[1].principal_id().as_str(), "dan");
        assert_eq!(shares[0].resource.path.as_deref(), Some("/reports/"));
    }

    #[test]
    fn test_rejects_unselectable_level() {
        let form = AddSharesForm::new(vec![PrincipalSummary::user("bob", "Bob")], PermissionLevel::All);
        assert!(form.into_shares(&doc(), &PermissionOptions::default()).is_err());
    }
}
