//! Reconciliation plan command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::input::read_json;
use crate::output::{self, OutputFormat};
use sharegate_core::error::AppError;
use sharegate_entity::share::Share;
use sharegate_service::share::{ReconciliationEngine, ReconciliationResult};

/// Arguments for the plan command
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// JSON array of shares as last fetched
    #[arg(long)]
    pub baseline: PathBuf,
    /// JSON array of shares after editing
    #[arg(long)]
    pub working: PathBuf,
}

/// One planned write
#[derive(Debug, Serialize, Tabled)]
struct PlanRow {
    /// upsert or revoke
    action: &'static str,
    /// Resource
    resource: String,
    /// Principal ID
    principal: String,
    /// Permission level
    permission: String,
    /// Backend share ID
    share_id: String,
}

fn rows(result: &ReconciliationResult) -> Vec<PlanRow> {
    let row = |action, share: &Share| PlanRow {
        action,
        resource: share.resource.to_string(),
        principal: share.principal_id().to_string(),
        permission: format!("{} ({})", share.permission, share.permission.as_u8()),
        share_id: share.id.as_ref().map(ToString::to_string).unwrap_or_default(),
    };
    result
        .upserts
        .iter()
        .map(|s| row("upsert", s))
        .chain(result.revokes.iter().map(|s| row("revoke", s)))
        .collect()
}

/// Execute the plan command
pub async fn execute(args: &PlanArgs, format: OutputFormat) -> Result<(), AppError> {
    let baseline: Vec<Share> = read_json(&args.baseline).await?;
    let working: Vec<Share> = read_json(&args.working).await?;

    let result = ReconciliationEngine::reconcile(&baseline, &working);
    if result.is_noop() && format == OutputFormat::Table {
        output::print_success("No changes, nothing to commit");
        return Ok(());
    }

    match format {
        OutputFormat::Table => output::print_list(&rows(&result), format),
        OutputFormat::Json => output::print_item(&result, format),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharegate_entity::permission::PermissionLevel;
    use sharegate_entity::principal::PrincipalRef;
    use sharegate_entity::resource::ResourceRef;

    #[test]
    fn test_rows_list_upserts_then_revokes() {
        let resource = ResourceRef::new("document", "doc-1");
        let alice = Share::direct(PrincipalRef::user("alice"), resource.clone(), PermissionLevel::View)
            .with_id("sh-1");
        let bob = Share::direct(PrincipalRef::user("bob"), resource, PermissionLevel::Edit);

        let result = ReconciliationEngine::reconcile(&[alice], &[bob]);
        let rows = rows(&result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].action, "upsert");
        assert_eq!(rows[0].permission, "edit (4)");
        assert_eq!(rows[1].action, "revoke");
        assert_eq!(rows[1].share_id, "sh-1");
        assert_eq!(rows[1].resource, "document:doc-1");
    }
}
