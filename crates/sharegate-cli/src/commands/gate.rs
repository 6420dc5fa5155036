//! Share-management gate command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::input::read_json;
use crate::output::{self, OutputFormat};
use sharegate_auth::acl::checker::level_of;
use sharegate_auth::{AuthorizationGate, CapabilityFlags, GateDecision, StaticAuthorizer};
use sharegate_core::config::AppConfig;
use sharegate_core::error::AppError;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::PermissionLevel;
use sharegate_entity::share::Share;

/// Arguments for the gate command
#[derive(Debug, Args)]
pub struct GateArgs {
    /// JSON array of the resource's shares
    #[arg(long)]
    pub shares: PathBuf,
    /// Resource owner ID
    #[arg(long)]
    pub owner: Option<String>,
    /// Current actor ID
    #[arg(long)]
    pub editor: Option<String>,
    /// Grant the create-shares capability instead of reading it from config
    #[arg(long)]
    pub can_create: bool,
    /// Grant the update-shares capability instead of reading it from config
    #[arg(long)]
    pub can_update: bool,
}

#[derive(Debug, Serialize)]
struct GateReport {
    editor_level: PermissionLevel,
    flags: CapabilityFlags,
    #[serde(flatten)]
    decision: GateDecision,
}

/// Capability flags from the command line when any is given, otherwise
/// from the configured grants.
fn resolve_flags(args: &GateArgs, config: &AppConfig) -> CapabilityFlags {
    if args.can_create || args.can_update {
        CapabilityFlags {
            can_create_shares: args.can_create,
            can_update_shares: args.can_update,
        }
    } else {
        CapabilityFlags::resolve(&StaticAuthorizer::from_config(&config.authorization))
    }
}

/// Execute the gate command
pub async fn execute(args: &GateArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let shares: Vec<Share> = read_json(&args.shares).await?;
    let owner = args.owner.as_deref().map(PrincipalId::new);
    let editor = args.editor.as_deref().map(PrincipalId::new);

    let flags = resolve_flags(args, config);
    let decision = AuthorizationGate::new(flags).evaluate(owner.as_ref(), editor.as_ref(), &shares);
    let report = GateReport {
        editor_level: level_of(editor.as_ref(), &shares),
        flags,
        decision,
    };

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_heading("Share gate");
            output::print_kv("Editor level", report.editor_level);
            output::print_kv("Authority", format!("{:?}", report.decision.authority));
            output::print_kv("Has share permission", report.decision.has_share_permission);
            output::print_kv("Can create", report.decision.can_create);
            output::print_kv("Can edit", report.decision.can_edit);
        }
    }
    Ok(())
}
