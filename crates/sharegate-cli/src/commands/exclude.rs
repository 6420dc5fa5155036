//! Picker exclusion command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::input::read_json;
use crate::output::{self, OutputFormat};
use sharegate_core::error::AppError;
use sharegate_core::types::PrincipalId;
use sharegate_entity::share::Share;
use sharegate_service::share::PrincipalExclusionResolver;

/// Arguments for the exclude command
#[derive(Debug, Args)]
pub struct ExcludeArgs {
    /// JSON array of the resource's shares
    #[arg(long)]
    pub shares: PathBuf,
    /// Resource owner ID
    #[arg(long)]
    pub owner: Option<String>,
    /// Current actor ID
    #[arg(long)]
    pub editor: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ExcludedRow {
    /// Principal ID
    principal_id: String,
    /// Why it is excluded
    reason: &'static str,
}

/// Execute the exclude command
pub async fn execute(args: &ExcludeArgs, format: OutputFormat) -> Result<(), AppError> {
    let shares: Vec<Share> = read_json(&args.shares).await?;
    let owner = args.owner.as_deref().map(PrincipalId::new);
    let editor = args.editor.as_deref().map(PrincipalId::new);

    let excluded = PrincipalExclusionResolver::resolve(&shares, owner.as_ref(), editor.as_ref());
    let rows: Vec<ExcludedRow> = excluded
        .into_iter()
        .map(|id| {
            let reason = if Some(&id) == owner.as_ref() {
                "owner"
            } else if Some(&id) == editor.as_ref() {
                "editor"
            } else {
                "listed"
            };
            ExcludedRow {
                principal_id: id.into_inner(),
                reason,
            }
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
