//! Share panel rendering command.
//!
//! Loads the shares file into the in-memory backend, runs the batch loader
//! and opens a session exactly as an interactive client would, then prints
//! the resulting panel.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::input::read_json;
use crate::output::{self, OutputFormat};
use sharegate_auth::{CapabilityFlags, StaticAuthorizer};
use sharegate_core::config::AppConfig;
use sharegate_core::error::AppError;
use sharegate_core::traits::Authorizer;
use sharegate_core::types::PrincipalId;
use sharegate_entity::permission::SharingAction;
use sharegate_entity::principal::PrincipalSummary;
use sharegate_entity::resource::ResourceRef;
use sharegate_entity::share::Share;
use sharegate_service::share::{RecordInput, ShareLoader, SharePanel, ShareSession, ShareTrigger};
use sharegate_service::{MemoryPrincipalDirectory, MemorySharesBackend};

/// Arguments for the panel command
#[derive(Debug, Args)]
pub struct PanelArgs {
    /// JSON array of the resource's shares; inherited rows are served from a
    /// synthetic parent resource
    #[arg(long)]
    pub shares: PathBuf,
    /// Resource type
    #[arg(long, default_value = "document")]
    pub resource_type: String,
    /// Resource ID
    #[arg(long)]
    pub resource_id: String,
    /// JSON array of principal summaries used for labels
    #[arg(long)]
    pub principals: Option<PathBuf>,
    /// Resource owner ID
    #[arg(long)]
    pub owner: Option<String>,
    /// Current actor ID
    #[arg(long)]
    pub editor: Option<String>,
    /// Grant every sharing action instead of reading grants from config
    #[arg(long)]
    pub allow_all: bool,
}

#[derive(Debug, Serialize)]
struct PanelReport {
    trigger: ShareTrigger,
    panel: SharePanel,
}

#[derive(Debug, Serialize, Tabled)]
struct PanelRowView {
    /// Row index
    index: usize,
    /// Principal
    principal: String,
    /// Level
    level: String,
    /// Inherited
    inherited: String,
    /// Can change level
    change: bool,
    /// Can delete
    delete: bool,
    /// Can revoke inherited
    revoke: bool,
}

/// Execute the panel command
pub async fn execute(args: &PanelArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let shares: Vec<Share> = read_json(&args.shares).await?;
    let resource = ResourceRef::new(args.resource_type.clone(), args.resource_id.clone());
    let owner = args.owner.as_deref().map(PrincipalId::new);
    let editor = args.editor.as_deref().map(PrincipalId::new);

    let backend = Arc::new(MemorySharesBackend::new());
    seed(&backend, &resource, &shares);

    let principals = match &args.principals {
        Some(path) => read_json(path).await?,
        None => placeholder_principals(&shares, owner.as_ref(), editor.as_ref()),
    };
    let directory = Arc::new(MemoryPrincipalDirectory::new(principals));

    let authorizer: Arc<dyn Authorizer> = if args.allow_all {
        Arc::new(StaticAuthorizer::allow_all())
    } else {
        Arc::new(StaticAuthorizer::from_config(&config.authorization))
    };
    let flags = CapabilityFlags::resolve(authorizer.as_ref());
    if !authorizer.has_auth(SharingAction::SharingSearch.as_str()) {
        tracing::warn!("Sharing search not granted, panel will show no shares");
    }

    let loader = ShareLoader::new(backend, directory, authorizer);
    let record = loader
        .load(vec![RecordInput::new(resource.clone(), owner)], editor.as_ref())
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found(format!("No record loaded for {resource}")))?;

    let session = ShareSession::new(record, flags, &config.sharing)?;
    let report = PanelReport {
        trigger: session.trigger(),
        panel: session.panel(),
    };

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => print_table(&report, format),
    }
    Ok(())
}

fn print_table(report: &PanelReport, format: OutputFormat) {
    let panel = &report.panel;
    output::print_heading(&format!("Share panel ({:?})", panel.mode));
    if let Some(owner) = &panel.owner {
        let you = if owner.is_you { " (you)" } else { "" };
        output::print_kv("Owner", format!("{}{}", owner.principal.title, you));
    }
    if let Some(editor) = &panel.editor {
        let level = editor.level.map(|l| l.to_string()).unwrap_or_default();
        let via = if editor.inherited { " (inherited)" } else { "" };
        output::print_kv("You", format!("{}: {}{}", editor.principal.title, level, via));
    }

    let rows: Vec<PanelRowView> = panel
        .rows
        .iter()
        .map(|row| PanelRowView {
            index: row.index,
            principal: row
                .label
                .as_ref()
                .map(|l| l.title.clone())
                .unwrap_or_else(|| row.principal.id.to_string()),
            level: row.level.to_string(),
            inherited: match (row.inherited, row.overridden) {
                (true, true) => "overridden".to_string(),
                (true, false) => "yes".to_string(),
                _ => String::new(),
            },
            change: row.can_change_level,
            delete: row.can_delete,
            revoke: row.can_revoke_inherited,
        })
        .collect();
    output::print_list(&rows, format);

    output::print_kv("Add button", panel.footer.show_add);
    output::print_kv("Cancel / OK", panel.footer.show_confirm);
    let trigger = match &report.trigger {
        ShareTrigger::Placeholder => "placeholder".to_string(),
        ShareTrigger::AddLink => "add link".to_string(),
        ShareTrigger::Avatars { shown, overflow } => format!("{} avatars, +{}", shown.len(), overflow),
    };
    output::print_kv("Trigger", trigger);
}

/// Direct rows go on the resource; inherited rows go on a parent so the
/// backend derives them the same way it would for a real hierarchy.
fn seed(backend: &MemorySharesBackend, resource: &ResourceRef, shares: &[Share]) {
    let parent = ResourceRef::new(resource.kind.clone(), format!("{}.parent", resource.id));
    if shares.iter().any(Share::is_inherited) {
        backend.set_parent(resource, &parent);
    }
    for share in shares {
        let target = if share.is_inherited() { &parent } else { resource };
        backend.grant(share.principal.clone(), target, share.permission);
    }
}

/// Labels equal to ids when no principals file is given.
fn placeholder_principals(
    shares: &[Share],
    owner: Option<&PrincipalId>,
    editor: Option<&PrincipalId>,
) -> Vec<PrincipalSummary> {
    let ids: BTreeSet<&PrincipalId> = shares
        .iter()
        .map(Share::principal_id)
        .chain(owner)
        .chain(editor)
        .collect();
    ids.into_iter()
        .map(|id| PrincipalSummary::user(id.clone(), id.as_str()))
        .collect()
}
