//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use sharegate_core::config::AppConfig;
use sharegate_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged configuration
    Show,
    /// Validate the merged configuration
    Validate,
}

/// Execute config commands
///
/// The configuration was loaded (and validated) before dispatch, so
/// `validate` only re-runs the checks and summarizes what was loaded.
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(config, format),
        ConfigCommand::Validate => {
            if let Err(e) = config.validate() {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv("Selectable levels", format!("{:?}", config.sharing.selectable_levels));
            output::print_kv("Avatar limit", config.sharing.avatar_limit);
            output::print_kv("Reject duplicates", config.sharing.reject_duplicates);
            output::print_kv("Directory page size", config.directory.page_size);
            output::print_kv("Directory sort", &config.directory.default_sort);
            output::print_kv(
                "Granted actions",
                config.authorization.granted_actions.join(", "),
            );
            output::print_kv("Log level", &config.logging.level);
        }
    }

    Ok(())
}
