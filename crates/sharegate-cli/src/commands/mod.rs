//! CLI command definitions and dispatch.

pub mod config;
pub mod exclude;
pub mod gate;
pub mod panel;
pub mod plan;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use sharegate_core::config::AppConfig;
use sharegate_core::error::AppError;

/// ShareGate: resource sharing and permission reconciliation
#[derive(Debug, Parser)]
#[command(name = "sharegate", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile a baseline share list against an edited one
    Plan(plan::PlanArgs),
    /// Evaluate the share-management gate for an actor
    Gate(gate::GateArgs),
    /// List principals the add-shares picker must not offer
    Exclude(exclude::ExcludeArgs),
    /// Render the share panel of one resource
    Panel(panel::PanelArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Plan(args) => plan::execute(args, self.format).await,
            Commands::Gate(args) => gate::execute(args, config, self.format).await,
            Commands::Exclude(args) => exclude::execute(args, self.format).await,
            Commands::Panel(args) => panel::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, &self.config, self.format),
        }
    }
}
