use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Build the scan context descriptor for a DAST run")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file. Defaults to $SCANCTX_CONFIG, ./scanctx.toml, then the
    /// user config dir; built-in defaults apply when none exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the descriptor and print its summary (the default command).
    Build(BuildArgs),
    /// Show whether URLs are in scope and which patterns decided it.
    Scope(ScopeArgs),
    /// Look up the priority tier of a check type.
    Tier(TierArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Deliver the descriptor through the configured `[handoff]` provider.
    #[arg(long, default_value_t = false)]
    pub handoff: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScopeArgs {
    #[arg(required = true)]
    pub urls: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TierArgs {
    /// Check type name, e.g. "SQL Injection".
    pub check: String,
}
