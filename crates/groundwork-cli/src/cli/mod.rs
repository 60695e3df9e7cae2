//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use groundwork_core::domain::EndpointType;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "groundwork",
    bin_name = "groundwork",
    version  = groundwork_core::VERSION,
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Serverless scaffolding for monorepo workspaces",
    long_about = "Groundwork materializes serverless app files, a deployment \
                  descriptor, and build/deploy task definitions for a project \
                  already registered in the workspace document.",
    after_help = "EXAMPLES:\n\
        \x20 groundwork generate shop\n\
        \x20 groundwork generate shop --region eu-west-1 --endpoint-type edge\n\
        \x20 groundwork generate shop --dry-run\n\
        \x20 groundwork tasks shop\n\
        \x20 groundwork completions bash > /usr/share/bash-completion/completions/groundwork",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold serverless files and tasks for a project.
    #[command(
        visible_alias = "g",
        about = "Scaffold a registered project",
        after_help = "EXAMPLES:\n\
            \x20 groundwork generate shop\n\
            \x20 groundwork generate shop --no-prerender --skip-format\n\
            \x20 groundwork generate shop --force --region us-west-2"
    )]
    Generate(GenerateArgs),

    /// Print the task definitions a generate run would inject.
    #[command(
        about = "Show the task set for a project",
        after_help = "EXAMPLES:\n\
            \x20 groundwork tasks shop\n\
            \x20 groundwork tasks shop --workspace-file config/workspace.json"
    )]
    Tasks(TasksArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 groundwork completions bash > ~/.local/share/bash-completion/completions/groundwork\n\
            \x20 groundwork completions zsh  > ~/.zfunc/_groundwork\n\
            \x20 groundwork completions fish > ~/.config/fish/completions/groundwork.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `groundwork generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project name as registered in the workspace document.
    #[arg(value_name = "PROJECT", help = "Registered project name")]
    pub project: String,

    /// Cloud provider written into the deployment descriptor.
    #[arg(long = "provider", value_name = "PROVIDER", help = "Cloud provider")]
    pub provider: Option<String>,

    /// Deployment region.
    #[arg(short = 'r', long = "region", value_name = "REGION", help = "Deployment region")]
    pub region: Option<String>,

    /// API endpoint type.
    #[arg(
        long = "endpoint-type",
        value_name = "TYPE",
        value_enum,
        help = "API endpoint type"
    )]
    pub endpoint_type: Option<EndpointTypeArg>,

    /// Skip the formatting baseline during initialization.
    #[arg(long = "skip-format", help = "Skip the formatting baseline")]
    pub skip_format: bool,

    /// Disable the static prerender step.
    #[arg(long = "no-prerender", help = "Skip the prerender config")]
    pub no_prerender: bool,

    /// Overwrite files that exist with different content (destructive).
    #[arg(long = "force", help = "Overwrite conflicting files")]
    pub force: bool,

    /// Stage everything but write nothing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Directory holding a template pack (overrides the built-in set).
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template pack directory"
    )]
    pub templates: Option<PathBuf>,

    /// Workspace document path.
    #[arg(
        short = 'w',
        long = "workspace-file",
        value_name = "FILE",
        help = "Workspace document path"
    )]
    pub workspace_file: Option<PathBuf>,
}

// ── tasks ─────────────────────────────────────────────────────────────────────

/// Arguments for `groundwork tasks`.
#[derive(Debug, Args)]
pub struct TasksArgs {
    /// Project name as registered in the workspace document.
    #[arg(value_name = "PROJECT", help = "Registered project name")]
    pub project: String,

    /// Workspace document path.
    #[arg(
        short = 'w',
        long = "workspace-file",
        value_name = "FILE",
        help = "Workspace document path"
    )]
    pub workspace_file: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `groundwork completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Endpoint type as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EndpointTypeArg {
    Regional,
    Edge,
    Private,
}

impl From<EndpointTypeArg> for EndpointType {
    fn from(arg: EndpointTypeArg) -> Self {
        match arg {
            EndpointTypeArg::Regional => EndpointType::Regional,
            EndpointTypeArg::Edge => EndpointType::Edge,
            EndpointTypeArg::Private => EndpointType::Private,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "groundwork",
            "generate",
            "shop",
            "--region",
            "eu-west-1",
            "--endpoint-type",
            "edge",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.project, "shop");
                assert_eq!(args.region.as_deref(), Some("eu-west-1"));
                assert_eq!(args.endpoint_type, Some(EndpointTypeArg::Edge));
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn generate_alias() {
        let cli = Cli::parse_from(["groundwork", "g", "shop"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn endpoint_type_converts() {
        assert_eq!(
            EndpointType::from(EndpointTypeArg::Private),
            EndpointType::Private
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["groundwork", "--quiet", "--verbose", "tasks", "shop"]);
        assert!(result.is_err());
    }
}
