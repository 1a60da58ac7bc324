//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs,
    completions::CompletionsArgs,
    export::ExportArgs,
    situation::SituationCommands,
    validate::ValidateArgs,
    wizard::WizardArgs,
};

#[derive(Parser)]
#[command(name = "det")]
#[command(author, version, about = "Dossier Electoral Toolkit")]
#[command(long_about = "A CLI that assembles the supporting-document checklist for registering on the French electoral rolls: pick a situation, tick the documents you hold, get a printable checklist.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive wizard: situation, documents, checklist
    Wizard(WizardArgs),

    /// Browse the situation catalog
    #[command(subcommand)]
    Situation(SituationCommands),

    /// Check a document selection for completeness
    Check(CheckArgs),

    /// Export the checklist for a situation and selection
    Export(ExportArgs),

    /// Validate the embedded catalog against its schemas
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just ids, one per line
    Id,
}
