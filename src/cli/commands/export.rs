//! `det export` command - write the checklist artifact

use std::collections::BTreeSet;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::Catalog;
use crate::cli::helpers::{hosting_facts_from_flags, resolve_situation};
use crate::cli::GlobalOpts;
use crate::core::export::{ChecklistRenderer, CHECKLIST_FILENAME};
use crate::core::{validator, Config};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Situation id (see `det situation list`)
    #[arg(long, short = 's')]
    pub situation: String,

    /// Document ids you hold (comma-separated, repeatable)
    #[arg(long, short = 'd', value_delimiter = ',')]
    pub documents: Vec<String>,

    /// Your age, for the hosting situation
    #[arg(long)]
    pub age: Option<u32>,

    /// The host is one of your parents
    #[arg(long)]
    pub parent: bool,

    /// The host is not one of your parents
    #[arg(long, conflicts_with = "parent")]
    pub no_parent: bool,

    /// Output file (default: checklist-inscription-electorale.txt)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the checklist to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::load().into_diagnostic()?;
    let facts = hosting_facts_from_flags(args.age, args.parent, args.no_parent)?;
    let situation = resolve_situation(&catalog, &args.situation, facts)?;

    // Mandatory documents appear on the checklist regardless of the
    // selection; the selection only drives the optional section.
    let selected: BTreeSet<String> = args.documents.into_iter().collect();

    let renderer = ChecklistRenderer::new().into_diagnostic()?;
    let today = chrono::Local::now().date_naive();

    if args.stdout {
        let text = renderer.render(&situation, &selected, today).into_diagnostic()?;
        println!("{}", text);
        return Ok(());
    }

    let config = Config::load();
    let path = args
        .output
        .or(config.export_path)
        .unwrap_or_else(|| PathBuf::from(CHECKLIST_FILENAME));

    renderer
        .write(&path, &situation, &selected, today)
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Checklist écrite dans {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
        if !validator::is_complete(&situation, &selected) {
            println!(
                "{} La sélection est incomplète ; vérifiez-la avec `det check`",
                style("!").yellow()
            );
        }
    }

    Ok(())
}
