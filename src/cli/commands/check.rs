//! `det check` command - non-interactive completeness check
//!
//! Exit code 0 when the selection satisfies the situation's rules, 1
//! otherwise, so the command composes in scripts.

use std::collections::BTreeSet;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::Catalog;
use crate::cli::helpers::{hosting_facts_from_flags, resolve_situation};
use crate::cli::GlobalOpts;
use crate::core::validator;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
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
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::load().into_diagnostic()?;
    let facts = hosting_facts_from_flags(args.age, args.parent, args.no_parent)?;
    let situation = resolve_situation(&catalog, &args.situation, facts)?;

    let selected: BTreeSet<String> = args.documents.into_iter().collect();
    let report = validator::evaluate(&situation, &selected);

    if report.is_complete() {
        if !global.quiet {
            println!(
                "{} Dossier complet pour : {}",
                style("✓").green().bold(),
                style(&situation.title).bold()
            );
        }
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} Dossier incomplet pour : {}",
            style("✗").red().bold(),
            style(&situation.title).bold()
        );

        if !report.missing_required.is_empty() {
            println!();
            println!("{}", style("Documents obligatoires manquants :").bold());
            for doc in &report.missing_required {
                println!("  {} {} ({})", style("•").red(), doc.label, doc.id);
            }
        }

        if !report.shortfalls.is_empty() {
            println!();
            println!("{}", style("Minimums par catégorie non atteints :").bold());
            for shortfall in &report.shortfalls {
                println!(
                    "  {} {} : {}/{} sélectionné(s)",
                    style("•").yellow(),
                    shortfall.category,
                    shortfall.selected,
                    shortfall.minimum
                );
            }
        }

        println!();
    }

    Err(miette::miette!("Selection is incomplete"))
}
