//! `det situation` command - browse the situation catalog

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::catalog::{Catalog, Situation, HOSTED_SITUATION_ID};
use crate::cli::helpers::{escape_csv, hosting_facts_from_flags, resolve_situation, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum SituationCommands {
    /// List all registration situations
    List(ListArgs),

    /// Show one situation's document checklist
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Situation id (see `det situation list`)
    pub id: String,

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

pub fn run(cmd: SituationCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SituationCommands::List(args) => run_list(args, global),
        SituationCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::load().into_diagnostic()?;
    let situations = catalog.situations();

    if args.count {
        println!("{}", situations.len());
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv, // Default to TSV for list
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(situations).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(situations).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            println!("id,title,documents,required,rules");
            for situation in situations {
                println!(
                    "{},{},{},{},{}",
                    situation.id,
                    escape_csv(&situation.title),
                    situation.documents.len(),
                    situation.required_documents().count(),
                    escape_csv(&rules_summary(situation)),
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<22} {:<36} {:>5} {:>9} {:<24}",
                style("ID").bold(),
                style("TITLE").bold(),
                style("DOCS").bold(),
                style("REQUIRED").bold(),
                style("RULES").bold()
            );
            println!("{}", "-".repeat(100));

            for situation in situations {
                println!(
                    "{:<22} {:<36} {:>5} {:>9} {:<24}",
                    situation.id,
                    truncate_str(&situation.title, 34),
                    situation.documents.len(),
                    situation.required_documents().count(),
                    rules_summary(situation),
                );
            }

            println!();
            println!("{} situation(s) found", style(situations.len()).cyan());
        }
        OutputFormat::Id => {
            for situation in situations {
                println!("{}", situation.id);
            }
        }
        OutputFormat::Md => {
            println!("| ID | Title | Docs | Required | Rules |");
            println!("|---|---|---|---|---|");
            for situation in situations {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    situation.id,
                    situation.title,
                    situation.documents.len(),
                    situation.required_documents().count(),
                    rules_summary(situation),
                );
            }
        }
        OutputFormat::Auto => unreachable!(), // Already handled above
    }

    Ok(())
}

/// Short "category >= n" summary for list columns
fn rules_summary(situation: &Situation) -> String {
    if situation.id == HOSTED_SITUATION_ID {
        return "derived from hosting case".to_string();
    }
    situation
        .min_required_from_category
        .iter()
        .map(|(category, minimum)| format!("{} >= {}", category, minimum))
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::load().into_diagnostic()?;
    let facts = hosting_facts_from_flags(args.age, args.parent, args.no_parent)?;
    let situation = resolve_situation(&catalog, &args.id, facts)?;

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&situation).into_diagnostic()?;
            println!("{}", json);
            return Ok(());
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&situation).into_diagnostic()?;
            print!("{}", yaml);
            return Ok(());
        }
        OutputFormat::Id => {
            for doc in &situation.documents {
                println!("{}", doc.id);
            }
            return Ok(());
        }
        _ => {}
    }

    println!(
        "{} {}",
        situation.icon,
        style(&situation.title).bold()
    );
    println!("{}", style(&situation.description).dim());
    println!();

    let mut builder = Builder::default();
    builder.push_record(["ID", "DOCUMENT", "CATEGORY", "REQUIRED"]);
    for doc in &situation.documents {
        builder.push_record([
            doc.id.as_str(),
            doc.label.as_str(),
            doc.category.as_str(),
            if doc.required { "yes" } else { "" },
        ]);
    }
    println!("{}", builder.build().with(Style::modern()));

    if !situation.min_required_from_category.is_empty() {
        println!();
        println!("{}", style("Category rules:").bold());
        for (category, minimum) in &situation.min_required_from_category {
            println!("  - at least {} document(s) from '{}'", minimum, category);
        }
    }

    // The hosting sub-cases carry a note explaining the rule they encode
    if let Some(facts) = facts {
        if args.id == HOSTED_SITUATION_ID {
            let subcase = crate::core::hosting::resolve_subcase(facts.age, facts.is_parent);
            if let Some(note) = catalog
                .hosting_subcase(subcase.as_str())
                .and_then(|s| s.note.as_deref())
            {
                println!();
                println!("{}", style(note).dim());
            }
        }
    }

    Ok(())
}
