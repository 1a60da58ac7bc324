//! `det validate` command - validate the embedded catalog against schemas

use console::style;
use miette::Result;

use crate::catalog::Catalog;
use crate::cli::GlobalOpts;
use crate::schema::registry::AssetKind;
use crate::schema::validator::{lint_catalog, Validator};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let validator = Validator::default();

    let mut stats = ValidationStats::default();
    let mut had_error = false;

    let assets = Catalog::asset_names();
    if !global.quiet {
        println!(
            "{} Validating {} catalog asset(s)...\n",
            style("→").blue(),
            assets.len()
        );
    }

    for name in &assets {
        let Some(kind) = AssetKind::from_asset_path(name) else {
            continue;
        };

        stats.files_checked += 1;

        let Some(source) = Catalog::asset_source(name) else {
            if !args.summary {
                println!("{} {} - unreadable asset", style("✗").red(), name);
            }
            stats.files_failed += 1;
            stats.total_errors += 1;
            had_error = true;
            continue;
        };

        let result = validator.validate(&source, kind);
        if result.valid {
            stats.files_passed += 1;
            if global.verbose {
                println!("{} {}", style("✓").green(), name);
            }
        } else {
            stats.files_failed += 1;
            stats.total_errors += result.errors.len();
            had_error = true;
            if !args.summary {
                println!("{} {}", style("✗").red(), name);
                for issue in &result.errors {
                    if issue.path.is_empty() {
                        println!("    {}", issue.message);
                    } else {
                        println!("    {} - {}", style(&issue.path).dim(), issue.message);
                    }
                }
            }
        }
    }

    // Semantic lints need the whole catalog loaded
    match Catalog::load() {
        Ok(catalog) => {
            let lints = lint_catalog(&catalog);
            if !lints.is_empty() {
                had_error = true;
                stats.total_errors += lints.len();
                if !args.summary {
                    println!();
                    println!("{}", style("Catalog lints:").bold());
                    for issue in &lints {
                        println!(
                            "  {} {} - {}",
                            style("✗").red(),
                            style(&issue.path).dim(),
                            issue.message
                        );
                    }
                }
            }
        }
        Err(e) => {
            had_error = true;
            stats.total_errors += 1;
            if !args.summary {
                println!("{} {}", style("✗").red(), e);
            }
        }
    }

    // Print summary
    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Assets checked: {}", style(stats.files_checked).cyan());
    println!("  Assets passed:  {}", style(stats.files_passed).green());
    println!("  Assets failed:  {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    if had_error {
        Err(miette::miette!(
            "Validation failed: {} error(s)",
            stats.total_errors
        ))
    } else {
        println!(
            "{} All catalog assets passed validation!",
            style("✓").green().bold()
        );
        Ok(())
    }
}
