//! `det wizard` command - the interactive flow
//!
//! Screens and keystrokes only: collects input with dialoguer and renders
//! with console. Every transition and rule lives in the core reducer
//! (`WizardState::apply`), so nothing here decides anything.

use std::collections::BTreeSet;
use std::path::PathBuf;

use console::style;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::catalog::{Catalog, Document, Situation, HOSTED_SITUATION_ID};
use crate::cli::GlobalOpts;
use crate::core::export::{ChecklistRenderer, CHECKLIST_FILENAME};
use crate::core::hosting::{resolve_subcase, HostingFacts};
use crate::core::validator;
use crate::core::wizard::{Step, WizardEvent, WizardState, STEP_LABELS};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct WizardArgs {
    /// Where "Télécharger la checklist" writes the file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: WizardArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = Catalog::load().into_diagnostic()?;
    let renderer = ChecklistRenderer::new().into_diagnostic()?;
    let theme = ColorfulTheme::default();

    let mut state = WizardState::new();

    if !global.quiet {
        print_header();
    }

    loop {
        println!();
        print_step_indicator(&state);
        println!();

        match state.step {
            Step::Situation => {
                let mut items: Vec<String> = catalog
                    .situations()
                    .iter()
                    .map(|s| format!("{} {} — {}", s.icon, s.title, style(&s.description).dim()))
                    .collect();
                items.push(format!("{} Quitter", style("✗").red()));

                let pick = Select::with_theme(&theme)
                    .with_prompt("Dans quelle situation souhaitez-vous vous inscrire ?")
                    .items(&items)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;

                if pick == catalog.situations().len() {
                    return Ok(());
                }
                let id = catalog.situations()[pick].id.clone();
                state = state.apply(&catalog, WizardEvent::ChooseSituation(id));
            }

            Step::HostingFacts => {
                println!("{}", style("Précisez votre cas d'hébergement").bold());
                println!(
                    "{}",
                    style("Nous adapterons automatiquement la liste des documents à fournir").dim()
                );
                println!();

                let relations = [
                    "👨‍👩‍👦 Chez un parent (père, mère)",
                    "🤝 Chez une autre personne (ami, proche)",
                    "← Retour",
                ];
                let relation = Select::with_theme(&theme)
                    .with_prompt("Où êtes-vous hébergé ?")
                    .items(&relations)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;

                if relation == 2 {
                    state = state.apply(&catalog, WizardEvent::GoPrevious);
                    continue;
                }

                let is_parent = relation == 0;
                // The age selector only distinguishes the two bands the
                // rules care about; the representative ages mirror that.
                let age = if is_parent {
                    let ages = ["👦 Moins de 26 ans", "🧑 26 ans ou plus"];
                    let band = Select::with_theme(&theme)
                        .with_prompt("Quel est votre âge ?")
                        .items(&ages)
                        .default(0)
                        .interact()
                        .into_diagnostic()?;
                    if band == 0 {
                        20
                    } else {
                        26
                    }
                } else {
                    30
                };

                state = state.apply(
                    &catalog,
                    WizardEvent::SubmitHostingFacts(HostingFacts { age, is_parent }),
                );
            }

            Step::Documents => {
                let Some(situation) = state.active_situation(&catalog) else {
                    state = state.apply(&catalog, WizardEvent::Restart);
                    continue;
                };

                print_documents_screen(&catalog, &state, &situation);

                let optional: Vec<&Document> = situation.optional_documents().collect();
                if !optional.is_empty() {
                    let labels: Vec<String> = optional
                        .iter()
                        .map(|d| match &d.description {
                            Some(desc) => format!("{} — {}", d.label, style(desc).dim()),
                            None => d.label.clone(),
                        })
                        .collect();
                    let defaults: Vec<bool> = optional
                        .iter()
                        .map(|d| state.selected.contains(&d.id))
                        .collect();

                    let picks = MultiSelect::with_theme(&theme)
                        .with_prompt("Sélectionnez les documents que vous possédez (espace pour cocher)")
                        .items(&labels)
                        .defaults(&defaults)
                        .interact()
                        .into_diagnostic()?;

                    let picked: BTreeSet<&str> =
                        picks.iter().map(|&i| optional[i].id.as_str()).collect();
                    for doc in &optional {
                        let checked = picked.contains(doc.id.as_str());
                        if checked != state.selected.contains(&doc.id) {
                            state = state.apply(
                                &catalog,
                                WizardEvent::ToggleDocument {
                                    id: doc.id.clone(),
                                    checked,
                                },
                            );
                        }
                    }
                }

                print_completeness_badge(&state, &situation);

                let mut actions: Vec<&str> = Vec::new();
                if state.complete {
                    actions.push("Continuer");
                }
                if !optional.is_empty() {
                    actions.push("Modifier la sélection");
                }
                actions.push("← Retour");
                actions.push("Recommencer");
                actions.push("Quitter");

                let action = Select::with_theme(&theme)
                    .with_prompt("Et maintenant ?")
                    .items(&actions)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;

                match actions[action] {
                    "Continuer" => state = state.apply(&catalog, WizardEvent::GoNext),
                    "Modifier la sélection" => {}
                    "← Retour" => state = state.apply(&catalog, WizardEvent::GoPrevious),
                    "Recommencer" => state = state.apply(&catalog, WizardEvent::Restart),
                    _ => return Ok(()),
                }
            }

            Step::Summary => {
                let Some(situation) = state.active_situation(&catalog) else {
                    state = state.apply(&catalog, WizardEvent::Restart);
                    continue;
                };

                print_summary_screen(&state, &situation);

                let actions = [
                    "🖨️ Imprimer la checklist",
                    "💾 Télécharger la checklist",
                    "← Modifier mes documents",
                    "🔄 Nouvelle simulation",
                    "Quitter",
                ];
                let action = Select::with_theme(&theme)
                    .with_prompt("Et maintenant ?")
                    .items(&actions)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;

                let today = chrono::Local::now().date_naive();
                match action {
                    0 => {
                        let text = renderer
                            .render(&situation, &state.selected, today)
                            .into_diagnostic()?;
                        println!();
                        println!("{}", text);
                    }
                    1 => {
                        let config = Config::load();
                        let path = args
                            .output
                            .clone()
                            .or(config.export_path)
                            .unwrap_or_else(|| PathBuf::from(CHECKLIST_FILENAME));
                        renderer
                            .write(&path, &situation, &state.selected, today)
                            .into_diagnostic()?;
                        println!(
                            "{} Checklist écrite dans {}",
                            style("✓").green().bold(),
                            style(path.display()).cyan()
                        );
                    }
                    2 => state = state.apply(&catalog, WizardEvent::GoPrevious),
                    3 => state = state.apply(&catalog, WizardEvent::Restart),
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("Mon Dossier Inscription Électorale").bold().cyan()
    );
    println!(
        "{}",
        style("Choisissez votre situation, indiquez vos documents et obtenez votre checklist personnalisée.")
            .dim()
    );
}

/// ● done ◉ current ○ pending, in the three-slot indicator
fn print_step_indicator(state: &WizardState) {
    let current = state.step_index();
    let parts: Vec<String> = STEP_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let i = i as u8;
            if i == current {
                format!("{} {}", style("◉").cyan(), style(label).bold())
            } else if state.completed_steps.contains(&i) {
                format!("{} {}", style("●").green(), label)
            } else {
                format!("{} {}", style("○").dim(), style(label).dim())
            }
        })
        .collect();
    println!("{}", parts.join("   "));
}

fn print_documents_screen(catalog: &Catalog, state: &WizardState, situation: &Situation) {
    println!(
        "{} {}",
        style("Documents nécessaires pour :").bold(),
        style(&situation.title).bold().cyan()
    );

    if situation.id == HOSTED_SITUATION_ID {
        if let Some(facts) = state.hosting_facts {
            let subcase = resolve_subcase(facts.age, facts.is_parent);
            if let Some(def) = catalog.hosting_subcase(subcase.as_str()) {
                println!("{}", style(&def.label).dim());
                if let Some(note) = &def.note {
                    println!("{} {}", style("ℹ").blue(), style(note).dim());
                }
            }
        }
    }
    println!();

    let required: Vec<&Document> = situation.required_documents().collect();
    if !required.is_empty() {
        println!("{}", style("🔒 Documents INCONTOURNABLES :").bold());
        for doc in required {
            let icon = doc.icon.as_deref().unwrap_or("📄");
            match &doc.description {
                Some(desc) => println!(
                    "  {} {} {} — {}",
                    style("☑").green(),
                    icon,
                    doc.label,
                    style(desc).dim()
                ),
                None => println!("  {} {} {}", style("☑").green(), icon, doc.label),
            }
        }
        println!();
    }
}

fn print_completeness_badge(state: &WizardState, situation: &Situation) {
    println!();
    if state.complete {
        println!("{}", style("✓ Dossier complet").green().bold());
    } else {
        println!("{}", style("✗ Documents manquants").red().bold());
    }

    for (category, selected, minimum) in validator::category_progress(situation, &state.selected) {
        let marker = if selected >= minimum {
            style("✓").green()
        } else {
            style("⚠").yellow()
        };
        println!(
            "  {} {} : au moins {} requis ({} sélectionné(s))",
            marker,
            category,
            minimum,
            selected
        );
    }
    println!();
}

fn print_summary_screen(state: &WizardState, situation: &Situation) {
    println!(
        "{}",
        style("Félicitations ! Votre dossier est complet").green().bold()
    );
    println!(
        "{} {}",
        style("Dossier validé pour :").bold(),
        style(&situation.title).cyan()
    );
    println!();

    println!("{}", style("Documents obligatoires :").bold());
    for doc in situation.required_documents() {
        println!("  {} {}", style("☑").green(), doc.label);
    }

    println!();
    println!("{}", style("Vos documents sélectionnés :").bold());
    let mut any = false;
    for doc in situation
        .optional_documents()
        .filter(|d| state.selected.contains(&d.id))
    {
        println!("  {} {}", style("☑").cyan(), doc.label);
        any = true;
    }
    if !any {
        println!(
            "  {}",
            style("Seuls les documents obligatoires sont requis pour votre situation").italic()
        );
    }

    println!();
    println!("{}", style("⚠ Conseils importants :").yellow().bold());
    println!("  • Présentez les documents originaux ou des copies certifiées conformes");
    println!("  • Vérifiez que vos justificatifs sont datés de moins de 3 mois quand requis");
    println!("  • Les documents doivent être à votre nom et à l'adresse de la commune");
    println!("  • En cas de doute, contactez votre mairie avant de vous déplacer");
    println!();
}
