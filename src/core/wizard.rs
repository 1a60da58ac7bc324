//! Wizard state machine
//!
//! The whole flow is a single immutable state value plus a pure reducer:
//! `WizardState::apply` consumes an event and returns the next state. The
//! interactive command only collects input and renders; every rule lives
//! here, where it is testable without a terminal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Situation, HOSTED_SITUATION_ID};
use crate::core::hosting::{synthesize_hosted_situation, HostingFacts};
use crate::core::validator;

/// Steps in visit order. `HostingFacts` only occurs for the placeholder
/// situation, between `Situation` and `Documents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Situation,
    HostingFacts,
    Documents,
    Summary,
}

/// Step-indicator labels, in display order
pub const STEP_LABELS: [&str; 3] = ["Situation", "Documents", "Vérification"];

/// Indices into the step indicator. The hosting sub-step shares the
/// documents slot.
pub const STEP_SITUATION: u8 = 0;
pub const STEP_DOCUMENTS: u8 = 1;
pub const STEP_SUMMARY: u8 = 2;

/// User-driven events the reducer consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Pick a situation on the choice screen
    ChooseSituation(String),

    /// Record age and relation-to-host for the hosting flow
    SubmitHostingFacts(HostingFacts),

    /// Tick or untick one document
    ToggleDocument { id: String, checked: bool },

    /// Advance from the document list to the summary
    GoNext,

    /// Step back one screen
    GoPrevious,

    /// Throw everything away and start over
    Restart,
}

/// The wizard's working state. Cheap to clone; `apply` never mutates the
/// receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: Step,

    /// Chosen situation id; `None` until the choice screen is answered
    pub situation_id: Option<String>,

    /// Hosting facts, collected only for the placeholder situation
    pub hosting_facts: Option<HostingFacts>,

    /// Chosen document ids, mandatory ones force-included
    pub selected: BTreeSet<String>,

    /// Step-indicator marks; grows monotonically until restart
    pub completed_steps: BTreeSet<u8>,

    /// Derived from the selection on every change, never set directly
    pub complete: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::Situation,
            situation_id: None,
            hosting_facts: None,
            selected: BTreeSet::new(),
            completed_steps: BTreeSet::new(),
            complete: false,
        }
    }

    /// The working situation: the synthetic hosted one once facts are known,
    /// the catalog entry otherwise. `None` until a situation is chosen.
    pub fn active_situation(&self, catalog: &Catalog) -> Option<Situation> {
        let id = self.situation_id.as_deref()?;
        if id == HOSTED_SITUATION_ID {
            if let Some(facts) = self.hosting_facts {
                return Some(synthesize_hosted_situation(catalog, facts));
            }
        }
        catalog.situation(id).cloned()
    }

    /// Step-indicator slot for the current step
    pub fn step_index(&self) -> u8 {
        match self.step {
            Step::Situation => STEP_SITUATION,
            Step::HostingFacts | Step::Documents => STEP_DOCUMENTS,
            Step::Summary => STEP_SUMMARY,
        }
    }

    /// Consume one event and produce the next state. Total: events that do
    /// not apply in the current step leave the state unchanged.
    pub fn apply(&self, catalog: &Catalog, event: WizardEvent) -> WizardState {
        let mut next = self.clone();

        match event {
            WizardEvent::ChooseSituation(id) => {
                if self.step != Step::Situation {
                    return next;
                }
                // An id the catalog does not know stays "nothing chosen"
                let Some(situation) = catalog.situation(&id) else {
                    return next;
                };

                next.situation_id = Some(situation.id.clone());
                next.hosting_facts = None;
                next.selected.clear();
                next.complete = false;
                next.completed_steps.insert(STEP_SITUATION);

                if situation.id == HOSTED_SITUATION_ID {
                    next.step = Step::HostingFacts;
                } else {
                    next.step = Step::Documents;
                    next.refresh_selection(catalog);
                }
            }

            WizardEvent::SubmitHostingFacts(facts) => {
                if self.step != Step::HostingFacts {
                    return next;
                }
                next.hosting_facts = Some(facts);
                next.step = Step::Documents;
                // The derived list is entirely mandatory, so the dossier is
                // complete the moment the facts are in.
                next.refresh_selection(catalog);
            }

            WizardEvent::ToggleDocument { id, checked } => {
                if self.step != Step::Documents {
                    return next;
                }
                let Some(situation) = self.active_situation(catalog) else {
                    return next;
                };
                if situation.document(&id).is_some_and(|d| d.required) {
                    // Mandatory documents are pinned; unticking is a no-op
                    return next;
                }
                if checked {
                    next.selected.insert(id);
                } else {
                    next.selected.remove(&id);
                }
                next.refresh_selection(catalog);
            }

            WizardEvent::GoNext => {
                if self.step == Step::Documents && self.complete {
                    next.step = Step::Summary;
                    next.completed_steps.insert(STEP_SUMMARY);
                }
            }

            WizardEvent::GoPrevious => match self.step {
                Step::Situation => {}
                Step::HostingFacts => {
                    next.step = Step::Situation;
                }
                Step::Documents => {
                    if self.hosting_facts.is_some() {
                        // The derived list is void once the facts go away
                        next.hosting_facts = None;
                        next.selected.clear();
                        next.complete = false;
                        next.step = Step::HostingFacts;
                    } else {
                        next.step = Step::Situation;
                    }
                }
                Step::Summary => {
                    next.step = Step::Documents;
                }
            },

            WizardEvent::Restart => {
                next = WizardState::new();
            }
        }

        next
    }

    /// Force-include mandatory documents, then recompute completeness.
    /// Called on entry to `Documents` and after every toggle. Marks the
    /// documents step done once the dossier is complete; the mark survives
    /// later regressions until restart.
    fn refresh_selection(&mut self, catalog: &Catalog) {
        match self.active_situation(catalog) {
            Some(situation) => {
                for doc in situation.required_documents() {
                    self.selected.insert(doc.id.clone());
                }
                self.complete = validator::is_complete(&situation, &self.selected);
            }
            None => {
                self.complete = false;
            }
        }
        if self.complete && self.step == Step::Documents {
            self.completed_steps.insert(STEP_DOCUMENTS);
        }
    }
}
