//! Core module - the pure wizard logic
//!
//! Everything here is synchronous, side-effect-free over its inputs, and
//! testable without a terminal: the hosting sub-case resolver, the selection
//! validator, the wizard reducer and the checklist renderer.

pub mod config;
pub mod export;
pub mod hosting;
pub mod validator;
pub mod wizard;

pub use config::Config;
pub use export::{ChecklistRenderer, ExportError, CHECKLIST_FILENAME};
pub use hosting::{resolve_subcase, HostingFacts, Subcase};
pub use validator::{evaluate, is_complete, CategoryShortfall, Completeness};
pub use wizard::{Step, WizardEvent, WizardState};
