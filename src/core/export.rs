//! Checklist rendering and export
//!
//! Renders the plain-text checklist handed to the user at the end of the
//! wizard, from a template embedded under `templates/`. "Printing" writes
//! the same text to stdout; "downloading" writes it to a file with a fixed
//! name. Both are fire-and-forget from the core's perspective.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::catalog::Situation;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Fixed name of the exported artifact
pub const CHECKLIST_FILENAME: &str = "checklist-inscription-electorale.txt";

const CHECKLIST_TEMPLATE: &str = "checklist.txt.tera";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    Render(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Checklist renderer with the embedded template loaded
pub struct ChecklistRenderer {
    tera: Tera,
}

impl ChecklistRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| ExportError::Render(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render the checklist text: header, mandatory labels, then the
    /// selected optional labels, both in catalog order, then the fixed
    /// advisory footer.
    pub fn render(
        &self,
        situation: &Situation,
        selected: &BTreeSet<String>,
        date: NaiveDate,
    ) -> Result<String, ExportError> {
        if !self
            .tera
            .get_template_names()
            .any(|n| n == CHECKLIST_TEMPLATE)
        {
            return Err(ExportError::NotFound(CHECKLIST_TEMPLATE.to_string()));
        }

        let required: Vec<&str> = situation
            .required_documents()
            .map(|d| d.label.as_str())
            .collect();
        let selected_optional: Vec<&str> = situation
            .optional_documents()
            .filter(|d| selected.contains(&d.id))
            .map(|d| d.label.as_str())
            .collect();

        let mut context = tera::Context::new();
        context.insert("situation", &situation.title);
        context.insert("date", &date.format("%d/%m/%Y").to_string());
        context.insert("required", &required);
        context.insert("selected", &selected_optional);

        self.tera
            .render(CHECKLIST_TEMPLATE, &context)
            .map_err(|e| ExportError::Render(e.to_string()))
    }

    /// Render and write the checklist to `path`
    pub fn write(
        &self,
        path: &Path,
        situation: &Situation,
        selected: &BTreeSet<String>,
        date: NaiveDate,
    ) -> Result<(), ExportError> {
        let text = self.render(situation, selected, date)?;
        std::fs::write(path, text).map_err(|e| ExportError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}
