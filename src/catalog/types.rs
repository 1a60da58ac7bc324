//! Catalog data types

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A supporting-document descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier, unique within the owning situation's document list
    pub id: String,

    /// Human-readable name shown on the checklist
    pub label: String,

    /// Extra guidance (validity window, whose name must appear, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Mandatory for every dossier of this situation
    pub required: bool,

    /// Grouping label used by "at least N of this group" rules
    pub category: String,

    /// Presentational only, ignored by validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A registration situation with its document rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation {
    /// Identifier, unique across the catalog
    pub id: String,

    /// Short name shown on the choice screen and the checklist header
    pub title: String,

    /// One-line explanation of who the situation applies to
    pub description: String,

    /// Presentational only
    pub icon: String,

    /// Ordered document list; order is preserved on screen and in exports
    #[serde(default)]
    pub documents: Vec<Document>,

    /// Minimum count of selected documents per category, if any
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub min_required_from_category: BTreeMap<String, usize>,
}

impl Situation {
    /// Look up a document of this situation by id
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents that are mandatory for every dossier, in catalog order
    pub fn required_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.required)
    }

    /// Documents the user may tick, in catalog order
    pub fn optional_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| !d.required)
    }

    /// Ids of all mandatory documents
    pub fn required_ids(&self) -> BTreeSet<String> {
        self.required_documents().map(|d| d.id.clone()).collect()
    }
}

/// Age bounds attached to a hosting sub-case. Informational: the resolver
/// encodes the actual rule, these bounds only document it in the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRestriction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Definition of one hosting sub-case. Every document it carries is
/// mandatory; the hosting flow has no optional documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingSubcaseDef {
    pub id: String,

    pub label: String,

    /// Shown under the derived checklist (e.g. why no attestation is needed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<AgeRestriction>,

    #[serde(default)]
    pub documents: Vec<Document>,
}
