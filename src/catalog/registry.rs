//! Embedded catalog registry
//!
//! Situations and hosting sub-cases live as YAML files under `catalog/`,
//! compiled into the binary with rust-embed and parsed once at startup.

use rust_embed::Embed;
use thiserror::Error;

use crate::catalog::types::{Document, HostingSubcaseDef, Situation};

#[derive(Embed)]
#[folder = "catalog/"]
struct CatalogAssets;

/// Situation assets in presentation order. rust-embed iterates in filename
/// order, which is not the order the choice screen wants.
const SITUATION_FILES: &[&str] = &[
    "situations/residence_principale.yaml",
    "situations/residence_secondaire.yaml",
    "situations/chef-entreprise.yaml",
    "situations/gerant-sci.yaml",
    "situations/heberge-tiers.yaml",
    "situations/foyer.yaml",
];

const HOSTING_FILES: &[&str] = &[
    "hosting/hosted_by_other.yaml",
    "hosting/adult_child_under_26.yaml",
    "hosting/adult_child_26_plus.yaml",
];

/// Id of the placeholder situation whose real document list comes from the
/// hosting sub-case resolver. Its catalog entry carries an empty list and is
/// never rendered directly.
pub const HOSTED_SITUATION_ID: &str = "heberge-tiers";

/// Errors loading the embedded catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog asset not found: {0}")]
    MissingAsset(String),

    #[error("Catalog asset {0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

/// The process-wide situation catalog, immutable after load
#[derive(Debug, Clone)]
pub struct Catalog {
    situations: Vec<Situation>,
    hosting: Vec<HostingSubcaseDef>,
}

impl Catalog {
    /// Parse every embedded asset. The assets ship with the binary, so a
    /// failure here means the build itself is broken.
    pub fn load() -> Result<Self, CatalogError> {
        let mut situations = Vec::with_capacity(SITUATION_FILES.len());
        for file in SITUATION_FILES {
            situations.push(parse_asset::<Situation>(file)?);
        }

        let mut hosting = Vec::with_capacity(HOSTING_FILES.len());
        for file in HOSTING_FILES {
            hosting.push(parse_asset::<HostingSubcaseDef>(file)?);
        }

        Ok(Self {
            situations,
            hosting,
        })
    }

    /// All situations, in choice-screen order
    pub fn situations(&self) -> &[Situation] {
        &self.situations
    }

    /// Look up a situation by id. `None` means "nothing selected yet" to
    /// callers, never a crash.
    pub fn situation(&self, id: &str) -> Option<&Situation> {
        self.situations.iter().find(|s| s.id == id)
    }

    /// All hosting sub-case definitions
    pub fn hosting_subcases(&self) -> &[HostingSubcaseDef] {
        &self.hosting
    }

    /// Look up a hosting sub-case definition by id
    pub fn hosting_subcase(&self, id: &str) -> Option<&HostingSubcaseDef> {
        self.hosting.iter().find(|s| s.id == id)
    }

    /// Document list for a hosting sub-case id. Unknown ids yield an empty
    /// slice ("no additional documents"), not an error.
    pub fn hosting_documents(&self, id: &str) -> &[Document] {
        self.hosting_subcase(id)
            .map(|s| s.documents.as_slice())
            .unwrap_or(&[])
    }

    /// Names of every embedded catalog asset, for validation
    pub fn asset_names() -> Vec<String> {
        CatalogAssets::iter().map(|f| f.to_string()).collect()
    }

    /// Raw YAML source of one embedded asset
    pub fn asset_source(name: &str) -> Option<String> {
        let file = CatalogAssets::get(name)?;
        String::from_utf8(file.data.into_owned()).ok()
    }
}

fn parse_asset<T: serde::de::DeserializeOwned>(file: &str) -> Result<T, CatalogError> {
    let asset = CatalogAssets::get(file)
        .ok_or_else(|| CatalogError::MissingAsset(file.to_string()))?;
    let source = std::str::from_utf8(&asset.data)
        .map_err(|_| CatalogError::InvalidUtf8(file.to_string()))?;
    serde_yml::from_str(source).map_err(|e| CatalogError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.situations().len(), 6);
        assert_eq!(catalog.hosting_subcases().len(), 3);
    }

    #[test]
    fn test_situations_in_choice_order() {
        let catalog = Catalog::load().unwrap();
        let ids: Vec<&str> = catalog.situations().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "residence_principale",
                "residence_secondaire",
                "chef-entreprise",
                "gerant-sci",
                "heberge-tiers",
                "foyer",
            ]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::load().unwrap();
        let principale = catalog.situation("residence_principale").unwrap();
        assert_eq!(principale.title, "Résidence principale");
        assert_eq!(principale.min_required_from_category.get("address"), Some(&1));
        assert!(catalog.situation("unknown").is_none());
    }

    #[test]
    fn test_hosted_placeholder_has_no_documents() {
        let catalog = Catalog::load().unwrap();
        let placeholder = catalog.situation(HOSTED_SITUATION_ID).unwrap();
        assert!(placeholder.documents.is_empty());
        assert!(placeholder.min_required_from_category.is_empty());
    }

    #[test]
    fn test_hosting_documents_unknown_id_is_empty() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.hosting_documents("no_such_subcase").is_empty());
        assert_eq!(catalog.hosting_documents("hosted_by_other").len(), 4);
    }

    #[test]
    fn test_hosting_subcase_documents_all_mandatory() {
        let catalog = Catalog::load().unwrap();
        for subcase in catalog.hosting_subcases() {
            assert!(!subcase.documents.is_empty(), "{} is empty", subcase.id);
            for doc in &subcase.documents {
                assert!(doc.required, "{}/{} must be mandatory", subcase.id, doc.id);
            }
        }
    }

    #[test]
    fn test_document_ids_unique_within_situation() {
        let catalog = Catalog::load().unwrap();
        for situation in catalog.situations() {
            let mut seen = std::collections::BTreeSet::new();
            for doc in &situation.documents {
                assert!(seen.insert(&doc.id), "{}/{} duplicated", situation.id, doc.id);
            }
        }
    }
}
