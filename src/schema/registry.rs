//! Embedded JSON Schemas for catalog assets

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// The two kinds of catalog asset, each with its own schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Situation,
    Subcase,
}

impl AssetKind {
    pub fn all() -> [AssetKind; 2] {
        [AssetKind::Situation, AssetKind::Subcase]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Situation => "situation",
            AssetKind::Subcase => "subcase",
        }
    }

    fn schema_file(&self) -> &'static str {
        match self {
            AssetKind::Situation => "situation.json",
            AssetKind::Subcase => "subcase.json",
        }
    }

    /// Kind of a catalog asset, by its path inside `catalog/`
    pub fn from_asset_path(path: &str) -> Option<AssetKind> {
        if path.starts_with("situations/") {
            Some(AssetKind::Situation)
        } else if path.starts_with("hosting/") {
            Some(AssetKind::Subcase)
        } else {
            None
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry of embedded schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Get the schema source for an asset kind
    pub fn get(&self, kind: AssetKind) -> Option<String> {
        let file = EmbeddedSchemas::get(kind.schema_file())?;
        String::from_utf8(file.data.into_owned()).ok()
    }

    pub fn has_schema(&self, kind: AssetKind) -> bool {
        EmbeddedSchemas::get(kind.schema_file()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_schemas() {
        let registry = SchemaRegistry;
        for kind in AssetKind::all() {
            assert!(registry.has_schema(kind), "missing schema for {}", kind);
        }
    }

    #[test]
    fn test_kind_from_asset_path() {
        assert_eq!(
            AssetKind::from_asset_path("situations/foyer.yaml"),
            Some(AssetKind::Situation)
        );
        assert_eq!(
            AssetKind::from_asset_path("hosting/hosted_by_other.yaml"),
            Some(AssetKind::Subcase)
        );
        assert_eq!(AssetKind::from_asset_path("README.md"), None);
    }
}
