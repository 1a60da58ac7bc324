//! Schema validation for catalog assets
//!
//! Two layers: JSON-Schema validation of each embedded YAML file, then
//! semantic lints the schemas cannot express (cross-field rules like "every
//! gated category has documents to satisfy it").

use jsonschema::{validator_for, Validator as JsonValidator};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};

use crate::catalog::{Catalog, HOSTED_SITUATION_ID};
use crate::schema::registry::{AssetKind, SchemaRegistry};

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer into the document, or a describing location
    pub path: String,
    pub message: String,
}

/// Result of validating one asset
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn failure(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// Schema validator with compiled schemas
pub struct Validator {
    /// Compiled JSON Schemas by asset kind
    compiled: HashMap<AssetKind, JsonValidator>,
}

impl Validator {
    /// Create a new validator with schemas from the registry
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for kind in AssetKind::all() {
            if let Some(schema_str) = registry.get(kind) {
                if let Ok(schema_json) = serde_json::from_str::<JsonValue>(&schema_str) {
                    if let Ok(compiled_schema) = validator_for(&schema_json) {
                        compiled.insert(kind, compiled_schema);
                    }
                }
            }
        }

        Self { compiled }
    }

    /// Validate YAML content against the schema for the given asset kind
    pub fn validate(&self, content: &str, kind: AssetKind) -> ValidationResult {
        // Parse YAML, then go through JSON for schema validation
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                return ValidationResult::failure(vec![ValidationIssue {
                    path: String::new(),
                    message: format!("YAML parse error: {}", e),
                }]);
            }
        };

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                return ValidationResult::failure(vec![ValidationIssue {
                    path: String::new(),
                    message: format!("Failed to convert YAML to JSON: {}", e),
                }]);
            }
        };

        let Some(schema) = self.compiled.get(&kind) else {
            // No schema available - validation passes (schema optional)
            return ValidationResult::success();
        };

        let errors: Vec<ValidationIssue> = schema
            .iter_errors(&json_value)
            .map(|e| ValidationIssue {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::failure(errors)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        let registry = SchemaRegistry;
        Self::new(&registry)
    }
}

/// Semantic lints over the loaded catalog, beyond what the schemas express
pub fn lint_catalog(catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen_situations = HashSet::new();
    for situation in catalog.situations() {
        if !seen_situations.insert(&situation.id) {
            issues.push(ValidationIssue {
                path: situation.id.clone(),
                message: "duplicate situation id".to_string(),
            });
        }

        let mut seen_docs = HashSet::new();
        for doc in &situation.documents {
            if !seen_docs.insert(&doc.id) {
                issues.push(ValidationIssue {
                    path: format!("{}/documents/{}", situation.id, doc.id),
                    message: "duplicate document id within situation".to_string(),
                });
            }
        }

        for (category, minimum) in &situation.min_required_from_category {
            let available = situation
                .documents
                .iter()
                .filter(|d| &d.category == category)
                .count();
            if available == 0 {
                issues.push(ValidationIssue {
                    path: format!("{}/min_required_from_category/{}", situation.id, category),
                    message: "no document carries this category".to_string(),
                });
            } else if available < *minimum {
                issues.push(ValidationIssue {
                    path: format!("{}/min_required_from_category/{}", situation.id, category),
                    message: format!(
                        "minimum {} can never be met: only {} document(s) in category",
                        minimum, available
                    ),
                });
            }
        }
    }

    // The placeholder's document list must stay empty; its real list comes
    // from the hosting sub-cases.
    if let Some(placeholder) = catalog.situation(HOSTED_SITUATION_ID) {
        if !placeholder.documents.is_empty() {
            issues.push(ValidationIssue {
                path: HOSTED_SITUATION_ID.to_string(),
                message: "hosting placeholder must not carry documents".to_string(),
            });
        }
    } else {
        issues.push(ValidationIssue {
            path: HOSTED_SITUATION_ID.to_string(),
            message: "hosting placeholder situation is missing".to_string(),
        });
    }

    issues
}
