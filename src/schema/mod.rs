//! Schema system - validation of the embedded catalog assets

pub mod registry;
pub mod validator;

pub use registry::{AssetKind, SchemaRegistry};
pub use validator::{lint_catalog, ValidationIssue, ValidationResult, Validator};
