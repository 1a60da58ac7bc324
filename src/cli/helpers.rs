//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::Result;

use crate::catalog::{Catalog, Situation, HOSTED_SITUATION_ID};
use crate::core::hosting::{synthesize_hosted_situation, HostingFacts};

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Build hosting facts from the `--age` / `--parent` / `--no-parent` flags.
/// Returns `None` when no flag was given at all.
pub fn hosting_facts_from_flags(
    age: Option<u32>,
    parent: bool,
    no_parent: bool,
) -> Result<Option<HostingFacts>> {
    if age.is_none() && !parent && !no_parent {
        return Ok(None);
    }
    let Some(age) = age else {
        return Err(miette::miette!(
            "--parent/--no-parent also needs --age <AGE>"
        ));
    };
    if parent == no_parent {
        return Err(miette::miette!(
            "Specify exactly one of --parent or --no-parent with --age"
        ));
    }
    Ok(Some(HostingFacts {
        age,
        is_parent: parent,
    }))
}

/// Resolve a situation id to the document list the wizard would work with:
/// the catalog entry, or the synthetic hosted situation once facts are
/// supplied. The hosting placeholder without facts is an error here, since
/// non-interactive commands have no later step to collect them.
pub fn resolve_situation(
    catalog: &Catalog,
    id: &str,
    facts: Option<HostingFacts>,
) -> Result<Situation> {
    let Some(situation) = catalog.situation(id) else {
        let known: Vec<&str> = catalog.situations().iter().map(|s| s.id.as_str()).collect();
        return Err(miette::miette!(
            "Unknown situation '{}'. Known situations: {}",
            id,
            known.join(", ")
        ));
    };

    if situation.id == HOSTED_SITUATION_ID {
        let Some(facts) = facts else {
            return Err(miette::miette!(
                "Situation '{}' derives its documents from your hosting case: add --age <AGE> and --parent or --no-parent",
                id
            ));
        };
        return Ok(synthesize_hosted_situation(catalog, facts));
    }

    Ok(situation.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_hosting_facts_from_flags() {
        assert_eq!(hosting_facts_from_flags(None, false, false).unwrap(), None);
        assert_eq!(
            hosting_facts_from_flags(Some(20), true, false).unwrap(),
            Some(HostingFacts {
                age: 20,
                is_parent: true
            })
        );
        assert_eq!(
            hosting_facts_from_flags(Some(30), false, true).unwrap(),
            Some(HostingFacts {
                age: 30,
                is_parent: false
            })
        );
        assert!(hosting_facts_from_flags(None, true, false).is_err());
        assert!(hosting_facts_from_flags(Some(20), true, true).is_err());
        assert!(hosting_facts_from_flags(Some(20), false, false).is_err());
    }

    #[test]
    fn test_resolve_situation_hosting_placeholder() {
        let catalog = Catalog::load().unwrap();

        assert!(resolve_situation(&catalog, HOSTED_SITUATION_ID, None).is_err());
        assert!(resolve_situation(&catalog, "does-not-exist", None).is_err());

        let facts = HostingFacts {
            age: 26,
            is_parent: true,
        };
        let situation = resolve_situation(&catalog, HOSTED_SITUATION_ID, Some(facts)).unwrap();
        assert!(situation
            .documents
            .iter()
            .any(|d| d.id == "parent_hosting_attestation"));
    }
}
