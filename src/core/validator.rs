//! Selection completeness validation
//!
//! A dossier is complete when every mandatory document is selected and every
//! per-category minimum is met. Only documents belonging to the situation's
//! own list count; foreign ids in the selection are inert.

use std::collections::BTreeSet;

use crate::catalog::{Document, Situation};

/// Progress toward one unmet per-category minimum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShortfall {
    pub category: String,
    pub selected: usize,
    pub minimum: usize,
}

/// Completeness report for one selection against one situation
#[derive(Debug, Clone)]
pub struct Completeness<'a> {
    /// Mandatory documents absent from the selection
    pub missing_required: Vec<&'a Document>,

    /// Category minimums not yet reached
    pub shortfalls: Vec<CategoryShortfall>,
}

impl Completeness<'_> {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty() && self.shortfalls.is_empty()
    }
}

/// Full report: which mandatory documents are missing and which category
/// minimums are short. The interactive flow surfaces this as badges; `check`
/// prints it verbatim.
pub fn evaluate<'a>(situation: &'a Situation, selected: &BTreeSet<String>) -> Completeness<'a> {
    // The controller force-selects mandatory documents, but the check is
    // repeated here so the validator stands on its own.
    let missing_required = situation
        .documents
        .iter()
        .filter(|d| d.required && !selected.contains(&d.id))
        .collect();

    let mut shortfalls = Vec::new();
    for (category, minimum) in &situation.min_required_from_category {
        let count = category_count(situation, selected, category);
        if count < *minimum {
            shortfalls.push(CategoryShortfall {
                category: category.clone(),
                selected: count,
                minimum: *minimum,
            });
        }
    }

    Completeness {
        missing_required,
        shortfalls,
    }
}

/// Whether the selection satisfies the situation's rules
pub fn is_complete(situation: &Situation, selected: &BTreeSet<String>) -> bool {
    evaluate(situation, selected).is_complete()
}

/// Selected documents of the situation carrying the given category
pub fn category_count(situation: &Situation, selected: &BTreeSet<String>, category: &str) -> usize {
    situation
        .documents
        .iter()
        .filter(|d| d.category == category && selected.contains(&d.id))
        .count()
}

/// (category, selected, minimum) for every gated category, met or not.
/// Used for the per-category progress badges.
pub fn category_progress<'a>(
    situation: &'a Situation,
    selected: &BTreeSet<String>,
) -> Vec<(&'a str, usize, usize)> {
    situation
        .min_required_from_category
        .iter()
        .map(|(category, minimum)| {
            (
                category.as_str(),
                category_count(situation, selected, category),
                *minimum,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_residence_principale_needs_one_address_proof() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("residence_principale").unwrap();

        // Mandatory docs alone do not satisfy the address minimum
        assert!(!is_complete(situation, &ids(&["identity"])));
        assert!(is_complete(situation, &ids(&["identity", "water-bill"])));
    }

    #[test]
    fn test_missing_required_always_incomplete() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("residence_principale").unwrap();

        // Plenty of optional proofs, no identity
        let selection = ids(&["water-bill", "electricity-bill", "gas-bill"]);
        let report = evaluate(situation, &selection);
        assert!(!report.is_complete());
        assert_eq!(report.missing_required.len(), 1);
        assert_eq!(report.missing_required[0].id, "identity");
    }

    #[test]
    fn test_chef_entreprise_needs_two_fiscal_proofs() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("chef-entreprise").unwrap();

        let one_fiscal = ids(&["identity", "continuity-attestation", "kbis", "cfe-n1"]);
        let report = evaluate(situation, &one_fiscal);
        assert!(!report.is_complete());
        assert_eq!(
            report.shortfalls,
            vec![CategoryShortfall {
                category: "fiscal".to_string(),
                selected: 1,
                minimum: 2,
            }]
        );

        let two_fiscal = ids(&[
            "identity",
            "continuity-attestation",
            "kbis",
            "cfe-n1",
            "cfe-n2",
        ]);
        assert!(is_complete(situation, &two_fiscal));
    }

    #[test]
    fn test_required_docs_count_toward_their_category() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("gerant-sci").unwrap();

        // management-attestation is mandatory and belongs to "management",
        // so that minimum is met without any optional management doc.
        let selection = ids(&["identity", "management-attestation", "dgfip-sci"]);
        assert!(is_complete(situation, &selection));
    }

    #[test]
    fn test_foreign_ids_have_no_effect() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("residence_secondaire").unwrap();

        // land-tax ids from another situation do not satisfy the fiscal
        // minimum here; only this situation's own documents count.
        let selection = ids(&["identity", "cfe-n1", "cfe-n2"]);
        assert!(!is_complete(situation, &selection));

        let selection = ids(&["identity", "land-tax-n1", "cfe-n1"]);
        assert!(is_complete(situation, &selection));
    }

    #[test]
    fn test_completeness_is_monotonic_on_additions() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("residence_principale").unwrap();

        let mut selection = ids(&["identity", "water-bill"]);
        assert!(is_complete(situation, &selection));

        for doc in &situation.documents {
            selection.insert(doc.id.clone());
            assert!(is_complete(situation, &selection));
        }

        // Removing the only address proof regresses completeness...
        let mut selection = ids(&["identity", "water-bill"]);
        selection.remove("water-bill");
        assert!(!is_complete(situation, &selection));

        // ...as does removing a mandatory document
        let mut selection = ids(&["identity", "water-bill"]);
        selection.remove("identity");
        assert!(!is_complete(situation, &selection));
    }

    #[test]
    fn test_required_only_selection_across_the_whole_catalog() {
        // With exactly the mandatory ids selected, a situation is complete
        // precisely when its mandatory documents already satisfy every
        // category minimum.
        let catalog = Catalog::load().unwrap();
        for situation in catalog.situations() {
            let selection = situation.required_ids();
            let satisfied_by_required =
                situation
                    .min_required_from_category
                    .iter()
                    .all(|(category, minimum)| {
                        situation
                            .documents
                            .iter()
                            .filter(|d| d.required && &d.category == category)
                            .count()
                            >= *minimum
                    });
            assert_eq!(
                is_complete(situation, &selection),
                satisfied_by_required,
                "situation {}",
                situation.id
            );
        }
    }

    #[test]
    fn test_category_progress_reports_met_and_unmet() {
        let catalog = Catalog::load().unwrap();
        let situation = catalog.situation("chef-entreprise").unwrap();

        let selection = ids(&["identity", "continuity-attestation", "cfe-n1"]);
        let progress = category_progress(situation, &selection);
        // BTreeMap ordering: activity before fiscal
        assert_eq!(progress, vec![("activity", 1, 1), ("fiscal", 1, 2)]);
    }

    #[test]
    fn test_empty_document_list_is_trivially_complete() {
        let catalog = Catalog::load().unwrap();
        let placeholder = catalog.situation("heberge-tiers").unwrap();
        assert!(is_complete(placeholder, &BTreeSet::new()));
    }
}
