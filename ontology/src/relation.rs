//! Inter-pattern relation resolution.
//!
//! A paper pattern may point at other patterns through five relation
//! fields. Each field holds a `", "`-separated list whose entries are either
//! the numeric ID of another paper pattern or the free-text name of a
//! canonical pattern. Resolution turns every entry into an identifier, or
//! into [`UNKNOWN`] together with a [`ResolveFailure`] saying why.

use std::fmt;

use crate::catalog::Catalog;
use crate::model::PaperPattern;
use crate::normalize::{to_identifier, to_relation_key};
use crate::report::IssueKind;

/// Identifier substituted for a target that cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Suffix distinguishing a canonical individual from its class.
pub const CANONICAL_SUFFIX: &str = "Canonical";

/// The relation fields a paper pattern may carry, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `From pattern`
    FromPattern,
    /// `Related to`
    RelatedTo,
    /// `Variant Of`
    VariantOf,
    /// `Requires`
    Requires,
    /// `Benefits from`
    BenefitsFrom,
}

impl RelationKind {
    /// All kinds in declaration order.
    pub const ALL: [RelationKind; 5] = [
        RelationKind::FromPattern,
        RelationKind::RelatedTo,
        RelationKind::VariantOf,
        RelationKind::Requires,
        RelationKind::BenefitsFrom,
    ];

    /// Dataset column heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RelationKind::FromPattern => "From pattern",
            RelationKind::RelatedTo => "Related to",
            RelationKind::VariantOf => "Variant Of",
            RelationKind::Requires => "Requires",
            RelationKind::BenefitsFrom => "Benefits from",
        }
    }

    /// Predicate identifier, e.g. `relatedTo`.
    #[must_use]
    pub fn key(self) -> String {
        to_relation_key(self.label())
    }

    /// Splits a field value into target references.
    pub fn targets(self, value: &str) -> impl Iterator<Item = &str> {
        value.split(", ")
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A successfully resolved relation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTarget {
    /// Another paper pattern: `<name><first author><year>`.
    PaperPattern(String),
    /// A canonical pattern individual: `<name>Canonical`.
    Canonical(String),
}

impl RelationTarget {
    /// The identifier to emit.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            RelationTarget::PaperPattern(id) | RelationTarget::Canonical(id) => id,
        }
    }
}

/// Why a target reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveFailure {
    /// Free text that matches no canonical pattern name.
    #[error("`{reference}` does not name a canonical pattern")]
    UnregisteredName {
        /// The reference as written.
        reference: String,
    },
    /// A numeric ID that matches no paper pattern.
    #[error("no paper pattern with ID {reference}")]
    DanglingNumeric {
        /// The reference as written.
        reference: String,
    },
    /// A numeric ID whose paper pattern points at a missing paper.
    #[error("paper pattern {reference} refers to unknown paper {paper}")]
    DanglingPaper {
        /// The reference as written.
        reference: String,
        /// The missing paper identifier.
        paper: String,
    },
}

impl ResolveFailure {
    /// The report category for this failure.
    #[must_use]
    pub fn issue_kind(&self) -> IssueKind {
        match self {
            ResolveFailure::UnregisteredName { .. } => IssueKind::UnresolvedReference,
            ResolveFailure::DanglingNumeric { .. } | ResolveFailure::DanglingPaper { .. } => {
                IssueKind::DanglingNumericReference
            }
        }
    }
}

/// One emitted relation: predicate key and target identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelation {
    /// Source field.
    pub kind: RelationKind,
    /// Normalized predicate identifier.
    pub key: String,
    /// Resolved identifier, or [`UNKNOWN`].
    pub target: String,
}

/// Every relation of one paper pattern, plus the failures behind any
/// [`UNKNOWN`] targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Relations in field order, then list order.
    pub relations: Vec<ResolvedRelation>,
    /// Failed references with the field they came from.
    pub failures: Vec<(RelationKind, ResolveFailure)>,
}

/// Returns true for a non-empty, all-digit reference.
#[must_use]
pub fn is_numeric_reference(reference: &str) -> bool {
    !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit())
}

/// Resolves a single target reference.
///
/// # Errors
///
/// Returns a [`ResolveFailure`] describing why `reference` matches nothing.
pub fn resolve_reference(
    catalog: &Catalog<'_>,
    reference: &str,
) -> Result<RelationTarget, ResolveFailure> {
    if is_numeric_reference(reference) {
        let target = catalog
            .paper_pattern(reference)
            .ok_or_else(|| ResolveFailure::DanglingNumeric {
                reference: reference.to_string(),
            })?;
        let paper = catalog
            .paper(&target.paper)
            .ok_or_else(|| ResolveFailure::DanglingPaper {
                reference: reference.to_string(),
                paper: target.paper.clone(),
            })?;
        return Ok(RelationTarget::PaperPattern(format!(
            "{}{}{}",
            to_identifier(&target.name),
            paper.first_author(),
            paper.year
        )));
    }

    if catalog.is_canonical_name(reference) {
        Ok(RelationTarget::Canonical(format!(
            "{}{CANONICAL_SUFFIX}",
            to_identifier(reference)
        )))
    } else {
        Err(ResolveFailure::UnregisteredName {
            reference: reference.to_string(),
        })
    }
}

/// Resolves every relation declared on `pattern`.
#[must_use]
pub fn resolve_relations(catalog: &Catalog<'_>, pattern: &PaperPattern) -> Resolution {
    let mut resolution = Resolution::default();
    for kind in RelationKind::ALL {
        let Some(value) = pattern.relation(kind) else {
            continue;
        };
        let key = kind.key();
        for reference in kind.targets(value) {
            let target = match resolve_reference(catalog, reference) {
                Ok(target) => target.identifier().to_string(),
                Err(failure) => {
                    resolution.failures.push((kind, failure));
                    UNKNOWN.to_string()
                }
            };
            resolution.relations.push(ResolvedRelation {
                kind,
                key: key.clone(),
                target,
            });
        }
    }
    resolution
}
