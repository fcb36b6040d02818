//! Ontology category classification.

use crate::model::{CanonicalPattern, PaperPattern};
use crate::normalize::to_identifier;

/// Normalized types that are their own category.
pub const TOP_LEVEL_TYPES: &[&str] = &["ArchitecturalPattern", "Idiom"];

/// A record carrying a declared type and optional sub-categories.
pub trait Categorized {
    /// Declared type as written in the dataset.
    fn declared_type(&self) -> &str;
    /// Subcategory, if provided.
    fn subcategory(&self) -> Option<&str>;
    /// Subsubcategory, if provided.
    fn subsubcategory(&self) -> Option<&str>;
}

impl Categorized for CanonicalPattern {
    fn declared_type(&self) -> &str {
        &self.pattern_type
    }
    fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }
    fn subsubcategory(&self) -> Option<&str> {
        self.subsubcategory.as_deref()
    }
}

impl Categorized for PaperPattern {
    fn declared_type(&self) -> &str {
        &self.pattern_type
    }
    fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }
    fn subsubcategory(&self) -> Option<&str> {
        self.subsubcategory.as_deref()
    }
}

/// The type is not top-level and no sub-category is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCategory {
    /// The normalized declared type.
    pub normalized_type: String,
}

/// Picks the category identifier for `record`.
///
/// Architectural patterns and idioms are their own category; everything else
/// uses the subsubcategory, or failing that the subcategory.
///
/// # Errors
///
/// Returns [`MissingCategory`] if the type is not top-level and neither
/// sub-category is provided.
pub fn classify(record: &impl Categorized) -> Result<String, MissingCategory> {
    let normalized_type = to_identifier(record.declared_type());
    if TOP_LEVEL_TYPES.contains(&normalized_type.as_str()) {
        return Ok(normalized_type);
    }
    record
        .subsubcategory()
        .or_else(|| record.subcategory())
        .map(to_identifier)
        .ok_or(MissingCategory { normalized_type })
}
