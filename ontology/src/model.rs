//! Literature-review dataset model.
//!
//! These types mirror the JSON dataset produced by the review spreadsheet:
//! papers, the patterns each paper reports, and the canonical patterns the
//! reported ones were consolidated into. Records are loaded once and never
//! mutated. Keys keep the spreadsheet's column headings.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::relation::RelationKind;

/// A reviewed paper.
#[derive(Debug, Clone, Deserialize)]
pub struct Paper {
    /// Unique paper identifier, referenced by [`PaperPattern::paper`].
    #[serde(rename = "ID", deserialize_with = "scalar")]
    pub id: String,
    /// Comma-separated author list; the first entry is the first author's surname.
    #[serde(default, deserialize_with = "text")]
    pub author: String,
    /// Publication year.
    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub year: String,
}

impl Paper {
    /// Returns the first entry of the author list.
    ///
    /// ```
    /// # use slr_ontology::Paper;
    /// let paper = Paper {
    ///     id: "1".into(),
    ///     author: "Smith, J., Doe, K.".into(),
    ///     year: "2019".into(),
    /// };
    /// assert_eq!(paper.first_author(), "Smith");
    /// ```
    #[must_use]
    pub fn first_author(&self) -> &str {
        self.author.split(", ").next().unwrap_or_default()
    }
}

/// A design pattern as consolidated across papers.
#[derive(Debug, Clone, Deserialize)]
pub struct CanonicalPattern {
    /// Display name, unique within the canonical set.
    #[serde(rename = "Name")]
    pub name: String,
    /// Declared type: architectural pattern, idiom, or a free-text other kind.
    #[serde(rename = "Type (determined)", default, deserialize_with = "text")]
    pub pattern_type: String,
    /// Category used when the type is neither an architectural pattern nor an idiom.
    #[serde(rename = "Subcategory", default, deserialize_with = "optional_text")]
    pub subcategory: Option<String>,
    /// Finer category, preferred over [`Self::subcategory`].
    #[serde(rename = "Subsubcategory", default, deserialize_with = "optional_text")]
    pub subsubcategory: Option<String>,
    /// Generalized target technology.
    #[serde(rename = "Target (generalized)", default, deserialize_with = "text")]
    pub technology: String,
    /// Generalized applicability domain.
    #[serde(rename = "Applicability domain (generalized)", default, deserialize_with = "text")]
    pub domain: String,
    /// Comma-separated alternative names.
    #[serde(rename = "Alternative names", default, deserialize_with = "optional_text")]
    pub alternative_names: Option<String>,
}

impl CanonicalPattern {
    /// Iterates the declared alternative names.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.alternative_names
            .as_deref()
            .into_iter()
            .flat_map(|names| names.split(", "))
    }
}

/// One paper's reported instance of a pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperPattern {
    /// Identifier referenced by numeric relation targets.
    #[serde(rename = "ID", deserialize_with = "scalar")]
    pub id: String,
    /// Identifier of the reporting [`Paper`].
    #[serde(rename = "Paper", deserialize_with = "scalar")]
    pub paper: String,
    /// Name as written in the paper; may or may not match a canonical name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Declared type.
    #[serde(rename = "Type (determined)", default, deserialize_with = "text")]
    pub pattern_type: String,
    /// Category fallback.
    #[serde(rename = "Subcategory", default, deserialize_with = "optional_text")]
    pub subcategory: Option<String>,
    /// Preferred category fallback.
    #[serde(rename = "Subsubcategory", default, deserialize_with = "optional_text")]
    pub subsubcategory: Option<String>,
    /// Target technology as reported by the paper.
    #[serde(rename = "Target", default, deserialize_with = "text")]
    pub technology: String,
    /// Applicability domain as reported by the paper.
    #[serde(rename = "Applicability domain", default, deserialize_with = "text")]
    pub domain: String,
    /// Context and problem statement.
    #[serde(rename = "Context & Problem", default, deserialize_with = "optional_text")]
    pub context: Option<String>,
    /// Solution statement.
    #[serde(rename = "Solution", default, deserialize_with = "optional_text")]
    pub solution: Option<String>,
    /// `From pattern` targets.
    #[serde(rename = "From pattern", default, deserialize_with = "optional_scalar")]
    pub from_pattern: Option<String>,
    /// `Related to` targets.
    #[serde(rename = "Related to", default, deserialize_with = "optional_scalar")]
    pub related_to: Option<String>,
    /// `Variant Of` targets.
    #[serde(rename = "Variant Of", default, deserialize_with = "optional_scalar")]
    pub variant_of: Option<String>,
    /// `Requires` targets.
    #[serde(rename = "Requires", default, deserialize_with = "optional_scalar")]
    pub requires: Option<String>,
    /// `Benefits from` targets.
    #[serde(rename = "Benefits from", default, deserialize_with = "optional_scalar")]
    pub benefits_from: Option<String>,
}

impl PaperPattern {
    /// Returns the raw value of one relation field, if provided.
    #[must_use]
    pub fn relation(&self, kind: RelationKind) -> Option<&str> {
        match kind {
            RelationKind::FromPattern => self.from_pattern.as_deref(),
            RelationKind::RelatedTo => self.related_to.as_deref(),
            RelationKind::VariantOf => self.variant_of.as_deref(),
            RelationKind::Requires => self.requires.as_deref(),
            RelationKind::BenefitsFrom => self.benefits_from.as_deref(),
        }
    }

    /// Context text with double quotes stripped, or empty.
    #[must_use]
    pub fn context_literal(&self) -> String {
        literal(self.context.as_deref())
    }

    /// Solution text with double quotes stripped, or empty.
    #[must_use]
    pub fn solution_literal(&self) -> String {
        literal(self.solution.as_deref())
    }
}

/// Removes `"` so the text can sit inside a quoted literal. Nothing else changes.
#[must_use]
pub fn literal(text: Option<&str>) -> String {
    text.map(|t| t.replace('"', "")).unwrap_or_default()
}

/// The complete review dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    /// All reviewed papers.
    #[serde(rename = "Papers", default)]
    pub papers: Vec<Paper>,
    /// All paper-reported patterns, in dataset order.
    #[serde(rename = "Paper patterns", default)]
    pub paper_patterns: Vec<PaperPattern>,
    /// All canonical patterns, in dataset order.
    #[serde(rename = "Canonical patterns", default)]
    pub canonical_patterns: Vec<CanonicalPattern>,
}

impl Dataset {
    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetParse`] if the text is not a valid dataset.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|source| Error::DatasetParse {
            path: "<memory>".into(),
            source,
        })
    }

    /// Reads and parses a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetRead`] if the file cannot be read and
    /// [`Error::DatasetParse`] if it is not a valid dataset.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::DatasetParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A string or number cell, read as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(Scalar::into_text)
}

fn scalar_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_text).unwrap_or_default())
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn optional_scalar<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_text).filter(|s| !s.trim().is_empty()))
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
