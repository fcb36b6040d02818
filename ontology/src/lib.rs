//! Pattern ontology generator for systematic literature reviews.
//!
//! The `slr-ontology` crate turns a review dataset (papers, the design
//! patterns each paper reports, and the canonical patterns they were
//! consolidated into) into ontology triples. Free-text names become stable
//! identifiers, paper patterns are linked to their canonical class through
//! an alias table, and inter-pattern relations are resolved either to
//! another paper's pattern or to a canonical pattern.
//!
//! # Entry Point
//!
//! ```
//! use slr_ontology::{generate, Dataset, Templates, DEFAULT_OWNER};
//!
//! let dataset = Dataset::from_json_str(r#"{
//!     "Papers": [{ "ID": "1", "author": "Smith, J.", "year": "2019" }],
//!     "Paper patterns": [{ "ID": "7", "Paper": "1", "Name": "Retry",
//!                          "Type (determined)": "Idiom" }],
//!     "Canonical patterns": [{ "Name": "Retry", "Type (determined)": "Idiom" }]
//! }"#).unwrap();
//! let templates = Templates::builtin().unwrap();
//! let generation = generate(&dataset, &templates, DEFAULT_OWNER).unwrap();
//! assert!(generation.artifacts.examples.contains("RetrySmith2019"));
//! assert!(generation.report.is_clean());
//! ```
//!
//! # Modules
//!
//! - [`normalize`] — name and relation-label normalization
//! - [`alias`], [`catalog`] — lookup tables built once per run
//! - [`relation`] — relation target resolution
//! - [`category`] — ontology category classification
//! - [`template`], [`emitter`] — record templating
//! - [`generate`](mod@generate), [`output`] — the run itself and atomic file output
//! - [`build`](mod@build) — load, generate and write in one call

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod alias;
pub mod build;
pub mod catalog;
pub mod category;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod model;
pub mod normalize;
pub mod output;
pub mod relation;
pub mod report;
pub mod template;

pub use alias::AliasTable;
pub use build::{build, BuildOptions, BuildOutcome};
pub use catalog::Catalog;
pub use emitter::Artifacts;
pub use error::Error;
pub use generate::{generate, Generation, DEFAULT_OWNER};
pub use model::{CanonicalPattern, Dataset, Paper, PaperPattern};
pub use output::write_artifacts;
pub use relation::{RelationKind, ResolvedRelation, UNKNOWN};
pub use report::{GenerationReport, Issue, IssueKind, Severity};
pub use template::{BuiltinSource, DirectorySource, InMemorySource, TemplateSource, Templates};
