//! Fatal errors.
//!
//! Anything in [`Error`] aborts the run before output is written. Problems
//! that only affect one record are [`Issue`](crate::report::Issue)s instead.

use std::path::PathBuf;

use crate::template::TemplateError;

/// A fatal generation error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset file could not be read.
    #[error("failed to read dataset {}", path.display())]
    DatasetRead {
        /// Dataset location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON or does not have the expected shape.
    #[error("failed to parse dataset {}: {source}", path.display())]
    DatasetParse {
        /// Dataset location.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A template could not be fetched from its source.
    #[error("failed to load template `{name}` from {}", location.display())]
    TemplateRead {
        /// Template name (`class`, `canonical`, `paper`, `relation`).
        name: String,
        /// Where the source looked for it.
        location: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A template was fetched but is not usable.
    #[error("template `{name}` is invalid: {source}")]
    TemplateSyntax {
        /// Template name.
        name: String,
        /// What is wrong with it.
        #[source]
        source: TemplateError,
    },

    /// Substitution failed while emitting a record.
    #[error("failed to render `{template}` for {record}: {source}")]
    Render {
        /// Template name.
        template: &'static str,
        /// Record being emitted.
        record: String,
        /// Substitution failure.
        #[source]
        source: TemplateError,
    },

    /// An output artifact could not be staged or persisted.
    #[error("failed to write {}", path.display())]
    Output {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
