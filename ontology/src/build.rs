//! Full build: load, generate, write.

use std::path::PathBuf;

use crate::error::Error;
use crate::generate::{generate, DEFAULT_OWNER};
use crate::model::Dataset;
use crate::output::write_artifacts;
use crate::report::GenerationReport;
use crate::template::{BuiltinSource, DirectorySource, TemplateSource, Templates};

/// Settings for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Dataset JSON file.
    pub dataset: PathBuf,
    /// Template directory; the built-in templates are used when `None`.
    pub templates: Option<PathBuf>,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Owner segment used in IRIs.
    pub owner: String,
    /// Withhold all output if any error-severity issue is found.
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("patterns_data.json"),
            templates: None,
            out_dir: PathBuf::from("results"),
            owner: DEFAULT_OWNER.to_string(),
            strict: false,
        }
    }
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Counts and recoverable issues.
    pub report: GenerationReport,
    /// Files written, in write order. Empty when output was withheld.
    pub written: Vec<PathBuf>,
    /// True if strict mode withheld the output.
    pub withheld: bool,
}

/// Runs a complete build.
///
/// The dataset and templates are loaded and every record is rendered before
/// any file is touched.
///
/// # Errors
///
/// Returns the first fatal [`Error`]: an unreadable dataset, a missing or
/// invalid template, or an output failure. No output is written in any of
/// these cases except a failure while persisting the staged files.
pub fn build(options: &BuildOptions) -> Result<BuildOutcome, Error> {
    let dataset = Dataset::from_path(&options.dataset)?;
    let source: Box<dyn TemplateSource> = match &options.templates {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(BuiltinSource),
    };
    let templates = Templates::load(source.as_ref())?;

    let generation = generate(&dataset, &templates, &options.owner)?;

    if options.strict && generation.report.error_count() > 0 {
        tracing::warn!(
            errors = generation.report.error_count(),
            "strict mode: output withheld"
        );
        return Ok(BuildOutcome {
            report: generation.report,
            written: Vec::new(),
            withheld: true,
        });
    }

    let written = write_artifacts(&options.out_dir, &generation.artifacts)?;
    Ok(BuildOutcome {
        report: generation.report,
        written,
        withheld: false,
    })
}
