//! One generation run over a loaded dataset.
//!
//! Canonical patterns are processed first (class + canonical records), then
//! paper patterns (example records). Output order follows dataset order.
//! Everything is rendered in memory; nothing here touches the filesystem.

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::category::classify;
use crate::emitter::{Artifacts, CanonicalRecord, ClassRecord, Emitter, ExampleRecord};
use crate::error::Error;
use crate::model::{CanonicalPattern, Dataset, PaperPattern};
use crate::normalize::to_identifier;
use crate::relation::{resolve_relations, UNKNOWN};
use crate::report::{GenerationReport, Issue, IssueKind};
use crate::template::Templates;

/// Owner segment used in IRIs when none is configured.
pub const DEFAULT_OWNER: &str = "nicolas";

/// Rendered artifacts and the issues found while producing them.
#[derive(Debug)]
pub struct Generation {
    /// The three output buffers.
    pub artifacts: Artifacts,
    /// Counts and recoverable issues.
    pub report: GenerationReport,
}

/// Renders every record of `dataset`.
///
/// Recoverable problems are collected in the returned report.
///
/// # Errors
///
/// Returns [`Error::Render`] if a template cannot be filled; templates
/// loaded through [`Templates::load`] are already validated, so this only
/// happens for hand-built template sets.
pub fn generate(
    dataset: &Dataset,
    templates: &Templates,
    owner: &str,
) -> Result<Generation, Error> {
    let catalog = Catalog::new(dataset);
    info!(
        papers = dataset.papers.len(),
        paper_patterns = dataset.paper_patterns.len(),
        canonical_patterns = dataset.canonical_patterns.len(),
        aliases = catalog.aliases().len(),
        "generating ontology"
    );

    let mut emitter = Emitter::new(templates, owner);
    let mut report = GenerationReport::new();

    for pattern in &dataset.canonical_patterns {
        emit_canonical(&mut emitter, &mut report, pattern)?;
    }
    for pattern in &dataset.paper_patterns {
        emit_example(&catalog, &mut emitter, &mut report, pattern)?;
    }

    info!(
        classes = report.classes,
        canonicals = report.canonicals,
        examples = report.examples,
        relations = report.relations,
        warnings = report.warning_count(),
        errors = report.error_count(),
        "generation finished"
    );
    Ok(Generation {
        artifacts: emitter.finish(),
        report,
    })
}

fn emit_canonical(
    emitter: &mut Emitter<'_>,
    report: &mut GenerationReport,
    pattern: &CanonicalPattern,
) -> Result<(), Error> {
    let uri = to_identifier(&pattern.name);
    debug!(%uri, "canonical pattern");

    match classify(pattern) {
        Ok(category) => {
            emitter.class(&ClassRecord {
                uri: &uri,
                name: &pattern.name,
                category: &category,
            })?;
            report.classes += 1;
        }
        Err(missing) => report.push(Issue::new(
            IssueKind::MissingCategoryFallback,
            format!("canonical pattern {:?}", pattern.name),
            format!(
                "type `{}` needs a subcategory or subsubcategory; class record skipped",
                missing.normalized_type
            ),
        )),
    }

    emitter.canonical(&CanonicalRecord {
        uri: &uri,
        name: &pattern.name,
        technology: &to_identifier(&pattern.technology),
        domain: &to_identifier(&pattern.domain),
    })?;
    report.canonicals += 1;
    Ok(())
}

fn emit_example(
    catalog: &Catalog<'_>,
    emitter: &mut Emitter<'_>,
    report: &mut GenerationReport,
    pattern: &PaperPattern,
) -> Result<(), Error> {
    let record = format!("paper pattern {} ({})", pattern.id, pattern.name);
    let uri = to_identifier(&pattern.name);
    debug!(id = %pattern.id, %uri, "paper pattern");

    if let Err(missing) = classify(pattern) {
        report.push(Issue::new(
            IssueKind::MissingCategoryFallback,
            record.clone(),
            format!(
                "type `{}` needs a subcategory or subsubcategory",
                missing.normalized_type
            ),
        ));
    }

    let (author, year) = match catalog.paper(&pattern.paper) {
        Some(paper) => (paper.first_author(), paper.year.as_str()),
        None => {
            report.push(Issue::new(
                IssueKind::DanglingPaperReference,
                record.clone(),
                format!("no paper with ID {}", pattern.paper),
            ));
            ("", "")
        }
    };

    let ref_class = match catalog.aliases().canonical_for(&uri) {
        Some(canonical) => canonical,
        None => {
            report.push(Issue::new(
                IssueKind::UnmappedExample,
                record.clone(),
                format!("`{uri}` is not a canonical pattern name or alias"),
            ));
            UNKNOWN
        }
    };

    let resolution = resolve_relations(catalog, pattern);
    for (kind, failure) in &resolution.failures {
        report.push(
            Issue::new(failure.issue_kind(), record.clone(), failure.to_string())
                .with_detail(format!("field: {kind}")),
        );
    }

    emitter.example(&ExampleRecord {
        uri: &uri,
        name: &pattern.name,
        technology: &to_identifier(&pattern.technology),
        domain: &to_identifier(&pattern.domain),
        ref_class,
        context: &pattern.context_literal(),
        solution: &pattern.solution_literal(),
        author,
        year,
        relations: &resolution.relations,
    })?;
    report.examples += 1;
    report.relations += resolution.relations.len();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::InMemorySource;

    fn templates() -> Templates {
        let source = InMemorySource::new()
            .with("class", "C $uri < $category\n")
            .with("canonical", "K ${uri}Canonical : $refClass [$technology/$domain]\n")
            .with(
                "paper",
                "E ${uri}${author}${year} : $refClass \"$context\" \"$solution\"\n$links",
            )
            .with("relation", "  $relation $value\n");
        Templates::load(&source).expect("valid")
    }

    const DATA: &str = r#"{
        "Papers": [
            { "ID": "1", "author": "Smith, J.", "year": "2019" },
            { "ID": "2", "author": "Doe, K.", "year": "2020" }
        ],
        "Canonical patterns": [
            { "Name": "Retry", "Type (determined)": "Design Pattern",
              "Subcategory": "Resilience", "Target (generalized)": "cloud native",
              "Applicability domain (generalized)": "micro-services",
              "Alternative names": "Retry policy" },
            { "Name": "Saga", "Type (determined)": "Architectural pattern" },
            { "Name": "Mystery", "Type (determined)": "Other" }
        ],
        "Paper patterns": [
            { "ID": "7", "Paper": "1", "Name": "Retry!Policy",
              "Type (determined)": "Design Pattern", "Subcategory": "Resilience",
              "Target": "AWS", "Applicability domain": "IoT",
              "Context & Problem": "He said \"fast\"" },
            { "ID": "8", "Paper": "2", "Name": "Saga",
              "Type (determined)": "Architectural pattern",
              "Related to": "7, Retry, Bulkhead",
              "Requires": "99" },
            { "ID": "9", "Paper": "3", "Name": "Lonely",
              "Type (determined)": "Idiom" }
        ]
    }"#;

    fn run() -> Generation {
        let dataset = Dataset::from_json_str(DATA).expect("valid dataset");
        generate(&dataset, &templates(), DEFAULT_OWNER).expect("renders")
    }

    #[test]
    fn classes_use_category_fallback() {
        let generation = run();
        assert_eq!(
            generation.artifacts.classes,
            "C Retry < Resilience\nC Saga < ArchitecturalPattern\n"
        );
        assert_eq!(generation.report.classes, 2);
    }

    #[test]
    fn every_canonical_gets_an_individual() {
        let generation = run();
        assert_eq!(
            generation.artifacts.canonicals,
            "K RetryCanonical : Retry [CloudNative/MicroServices]\n\
             K SagaCanonical : Saga [/]\n\
             K MysteryCanonical : Mystery [/]\n"
        );
        assert_eq!(generation.report.canonicals, 3);
    }

    #[test]
    fn examples_resolve_classes_and_relations() {
        let generation = run();
        assert_eq!(
            generation.artifacts.examples,
            "E RetryPolicySmith2019 : Retry \"He said fast\" \"\"\n\
             E SagaDoe2020 : Saga \"\" \"\"\n  \
             relatedTo RetryPolicySmith2019\n  \
             relatedTo RetryCanonical\n  \
             relatedTo Unknown\n  \
             requires Unknown\n\
             E Lonely : Unknown \"\" \"\"\n"
        );
        assert_eq!(generation.report.examples, 3);
        assert_eq!(generation.report.relations, 4);
    }

    #[test]
    fn issues_are_attributed_to_records() {
        let report = run().report;
        let summary: Vec<_> = report
            .issues
            .iter()
            .map(|issue| (issue.kind, issue.record.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                (IssueKind::MissingCategoryFallback, "canonical pattern \"Mystery\""),
                (IssueKind::UnresolvedReference, "paper pattern 8 (Saga)"),
                (IssueKind::DanglingNumericReference, "paper pattern 8 (Saga)"),
                (IssueKind::DanglingPaperReference, "paper pattern 9 (Lonely)"),
                (IssueKind::UnmappedExample, "paper pattern 9 (Lonely)"),
            ]
        );
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.error_count(), 4);
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let generation =
            generate(&Dataset::default(), &templates(), DEFAULT_OWNER).expect("renders");
        assert_eq!(generation.artifacts, Artifacts::default());
        assert!(generation.report.is_clean());
    }
}
