//! End-to-end builds against files on disk.

use std::fs;
use std::path::Path;

use slr_ontology::{build, BuildOptions, Error, IssueKind};

const DATASET: &str = r#"{
    "Papers": [
        { "ID": "1", "author": "Smith, J.", "year": "2019" },
        { "ID": "2", "author": "Nguyen, T., Okafor, C.", "year": 2022 }
    ],
    "Canonical patterns": [
        { "Name": "Circuit Breaker", "Type (determined)": "Design pattern",
          "Subcategory": "Resilience", "Subsubcategory": "Fault isolation",
          "Target (generalized)": "Cloud", "Applicability domain (generalized)": "Microservices",
          "Alternative names": "CB, Breaker" },
        { "Name": "BPM Pipeline", "Type (determined)": "Architectural pattern",
          "Target (generalized)": "Workflow engines",
          "Applicability domain (generalized)": "Business processes" },
        { "Name": "Retry", "Type (determined)": "Idiom",
          "Target (generalized)": "Cloud", "Applicability domain (generalized)": "Distributed systems" }
    ],
    "Paper patterns": [
        { "ID": "7", "Paper": "1", "Name": "Retry",
          "Type (determined)": "Design pattern", "Subcategory": "Resilience",
          "Target": "AWS Lambda", "Applicability domain": "Serverless",
          "Context & Problem": "Calls \"sometimes\" fail", "Solution": "Retry with $backoff" },
        { "ID": "8", "Paper": "2", "Name": "CB",
          "Type (determined)": "Design pattern", "Subcategory": "Resilience",
          "Target": "Kubernetes", "Applicability domain": "Microservices",
          "From pattern": "7", "Related to": "Circuit Breaker, Bulkhead" }
    ]
}"#;

fn setup(dir: &Path) -> BuildOptions {
    let dataset = dir.join("patterns_data.json");
    fs::write(&dataset, DATASET).expect("write dataset");
    BuildOptions {
        dataset,
        out_dir: dir.join("results"),
        ..BuildOptions::default()
    }
}

fn write_templates(dir: &Path) {
    fs::create_dir_all(dir).expect("templates dir");
    fs::write(dir.join("class.txt"), "$owner:$uri subClassOf $category\n").unwrap();
    fs::write(dir.join("canonical.txt"), "${uri}Canonical a $refClass\n").unwrap();
    fs::write(
        dir.join("paper.txt"),
        "${uri}${author}${year} a $refClass ; context \"$context\" ; solution \"$solution\"\n$links",
    )
    .unwrap();
    fs::write(dir.join("relation.txt"), "  $relation $value\n").unwrap();
}

#[test]
fn builds_with_builtin_templates() {
    let dir = tempfile::tempdir().unwrap();
    let options = setup(dir.path());
    let outcome = build(&options).expect("build succeeds");

    assert_eq!(outcome.written.len(), 3);
    assert!(!outcome.withheld);

    let classes = fs::read_to_string(options.out_dir.join("classes.ttl")).unwrap();
    assert!(classes.contains("patterns#CircuitBreaker> rdf:type owl:Class"));
    assert!(classes.contains("patterns#FaultIsolation>"));
    assert!(classes.contains("patterns#BPMPipeline>"));
    assert!(classes.contains("http://www.semanticweb.org/nicolas/ontologies/2021/8/patterns#"));

    let canonicals = fs::read_to_string(options.out_dir.join("canonicals.ttl")).unwrap();
    assert!(canonicals.contains("patterns#CircuitBreakerCanonical>"));
    assert!(canonicals.contains("patterns#WorkflowEngines>"));

    let examples = fs::read_to_string(options.out_dir.join("examples.ttl")).unwrap();
    assert!(examples.contains("patterns#RetrySmith2019>"));
    assert!(examples.contains("patterns#CbNguyen2022>"));
    assert!(examples.contains("\"Calls sometimes fail\""));
    assert!(examples.contains("\"Retry with $backoff\""));
    assert!(examples.contains("patterns#fromPattern> <http://www.semanticweb.org/nicolas/ontologies/2021/8/patterns#RetrySmith2019>"));
    assert!(examples.contains("patterns#relatedTo> <http://www.semanticweb.org/nicolas/ontologies/2021/8/patterns#CircuitBreakerCanonical>"));
    assert!(examples.contains("patterns#relatedTo> <http://www.semanticweb.org/nicolas/ontologies/2021/8/patterns#Unknown>"));

    let unresolved: Vec<_> = outcome.report.of_kind(IssueKind::UnresolvedReference).collect();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(outcome.report.error_count(), 0);
}

#[test]
fn builds_with_template_directory_and_owner() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    write_templates(&templates);
    let options = BuildOptions {
        templates: Some(templates),
        owner: "alice".into(),
        ..setup(dir.path())
    };
    build(&options).expect("build succeeds");

    let classes = fs::read_to_string(options.out_dir.join("classes.ttl")).unwrap();
    assert_eq!(
        classes,
        "alice:CircuitBreaker subClassOf FaultIsolation\n\
         alice:BPMPipeline subClassOf ArchitecturalPattern\n\
         alice:Retry subClassOf Idiom\n"
    );
    let examples = fs::read_to_string(options.out_dir.join("examples.ttl")).unwrap();
    assert_eq!(
        examples,
        "RetrySmith2019 a Retry ; context \"Calls sometimes fail\" ; solution \"Retry with $backoff\"\n\
         CbNguyen2022 a CircuitBreaker ; context \"\" ; solution \"\"\n  \
         fromPattern RetrySmith2019\n  \
         relatedTo CircuitBreakerCanonical\n  \
         relatedTo Unknown\n"
    );
}

#[test]
fn missing_template_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    write_templates(&templates);
    fs::remove_file(templates.join("relation.txt")).unwrap();

    let options = BuildOptions {
        templates: Some(templates),
        ..setup(dir.path())
    };
    let err = build(&options).unwrap_err();
    assert!(matches!(err, Error::TemplateRead { ref name, .. } if name == "relation"));
    assert!(!options.out_dir.exists());
}

#[test]
fn fatal_error_leaves_previous_output_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let options = setup(dir.path());
    fs::create_dir_all(&options.out_dir).unwrap();
    fs::write(options.out_dir.join("classes.ttl"), "previous").unwrap();
    fs::write(&options.dataset, "{ \"Papers\": [").unwrap();

    let err = build(&options).unwrap_err();
    assert!(matches!(err, Error::DatasetParse { .. }));
    assert_eq!(
        fs::read_to_string(options.out_dir.join("classes.ttl")).unwrap(),
        "previous"
    );
    assert_eq!(fs::read_dir(&options.out_dir).unwrap().count(), 1);
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        dataset: dir.path().join("absent.json"),
        ..setup(dir.path())
    };
    let err = build(&options).unwrap_err();
    assert!(matches!(err, Error::DatasetRead { .. }));
    assert!(!options.out_dir.exists());
}

#[test]
fn strict_mode_withholds_output_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        strict: true,
        ..setup(dir.path())
    };
    fs::write(
        &options.dataset,
        r#"{ "Papers": [], "Canonical patterns": [],
             "Paper patterns": [{ "ID": "1", "Paper": "9", "Name": "Orphan",
                                  "Type (determined)": "Idiom", "Requires": "42" }] }"#,
    )
    .unwrap();

    let outcome = build(&options).expect("issues are not fatal");
    assert!(outcome.withheld);
    assert!(outcome.written.is_empty());
    assert!(!options.out_dir.exists());
    assert_eq!(outcome.report.of_kind(IssueKind::DanglingPaperReference).count(), 1);
    assert_eq!(outcome.report.of_kind(IssueKind::UnmappedExample).count(), 1);
    assert_eq!(outcome.report.of_kind(IssueKind::DanglingNumericReference).count(), 1);
}

#[test]
fn warnings_do_not_trigger_strict_mode() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        strict: true,
        ..setup(dir.path())
    };
    let outcome = build(&options).expect("build succeeds");
    assert_eq!(outcome.report.warning_count(), 1);
    assert!(!outcome.withheld);
    assert_eq!(outcome.written.len(), 3);
}

#[cfg(unix)]
#[test]
fn artifacts_stay_readable_by_other_users() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let options = setup(dir.path());
    fs::create_dir_all(&options.out_dir).unwrap();
    let classes = options.out_dir.join("classes.ttl");
    fs::write(&classes, "previous").unwrap();
    fs::set_permissions(&classes, fs::Permissions::from_mode(0o644)).unwrap();

    let outcome = build(&options).expect("build succeeds");
    for path in &outcome.written {
        let mode = fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "{}", path.display());
    }
}
