//! Record emission into the three output buffers.

use crate::error::Error;
use crate::relation::ResolvedRelation;
use crate::template::{Template, Templates};

/// The three rendered artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    /// Class declarations.
    pub classes: String,
    /// Canonical individuals.
    pub canonicals: String,
    /// Paper example individuals.
    pub examples: String,
}

impl Artifacts {
    /// File name and content of each artifact, in write order.
    #[must_use]
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            ("classes.ttl", self.classes.as_str()),
            ("canonicals.ttl", self.canonicals.as_str()),
            ("examples.ttl", self.examples.as_str()),
        ]
    }
}

/// Fields of a class declaration.
#[derive(Debug, Clone, Copy)]
pub struct ClassRecord<'a> {
    /// Class identifier.
    pub uri: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Parent category identifier.
    pub category: &'a str,
}

/// Fields of a canonical individual.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalRecord<'a> {
    /// Canonical identifier (also the class it instantiates).
    pub uri: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Normalized generalized technology.
    pub technology: &'a str,
    /// Normalized generalized domain.
    pub domain: &'a str,
}

/// Fields of a paper example individual.
#[derive(Debug, Clone, Copy)]
pub struct ExampleRecord<'a> {
    /// Normalized pattern name.
    pub uri: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Normalized technology.
    pub technology: &'a str,
    /// Normalized domain.
    pub domain: &'a str,
    /// Canonical class this example instantiates.
    pub ref_class: &'a str,
    /// Context text, quotes already stripped.
    pub context: &'a str,
    /// Solution text, quotes already stripped.
    pub solution: &'a str,
    /// First author surname.
    pub author: &'a str,
    /// Publication year.
    pub year: &'a str,
    /// Resolved relations, in emission order.
    pub relations: &'a [ResolvedRelation],
}

/// Fills templates and accumulates the results in processing order.
#[derive(Debug)]
pub struct Emitter<'t> {
    templates: &'t Templates,
    owner: &'t str,
    artifacts: Artifacts,
}

impl<'t> Emitter<'t> {
    /// Creates an emitter with empty buffers.
    #[must_use]
    pub fn new(templates: &'t Templates, owner: &'t str) -> Self {
        Self {
            templates,
            owner,
            artifacts: Artifacts::default(),
        }
    }

    /// Appends a class declaration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the template cannot be filled.
    pub fn class(&mut self, record: &ClassRecord<'_>) -> Result<(), Error> {
        let text = render(
            &self.templates.class,
            "class",
            record.name,
            &[
                ("owner", self.owner),
                ("uri", record.uri),
                ("name", record.name),
                ("category", record.category),
            ],
        )?;
        self.artifacts.classes.push_str(&text);
        Ok(())
    }

    /// Appends a canonical individual.
    ///
    /// `examples`, `context` and `solution` are reserved and always empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the template cannot be filled.
    pub fn canonical(&mut self, record: &CanonicalRecord<'_>) -> Result<(), Error> {
        let text = render(
            &self.templates.canonical,
            "canonical",
            record.name,
            &[
                ("owner", self.owner),
                ("uri", record.uri),
                ("name", record.name),
                ("technology", record.technology),
                ("domain", record.domain),
                ("refClass", record.uri),
                ("examples", ""),
                ("context", ""),
                ("solution", ""),
            ],
        )?;
        self.artifacts.canonicals.push_str(&text);
        Ok(())
    }

    /// Appends a paper example individual with its relation block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a template cannot be filled.
    pub fn example(&mut self, record: &ExampleRecord<'_>) -> Result<(), Error> {
        let links = self.links(record.name, record.relations)?;
        let text = render(
            &self.templates.paper,
            "paper",
            record.name,
            &[
                ("owner", self.owner),
                ("uri", record.uri),
                ("name", record.name),
                ("technology", record.technology),
                ("domain", record.domain),
                ("refClass", record.ref_class),
                ("context", record.context),
                ("solution", record.solution),
                ("author", record.author),
                ("year", record.year),
                ("links", links.as_str()),
            ],
        )?;
        self.artifacts.examples.push_str(&text);
        Ok(())
    }

    fn links(&self, record: &str, relations: &[ResolvedRelation]) -> Result<String, Error> {
        let mut links = String::new();
        for relation in relations {
            links.push_str(&render(
                &self.templates.relation,
                "relation",
                record,
                &[
                    ("owner", self.owner),
                    ("relation", relation.key.as_str()),
                    ("value", relation.target.as_str()),
                ],
            )?);
        }
        Ok(links)
    }

    /// Returns the accumulated buffers.
    #[must_use]
    pub fn finish(self) -> Artifacts {
        self.artifacts
    }
}

fn render(
    template: &Template,
    name: &'static str,
    record: &str,
    values: &[(&str, &str)],
) -> Result<String, Error> {
    template.render(values).map_err(|source| Error::Render {
        template: name,
        record: record.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::RelationKind;
    use crate::template::InMemorySource;

    fn templates() -> Templates {
        let source = InMemorySource::new()
            .with("class", "$owner:$uri<$category[$name]\n")
            .with("canonical", "$uri|$refClass|$technology|$domain|$examples$context$solution\n")
            .with("paper", "${uri}${author}${year}>$refClass{$context}{$solution}\n$links")
            .with("relation", "  $relation=$value\n");
        Templates::load(&source).expect("valid templates")
    }

    #[test]
    fn buffers_accumulate_in_order() {
        let templates = templates();
        let mut emitter = Emitter::new(&templates, "nicolas");
        emitter
            .class(&ClassRecord {
                uri: "Retry",
                name: "Retry",
                category: "Resilience",
            })
            .expect("renders");
        emitter
            .class(&ClassRecord {
                uri: "Saga",
                name: "Saga",
                category: "ArchitecturalPattern",
            })
            .expect("renders");
        emitter
            .canonical(&CanonicalRecord {
                uri: "Retry",
                name: "Retry",
                technology: "Cloud",
                domain: "Web",
            })
            .expect("renders");
        let artifacts = emitter.finish();
        assert_eq!(
            artifacts.classes,
            "nicolas:Retry<Resilience[Retry]\nnicolas:Saga<ArchitecturalPattern[Saga]\n"
        );
        assert_eq!(artifacts.canonicals, "Retry|Retry|Cloud|Web|\n");
        assert!(artifacts.examples.is_empty());
    }

    #[test]
    fn example_carries_its_relation_block() {
        let templates = templates();
        let mut emitter = Emitter::new(&templates, "nicolas");
        let relations = [
            ResolvedRelation {
                kind: RelationKind::FromPattern,
                key: "fromPattern".into(),
                target: "RetrySmith2019".into(),
            },
            ResolvedRelation {
                kind: RelationKind::Requires,
                key: "requires".into(),
                target: "Unknown".into(),
            },
        ];
        emitter
            .example(&ExampleRecord {
                uri: "Backoff",
                name: "Back-off",
                technology: "Cloud",
                domain: "Web",
                ref_class: "Retry",
                context: "costs $5",
                solution: "",
                author: "Doe",
                year: "2021",
                relations: &relations,
            })
            .expect("renders");
        assert_eq!(
            emitter.finish().examples,
            "BackoffDoe2021>Retry{costs $5}{}\n  fromPattern=RetrySmith2019\n  requires=Unknown\n"
        );
    }

    #[test]
    fn artifact_files_are_named() {
        let names: Vec<_> = Artifacts::default().files().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["classes.ttl", "canonicals.ttl", "examples.ttl"]);
    }
}
