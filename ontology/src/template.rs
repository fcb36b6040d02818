//! Record templates.
//!
//! Templates are plain text with `$name` / `${name}` placeholders and `$$`
//! for a literal dollar sign. They are parsed once at load time and each
//! placeholder is checked against the fields its [`TemplateKind`] provides,
//! so a bad template aborts the run before any record is processed.
//!
//! Substitution is a single pass over the parsed template. Values are
//! inserted verbatim and never rescanned, so `$` or `{}` inside author names
//! or context text stays literal.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Error;

/// The four template shapes the emitter fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Class declaration for a canonical pattern.
    Class,
    /// Canonical individual declaration.
    Canonical,
    /// Paper-example individual declaration.
    Paper,
    /// One relation line inside a paper example.
    Relation,
}

impl TemplateKind {
    /// All kinds, in load order.
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Class,
        TemplateKind::Canonical,
        TemplateKind::Paper,
        TemplateKind::Relation,
    ];

    /// Name used to fetch the template from a [`TemplateSource`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Class => "class",
            TemplateKind::Canonical => "canonical",
            TemplateKind::Paper => "paper",
            TemplateKind::Relation => "relation",
        }
    }

    /// Placeholders this kind of template may reference.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Class => &["owner", "uri", "name", "category"],
            TemplateKind::Canonical => &[
                "owner",
                "uri",
                "name",
                "technology",
                "domain",
                "refClass",
                "examples",
                "context",
                "solution",
            ],
            TemplateKind::Paper => &[
                "owner",
                "uri",
                "name",
                "technology",
                "domain",
                "refClass",
                "context",
                "solution",
                "author",
                "year",
                "links",
            ],
            TemplateKind::Relation => &["owner", "relation", "value"],
        }
    }
}

/// Why a template could not be parsed or rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `$` not followed by `$`, an identifier, or a braced identifier.
    #[error("invalid placeholder at byte {offset}")]
    InvalidPlaceholder {
        /// Byte offset of the `$`.
        offset: usize,
    },
    /// A placeholder the template kind does not provide.
    #[error("unknown placeholder `{0}`")]
    UnknownPlaceholder(String),
    /// No value was supplied for a placeholder during rendering.
    #[error("no value for placeholder `{0}`")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses template text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidPlaceholder`] for a dangling or
    /// malformed `$`.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;
        let mut offset = 0;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let dollar_at = offset + pos;

            let (field, consumed) = if after.starts_with('$') {
                literal.push('$');
                (None, 1)
            } else if let Some(braced) = after.strip_prefix('{') {
                let close = braced
                    .find('}')
                    .ok_or(TemplateError::InvalidPlaceholder { offset: dollar_at })?;
                let name = &braced[..close];
                if !is_identifier(name) {
                    return Err(TemplateError::InvalidPlaceholder { offset: dollar_at });
                }
                (Some(name), close + 2)
            } else {
                let len = identifier_len(after);
                if len == 0 {
                    return Err(TemplateError::InvalidPlaceholder { offset: dollar_at });
                }
                (Some(&after[..len]), len)
            };

            if let Some(name) = field {
                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(name.to_string()));
            }

            let advance = pos + 1 + consumed;
            rest = &rest[advance..];
            offset += advance;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }
        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Substitutes `values` into the template.
    ///
    /// Entries not referenced by the template are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] if a placeholder has no value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| TemplateError::MissingValue(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c.is_ascii_alphanumeric()
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_len(s) == s.len()
}

/// Where templates come from.
pub trait TemplateSource {
    /// Returns the raw text of the named template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateRead`] if the template does not exist or
    /// cannot be read.
    fn fetch(&self, name: &str) -> Result<String, Error>;
}

/// Reads `<dir>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateSource for DirectorySource {
    fn fetch(&self, name: &str) -> Result<String, Error> {
        let path = self.dir.join(format!("{name}.txt"));
        std::fs::read_to_string(&path).map_err(|source| Error::TemplateRead {
            name: name.to_string(),
            location: path,
            source,
        })
    }
}

/// Templates held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    templates: HashMap<String, String>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a template.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates.insert(name.into(), text.into());
        self
    }
}

impl TemplateSource for InMemorySource {
    fn fetch(&self, name: &str) -> Result<String, Error> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TemplateRead {
                name: name.to_string(),
                location: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such template"),
            })
    }
}

/// The default templates shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl TemplateSource for BuiltinSource {
    fn fetch(&self, name: &str) -> Result<String, Error> {
        let text = match name {
            "class" => include_str!("../templates/class.txt"),
            "canonical" => include_str!("../templates/canonical.txt"),
            "paper" => include_str!("../templates/paper.txt"),
            "relation" => include_str!("../templates/relation.txt"),
            _ => {
                return Err(Error::TemplateRead {
                    name: name.to_string(),
                    location: PathBuf::from("<builtin>"),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no such built-in template",
                    ),
                })
            }
        };
        Ok(text.to_string())
    }
}

/// The full, validated template set.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Class declaration.
    pub class: Template,
    /// Canonical individual.
    pub canonical: Template,
    /// Paper example individual.
    pub paper: Template,
    /// Relation line.
    pub relation: Template,
}

impl Templates {
    /// Fetches, parses and validates every template from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateRead`] if a template is missing and
    /// [`Error::TemplateSyntax`] if one is malformed or references a
    /// placeholder its kind does not provide.
    pub fn load(source: &dyn TemplateSource) -> Result<Self, Error> {
        let [class, canonical, paper, relation] = TemplateKind::ALL;
        Ok(Self {
            class: load_one(source, class)?,
            canonical: load_one(source, canonical)?,
            paper: load_one(source, paper)?,
            relation: load_one(source, relation)?,
        })
    }

    /// Loads the built-in templates.
    ///
    /// # Errors
    ///
    /// Fails only if the shipped templates are themselves invalid.
    pub fn builtin() -> Result<Self, Error> {
        Self::load(&BuiltinSource)
    }
}

fn load_one(source: &dyn TemplateSource, kind: TemplateKind) -> Result<Template, Error> {
    let name = kind.name();
    let syntax = |source| Error::TemplateSyntax {
        name: name.to_string(),
        source,
    };
    let template = Template::parse(&source.fetch(name)?).map_err(syntax)?;
    if let Some(unknown) = template
        .placeholders()
        .find(|field| !kind.fields().contains(field))
    {
        return Err(syntax(TemplateError::UnknownPlaceholder(unknown.to_string())));
    }
    tracing::debug!(template = name, "loaded template");
    Ok(template)
}
