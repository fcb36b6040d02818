//! Read-only lookup context shared by the resolver and the emitter.

use std::collections::{HashMap, HashSet};

use crate::alias::AliasTable;
use crate::model::{CanonicalPattern, Dataset, Paper, PaperPattern};
use crate::normalize::to_identifier;

/// Indexes over one dataset snapshot.
///
/// Built once per run, after loading and before any record is processed.
/// When identifiers repeat, the first record in dataset order wins.
#[derive(Debug)]
pub struct Catalog<'d> {
    papers: HashMap<&'d str, &'d Paper>,
    paper_patterns: HashMap<&'d str, &'d PaperPattern>,
    canonical_ids: HashSet<String>,
    aliases: AliasTable,
}

impl<'d> Catalog<'d> {
    /// Indexes `dataset`.
    #[must_use]
    pub fn new(dataset: &'d Dataset) -> Self {
        Self::from_parts(
            &dataset.papers,
            &dataset.paper_patterns,
            &dataset.canonical_patterns,
        )
    }

    /// Indexes the three collections directly.
    #[must_use]
    pub fn from_parts(
        papers: &'d [Paper],
        paper_patterns: &'d [PaperPattern],
        canonicals: &'d [CanonicalPattern],
    ) -> Self {
        let mut paper_index = HashMap::with_capacity(papers.len());
        for paper in papers {
            paper_index.entry(paper.id.as_str()).or_insert(paper);
        }
        let mut pattern_index = HashMap::with_capacity(paper_patterns.len());
        for pattern in paper_patterns {
            pattern_index.entry(pattern.id.as_str()).or_insert(pattern);
        }
        Self {
            papers: paper_index,
            paper_patterns: pattern_index,
            canonical_ids: canonicals.iter().map(|c| to_identifier(&c.name)).collect(),
            aliases: AliasTable::build(canonicals),
        }
    }

    /// Finds a paper by exact identifier.
    #[must_use]
    pub fn paper(&self, id: &str) -> Option<&'d Paper> {
        self.papers.get(id).copied()
    }

    /// Finds a paper pattern by exact identifier.
    #[must_use]
    pub fn paper_pattern(&self, id: &str) -> Option<&'d PaperPattern> {
        self.paper_patterns.get(id).copied()
    }

    /// Returns true if `name` normalizes to the name of a canonical pattern.
    ///
    /// Alternative names do not count.
    #[must_use]
    pub fn is_canonical_name(&self, name: &str) -> bool {
        self.canonical_ids.contains(&to_identifier(name))
    }

    /// The alias table for this dataset.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}
