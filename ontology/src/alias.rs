//! Alias table: every known name of a canonical pattern → its identifier.

use std::collections::HashMap;

use crate::model::CanonicalPattern;
use crate::normalize::to_identifier;

/// Maps normalized alias identifiers to normalized canonical identifiers.
///
/// Each canonical pattern contributes its alternative names and its own
/// name. A key claimed twice keeps the last pattern that claimed it.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Builds the table from the canonical set, in dataset order.
    #[must_use]
    pub fn build(canonicals: &[CanonicalPattern]) -> Self {
        let mut entries = HashMap::new();
        for pattern in canonicals {
            let canonical = to_identifier(&pattern.name);
            for alias in pattern.aliases() {
                let key = to_identifier(alias);
                if let Some(previous) = entries.insert(key.clone(), canonical.clone()) {
                    if previous != canonical {
                        tracing::debug!(alias = %key, %previous, %canonical, "alias reassigned");
                    }
                }
            }
            entries.insert(canonical.clone(), canonical);
        }
        Self { entries }
    }

    /// Looks up an already-normalized identifier.
    #[must_use]
    pub fn canonical_for(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    /// Normalizes `name` and looks it up.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.canonical_for(&to_identifier(name))
    }

    /// Iterates `(alias, canonical)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no canonical patterns were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
