//! Name → identifier normalization.
//!
//! Free-text pattern names are split on punctuation and whitespace and
//! re-joined as a single camel-case token. The same token doubles as the
//! entity's identifier and as its alias-table key, so two names that
//! normalize alike are the same entity.

/// Words copied verbatim instead of being recapitalized.
///
/// Matching is case-sensitive: `"BPM"` is exempt, `"Bpm"` is not.
pub const EXEMPT_WORDS: &[&str] = &["BPM"];

/// Returns true if `c` separates words in a free-text name.
#[must_use]
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '-' | '!' | '?' | ':' | '(' | ')' | '/' | '&' | '*')
}

/// Splits a name into its non-empty word fragments.
pub fn fragments(name: &str) -> impl Iterator<Item = &str> {
    name.split(is_delimiter).filter(|fragment| !fragment.is_empty())
}

/// Normalizes a free-text name into an identifier token.
///
/// ```
/// use slr_ontology::normalize::to_identifier;
///
/// assert_eq!(to_identifier("Model-View, Controller"), "ModelViewController");
/// assert_eq!(to_identifier("BPM Pipeline"), "BPMPipeline");
/// ```
#[must_use]
pub fn to_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for fragment in fragments(name) {
        push_capitalized(&mut out, fragment);
    }
    out
}

/// Normalizes a relation label into a lowerCamelCase predicate token.
///
/// The first word is lowercased unconditionally (the exemption list does not
/// apply to it); the remaining words follow [`to_identifier`].
///
/// ```
/// use slr_ontology::normalize::to_relation_key;
///
/// assert_eq!(to_relation_key("Related to"), "relatedTo");
/// ```
#[must_use]
pub fn to_relation_key(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut words = fragments(label);
    if let Some(first) = words.next() {
        out.push_str(&first.to_lowercase());
    }
    for fragment in words {
        push_capitalized(&mut out, fragment);
    }
    out
}

fn push_capitalized(out: &mut String, word: &str) {
    if EXEMPT_WORDS.contains(&word) {
        out.push_str(word);
        return;
    }
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}
