//! Namespaces and terms used by the Gutenberg catalog.
//!
//! Catalog terms are recognised in either the DCMI terms or the Gutenberg
//! `pgterms` namespace: the published dumps put `language`, `issued` and
//! `rights` under DCMI, while some derived exports use `pgterms` for all of
//! them.

use regex::Regex;
use std::sync::LazyLock;

/// DCMI metadata terms.
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
/// Project Gutenberg terms.
pub const PGTERMS: &str = "http://www.gutenberg.org/2009/pgterms/";
/// RDF syntax namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Base address of creator (agent) resources; the id is appended.
pub const AGENTS: &str = "http://www.gutenberg.org/2009/agents/";

static LOCAL_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/#](\w+)$").unwrap());

/// Full address of `local` in the DCMI terms namespace.
pub fn dc(local: &str) -> String {
    format!("{DCTERMS}{local}")
}

/// Full address of `local` in the Gutenberg terms namespace.
pub fn pg(local: &str) -> String {
    format!("{PGTERMS}{local}")
}

/// Returns `true` if `predicate` is the catalog term `local` in either the
/// DCMI or the Gutenberg namespace.
pub fn is_term(predicate: &str, local: &str) -> bool {
    [DCTERMS, PGTERMS]
        .iter()
        .any(|ns| predicate.strip_prefix(ns).is_some_and(|rest| rest == local))
}

/// Returns `true` for `rdf:value`-style predicates (anything ending `#value`).
pub fn is_value(predicate: &str) -> bool {
    predicate.ends_with("#value")
}

/// Returns `true` for predicates whose local name is `type` (`rdf:type`,
/// `pgterms:type`, ...).
pub fn is_type(predicate: &str) -> bool {
    predicate.ends_with("#type") || predicate.ends_with("/type")
}

/// The last path or fragment segment of `uri`, if it consists of word
/// characters only.
///
/// ```
/// use pgmirror_rdf::vocab::local_name;
///
/// assert_eq!(local_name("http://www.gutenberg.org/2009/pgterms/ebook"), Some("ebook"));
/// assert_eq!(local_name("http://example.org/"), None);
/// ```
pub fn local_name(uri: &str) -> Option<&str> {
    LOCAL_NAME_REGEX.captures(uri).and_then(|c| c.get(1)).map(|m| m.as_str())
}
