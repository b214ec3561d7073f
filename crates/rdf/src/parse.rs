//! RDF/XML adapter over [`oxrdfxml`].

use crate::error::{ErrorKind, Result};
use crate::{Triple, TripleSet};
use exn::ResultExt;
use oxrdf::Term;
use oxrdfxml::RdfXmlParser;
use std::io::Read;
use tracing::instrument;

/// Lazily parse RDF/XML from `reader` into [`Triple`]s.
///
/// The reader is consumed incrementally as the iterator is advanced. A
/// syntax error is yielded as an `Err` item; the caller decides whether to
/// keep pulling.
pub fn parse_rdfxml<R: Read>(reader: R) -> impl Iterator<Item = Result<Triple>> {
    RdfXmlParser::new().for_reader(reader).map(|parsed| {
        let triple = parsed.or_raise(|| ErrorKind::Syntax)?;
        Ok(Triple {
            subject: node_value(triple.subject.to_string()),
            predicate: triple.predicate.into_string(),
            object: term_value(triple.object),
        })
    })
}

impl TripleSet {
    /// Buffer a whole RDF/XML record. The first syntax error abandons the
    /// record.
    #[instrument(level = "trace", skip(reader))]
    pub fn read_rdfxml<R: Read>(reader: R) -> Result<Self> {
        parse_rdfxml(reader).collect()
    }
}

/// Named nodes render as `<iri>` and blank nodes as `_:id`; keep the IRI
/// without brackets and the blank node label as-is.
fn node_value(rendered: String) -> String {
    match rendered.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(iri) => iri.to_string(),
        None => rendered,
    }
}

fn term_value(term: Term) -> String {
    #[allow(unreachable_patterns)]
    match term {
        Term::NamedNode(node) => node.into_string(),
        Term::BlankNode(node) => node.to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        other => other.to_string(),
    }
}
