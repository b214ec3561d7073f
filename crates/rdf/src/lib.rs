//! Subject–predicate–object statements and the queries run against them.
//!
//! A Gutenberg catalog record is an RDF/XML document. This crate turns one
//! record into a [`TripleSet`] via [`parse_rdfxml`] (or the buffering
//! [`TripleSet::read_rdfxml`]) and provides the selection primitives the
//! entity builders are written in terms of:
//!
//! - [`TripleSet::select`] filters by subject and predicate predicates,
//!   preserving document order,
//! - [`vocab`] names the namespaces and terms the catalog uses.
//!
//! Objects are flattened to plain strings: literals keep their lexical value,
//! IRIs their address and blank nodes their `_:id` label (matching the label
//! used when the same blank node appears as a subject).

pub mod error;
mod parse;
mod set;
mod triple;
pub mod vocab;

pub use crate::parse::parse_rdfxml;
pub use crate::set::TripleSet;
pub use crate::triple::Triple;
