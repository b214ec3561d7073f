use super::parse;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::Creator;
use exn::{OptionExt, ResultExt};
use pgmirror_rdf::{TripleSet, vocab};
use tracing::instrument;

/// Resolve every creator referenced anywhere in `triples`.
///
/// Creator references are collected from `creator` triples regardless of
/// subject, so the scope of `triples` decides which books' creators are
/// returned. Order follows first appearance; an address referenced twice
/// yields one creator.
///
/// # Errors
///
/// Fails the whole call if any referenced address has no numeric tail or no
/// name.
#[instrument(level = "trace", skip(triples), fields(triples = triples.len()))]
pub fn creators(triples: &TripleSet) -> Result<Vec<Creator>> {
    let mut addresses: Vec<&str> = Vec::new();
    for triple in triples.select(|_| true, |p| vocab::is_term(p, "creator")) {
        if !addresses.contains(&triple.object.as_str()) {
            addresses.push(&triple.object);
        }
    }
    addresses.into_iter().map(|address| creator(triples, address)).collect()
}

fn creator(triples: &TripleSet, address: &str) -> Result<Creator> {
    let digits = consts::TRAILING_DIGITS_REGEX
        .captures(address)
        .and_then(|c| c.get(1))
        .ok_or_raise(|| ErrorKind::ParseError {
            field: "creator",
            value: address.to_string(),
        })?;
    let id = digits.as_str().parse::<u64>().or_raise(|| ErrorKind::ParseError {
        field: "creator",
        value: address.to_string(),
    })?;
    let property = |local: &'static str| triples.first(address, |p| vocab::is_term(p, local)).map(|t| t.object.as_str());
    let name = property("name").ok_or_raise(|| ErrorKind::UnresolvedReference {
        field: "creator name",
        address: address.to_string(),
    })?;
    // Dates like "c. 1800" are common enough that they can't fail the record.
    let year = |local: &'static str| {
        property(local).and_then(parse::leading_integer).and_then(|year| i32::try_from(year).ok())
    };
    Ok(Creator {
        id,
        name: name.to_string(),
        birth_year: year("birthdate"),
        death_year: year("deathdate"),
        webpage: property("webpage").map(str::to_string),
    })
}
