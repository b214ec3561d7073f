//! Streaming mirror of the Gutenberg catalog archive.
//!
//! A [`Synchronizer`] pulls the `rdf-files` archive from a [`Source`],
//! streams it through decompression and tar extraction without touching
//! disk, routes each entry through the [`EntryRouter`], and upserts every
//! reconstructed book into a [`Catalog`]. [`schedule::run`] repeats that on a
//! fixed period.
//!
//! [`Source`]: source::Source
//! [`Catalog`]: catalog::Catalog

pub mod archive;
pub mod catalog;
pub mod error;
mod pipeline;
pub mod router;
pub mod schedule;
pub mod source;
mod synchronizer;
#[cfg(test)]
mod testutil;

pub use crate::router::EntryRouter;
pub use crate::synchronizer::{PassOutcome, PassReport, SyncOptions, Synchronizer};
