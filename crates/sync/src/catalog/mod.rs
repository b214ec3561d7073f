//! Catalog Sinks
//!
//! Where reconstructed books end up. The synchronizer only ever upserts by
//! book ID, so a record seen again in a later pass replaces the earlier copy.

mod jsonl;
mod memory;

use crate::error::Result;
use async_trait::async_trait;
use pgmirror_catalog::models::Book;
use std::sync::Arc;

pub use self::jsonl::JsonLinesCatalog;
pub use self::memory::MemoryCatalog;

/// Shared, dynamically-dispatched catalog.
pub type CatalogHandle = Arc<dyn Catalog>;

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Human-readable identifier, used in logs.
    fn name(&self) -> &str;

    /// Insert `book`, replacing any existing book with the same ID.
    async fn upsert(&self, book: Book) -> Result<()>;

    /// Make everything upserted so far durable. Called once per completed pass.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
