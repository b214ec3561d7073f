use crate::catalog::Catalog;
use crate::error::Result;
use async_trait::async_trait;
use pgmirror_catalog::models::Book;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Keeps the catalog in memory, keyed by book ID.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    books: RwLock<BTreeMap<u64, Book>>,
    upserts: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: u64) -> Option<Book> {
        self.books.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// Stored IDs, ascending.
    pub async fn ids(&self) -> Vec<u64> {
        self.books.read().await.keys().copied().collect()
    }

    /// Upserts received, including ones that replaced an existing book.
    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upsert(&self, book: Book) -> Result<()> {
        self.books.write().await.insert(book.id, book);
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgmirror_rdf::TripleSet;
    use pgmirror_rdf::vocab::{dc, pg};

    fn book(id: u64, title: &str) -> Book {
        let uri = format!("http://www.gutenberg.org/ebooks/{id}");
        let record: TripleSet = [
            (uri.clone(), dc("title"), title.to_string()),
            (uri, pg("type"), "http://www.gutenberg.org/ebooks/type/Text".to_string()),
        ]
        .into_iter()
        .collect();
        pgmirror_catalog::build(&record).unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let catalog = MemoryCatalog::new();
        catalog.upsert(book(15, "Moby Dick")).await.unwrap();
        catalog.upsert(book(11, "Alice")).await.unwrap();
        catalog.upsert(book(15, "Moby-Dick")).await.unwrap();

        assert_eq!(catalog.ids().await, vec![11, 15]);
        assert_eq!(catalog.len().await, 2);
        assert_eq!(catalog.get(15).await.unwrap().title, "Moby-Dick");
        assert_eq!(catalog.upserts(), 3);
        assert!(catalog.get(99).await.is_none());
    }
}
