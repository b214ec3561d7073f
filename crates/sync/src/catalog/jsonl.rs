use crate::catalog::Catalog;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use pgmirror_catalog::models::Book;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Appends every upserted book to a JSON Lines file.
///
/// The file is a change log rather than a snapshot: a book upserted twice
/// appears twice, and readers should keep the last line per ID.
#[derive(Debug)]
pub struct JsonLinesCatalog {
    name: String,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesCatalog {
    /// Open `path` for appending, creating it if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .or_raise(|| ErrorKind::Io)?;
        Ok(Self {
            name: path.display().to_string(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

#[async_trait]
impl Catalog for JsonLinesCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, book: Book) -> Result<()> {
        let mut line = serde_json::to_vec(&book).or_raise(|| ErrorKind::Catalog)?;
        line.push(b'\n');
        self.writer.lock().await.write_all(&line).await.or_raise(|| ErrorKind::Io)
    }

    async fn flush(&self) -> Result<()> {
        self.writer.lock().await.flush().await.or_raise(|| ErrorKind::Io)
    }
}
