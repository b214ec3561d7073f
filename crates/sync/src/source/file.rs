use crate::error::{ErrorKind, Result};
use crate::source::{ChangeMarker, Download, Source};
use async_trait::async_trait;
use exn::ResultExt;
use std::io::BufReader;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Reads the archive from the local filesystem.
///
/// The change marker combines modification time and size, so replacing the
/// file with a newer download is noticed on the next pass.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

#[async_trait]
impl Source for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Download> {
        let file = tokio::fs::File::open(&self.path).await.or_raise(|| ErrorKind::Io)?;
        let metadata = file.metadata().await.or_raise(|| ErrorKind::Io)?;
        if !metadata.is_file() {
            exn::bail!(ErrorKind::Archive);
        }

        let marker = metadata
            .modified()
            .ok()
            .and_then(|modified| OffsetDateTime::from(modified).format(&Rfc3339).ok())
            .map(|modified| ChangeMarker::new(format!("{modified}+{}", metadata.len())));

        Ok(Download {
            marker,
            body: Box::new(BufReader::new(file.into_std().await)),
        })
    }
}
