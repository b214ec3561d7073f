//! Archive Sources
//!
//! A [`Source`] hands out one [`Download`] per request: the change marker the
//! origin reported for the archive and a blocking reader over its bytes. The
//! reader is consumed inside `spawn_blocking` by the ingestion pipeline, so
//! sources never buffer the whole archive.

mod file;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

use crate::error::Result;
use async_trait::async_trait;
use derive_more::Display;
use std::io::Read;
use std::sync::Arc;

pub use self::file::FileSource;
pub use self::http::HttpSource;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{Gate, MockSource};

/// Blocking reader over an archive body.
///
/// Must only be read from blocking contexts (`spawn_blocking` or a dedicated
/// thread); readers bridged from async streams panic on a runtime worker.
pub type BoxSyncRead = Box<dyn Read + Send + 'static>;

/// Shared, dynamically-dispatched source.
pub type SourceHandle = Arc<dyn Source>;

/// Opaque validator identifying one version of the archive.
///
/// Two equal markers mean the archive hasn't changed between requests.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct ChangeMarker(String);

impl ChangeMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One response from a [`Source`].
pub struct Download {
    /// `None` when the origin offers no validator; such archives are always
    /// processed.
    pub marker: Option<ChangeMarker>,
    pub body: BoxSyncRead,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download").field("marker", &self.marker).finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Source: Send + Sync {
    /// Human-readable identifier, used in logs.
    fn name(&self) -> &str;

    /// Request the current archive.
    ///
    /// Resolves once the origin has answered (headers received); the body is
    /// streamed lazily through [`Download::body`].
    async fn fetch(&self) -> Result<Download>;
}
