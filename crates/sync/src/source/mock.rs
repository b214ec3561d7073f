//! Mock Archive Source
//!
//! Scripted, in-memory [`Source`] for testing the synchronizer without a
//! network. Each call to [`fetch`](Source::fetch) consumes the next scripted
//! response; once the script runs out the last response is repeated.

use crate::error::{ErrorKind, Result};
use crate::source::{ChangeMarker, Download, Source};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
enum Response {
    Archive {
        marker: Option<ChangeMarker>,
        bytes: Arc<[u8]>,
    },
    Failure(ErrorKind),
    Stall,
}

/// Rendezvous that holds a fetch open until the test releases it.
#[derive(Debug, Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until a fetch has reached the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the fetch waiting at the gate continue.
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[derive(Debug, Default)]
pub struct MockSource {
    script: Mutex<VecDeque<Response>>,
    last: Mutex<Option<Response>>,
    gate: Option<Arc<Gate>>,
    fetches: AtomicUsize,
    drained: Arc<AtomicU64>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an archive response.
    pub fn then_serve(self, marker: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        self.push(Response::Archive {
            marker: marker.map(ChangeMarker::new),
            bytes: bytes.into().into(),
        })
    }

    /// Script a failed request.
    pub fn then_fail(self, kind: ErrorKind) -> Self {
        self.push(Response::Failure(kind))
    }

    /// Script a request that never answers.
    pub fn then_stall(self) -> Self {
        self.push(Response::Stall)
    }

    /// Hold every fetch at `gate` before answering.
    pub fn with_gate(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Number of fetches started.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Total bytes read from served bodies.
    pub fn drained(&self) -> u64 {
        self.drained.load(Ordering::SeqCst)
    }

    fn push(self, response: Response) -> Self {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
        self
    }

    fn next_response(&self) -> Option<Response> {
        let next = self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        match next {
            Some(response) => {
                *last = Some(response.clone());
                Some(response)
            }
            None => last.clone(),
        }
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<Download> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let response = self.next_response();
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        match response {
            Some(Response::Archive { marker, bytes }) => Ok(Download {
                marker,
                body: Box::new(CountingReader {
                    inner: Cursor::new(bytes),
                    count: Arc::clone(&self.drained),
                }),
            }),
            Some(Response::Failure(kind)) => Err(kind.into()),
            Some(Response::Stall) => std::future::pending().await,
            None => exn::bail!(ErrorKind::Status(404)),
        }
    }
}

struct CountingReader<R> {
    inner: R,
    count: Arc<AtomicU64>,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.count.fetch_add(read as u64, Ordering::SeqCst);
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(download: Download) -> Vec<u8> {
        let mut body = Vec::new();
        let mut reader = download.body;
        reader.read_to_end(&mut body).unwrap();
        body
    }

    #[tokio::test]
    async fn script_consumed_in_order_then_repeated() {
        let source = MockSource::new()
            .then_fail(ErrorKind::Fetch)
            .then_serve(Some("v1"), b"abc".to_vec());

        assert_eq!(*source.fetch().await.unwrap_err(), ErrorKind::Fetch);
        let first = source.fetch().await.unwrap();
        assert_eq!(first.marker, Some(ChangeMarker::new("v1")));
        assert_eq!(read_all(first), b"abc");
        let repeated = source.fetch().await.unwrap();
        assert_eq!(read_all(repeated), b"abc");

        assert_eq!(source.fetches(), 3);
        assert_eq!(source.drained(), 6);
    }

    #[tokio::test]
    async fn empty_script_is_not_found() {
        let err = MockSource::new().fetch().await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(404));
    }
}
