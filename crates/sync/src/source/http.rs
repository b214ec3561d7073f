use crate::error::{ErrorKind, Result};
use crate::source::{ChangeMarker, Download, Source};
use async_trait::async_trait;
use exn::ResultExt;
use futures::TryStreamExt;
use reqwest::header::{ETAG, HeaderMap, LAST_MODIFIED};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio_util::io::{StreamReader, SyncIoBridge};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Streams the archive over HTTP(S).
///
/// The change marker is the response's `Last-Modified` header, falling back
/// to `ETag`. A body that stays silent for longer than the read timeout
/// fails the read, which ends the pass reading it.
#[derive(Debug, Clone)]
pub struct HttpSource {
    name: String,
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: &str, read_timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).or_raise(|| ErrorKind::Fetch)?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(read_timeout)
            .user_agent(USER_AGENT)
            .build()
            .or_raise(|| ErrorKind::Fetch)?;
        Ok(Self {
            name: url.host_str().unwrap_or("http").to_string(),
            client,
            url,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Source for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Download> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .or_raise(|| ErrorKind::Fetch)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }

        let marker = change_marker(response.headers());
        tracing::debug!(marker = ?marker, length = ?response.content_length(), "Archive response received");

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let body = SyncIoBridge::new(StreamReader::new(Box::pin(stream)));
        Ok(Download {
            marker,
            body: Box::new(body),
        })
    }
}

fn change_marker(headers: &HeaderMap) -> Option<ChangeMarker> {
    [LAST_MODIFIED, ETAG]
        .iter()
        .filter_map(|name| headers.get(name))
        .find_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ChangeMarker::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    const READ_TIMEOUT: Duration = Duration::from_secs(5);

    fn headers(pairs: &[(reqwest::header::HeaderName, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn last_modified_preferred_over_etag() {
        let headers = headers(&[
            (ETAG, "\"5f3c-1a2b\""),
            (LAST_MODIFIED, "Sun, 18 Oct 2026 03:14:00 GMT"),
        ]);
        assert_eq!(
            change_marker(&headers),
            Some(ChangeMarker::new("Sun, 18 Oct 2026 03:14:00 GMT"))
        );
    }

    #[test]
    fn etag_used_without_last_modified() {
        let headers = headers(&[(ETAG, "\"5f3c-1a2b\"")]);
        assert_eq!(change_marker(&headers), Some(ChangeMarker::new("\"5f3c-1a2b\"")));
    }

    #[test]
    fn no_validator_means_no_marker() {
        assert_eq!(change_marker(&HeaderMap::new()), None);
        assert_eq!(change_marker(&headers(&[(ETAG, "  ")])), None);
    }

    #[test]
    fn invalid_url_rejected() {
        let err = HttpSource::new("not a url", READ_TIMEOUT).unwrap_err();
        assert_eq!(*err, ErrorKind::Fetch);
    }

    #[test]
    fn name_defaults_to_host() {
        let source = HttpSource::new("https://www.gutenberg.org/cache/epub/feeds/rdf-files.tar.bz2", READ_TIMEOUT).unwrap();
        assert_eq!(source.name(), "www.gutenberg.org");
        assert_eq!(source.with_name("pg").name(), "pg");
    }
}
