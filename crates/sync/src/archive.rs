//! Archive Decoding
//!
//! Turns a raw archive body into a stream of tar entries. The catalog dump is
//! published as `rdf-files.tar.bz2`, but mirrors occasionally serve gzip or a
//! plain tarball, so the compression is sniffed from the first bytes rather
//! than trusted from the URL.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{BufReader, Cursor, Read};

const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const SNIFF_LEN: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Gzip,
}

impl Compression {
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&BZIP2_MAGIC) {
            Compression::Bzip2
        } else if bytes.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else {
            Compression::None
        }
    }

    fn decoder<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        let reader = BufReader::new(reader);
        match self {
            // The feed is produced by parallel compressors, which emit
            // concatenated streams.
            Compression::Bzip2 => Box::new(bzip2::bufread::MultiBzDecoder::new(reader)),
            Compression::Gzip => Box::new(flate2::bufread::MultiGzDecoder::new(reader)),
            Compression::None => Box::new(reader),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// What the router needs to know about an entry before reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub path: String,
    pub kind: EntryKind,
}

impl EntryHeader {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub(crate) fn from_entry<R: Read>(entry: &tar::Entry<'_, R>) -> Result<Self> {
        let path = entry.path().or_raise(|| ErrorKind::Archive)?;
        let entry_type = entry.header().entry_type();
        let kind = if entry_type.is_file() {
            EntryKind::File
        } else if entry_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        Ok(Self {
            path: path.to_string_lossy().into_owned(),
            kind,
        })
    }
}

/// Sniff the compression of `body` and wrap it in a tar reader.
///
/// Nothing beyond the magic bytes is read here; entries are decoded lazily as
/// the returned archive is iterated.
pub fn open<'a, R: Read + 'a>(mut body: R) -> Result<tar::Archive<Box<dyn Read + 'a>>> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    (&mut body)
        .take(SNIFF_LEN)
        .read_to_end(&mut head)
        .or_raise(|| ErrorKind::Io)?;
    let compression = Compression::from_magic_bytes(&head);
    tracing::debug!(?compression, "Detected archive compression");
    Ok(tar::Archive::new(compression.decoder(Cursor::new(head).chain(body))))
}
