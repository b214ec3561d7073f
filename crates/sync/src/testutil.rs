//! Archive and record fixtures shared by the unit tests.

use crate::archive::Compression;
use std::io::Write;
use tar::{EntryType, Header};

pub(crate) enum Fixture<'a> {
    File(&'a str, &'a [u8]),
    Directory(&'a str),
    Symlink(&'a str, &'a str),
}

/// Build an in-memory tarball, compressed as requested.
pub(crate) fn tarball(compression: Compression, fixtures: &[Fixture<'_>]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for fixture in fixtures {
        let mut header = Header::new_gnu();
        match fixture {
            Fixture::File(path, data) => {
                header.set_entry_type(EntryType::Regular);
                header.set_mode(0o644);
                header.set_size(data.len() as u64);
                builder.append_data(&mut header, path, *data).unwrap();
            }
            Fixture::Directory(path) => {
                header.set_entry_type(EntryType::Directory);
                header.set_mode(0o755);
                header.set_size(0);
                builder.append_data(&mut header, path, std::io::empty()).unwrap();
            }
            Fixture::Symlink(path, target) => {
                header.set_entry_type(EntryType::Symlink);
                header.set_mode(0o777);
                header.set_size(0);
                builder.append_link(&mut header, path, target).unwrap();
            }
        }
    }
    let tar = builder.into_inner().unwrap();

    match compression {
        Compression::Bzip2 => {
            let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::best());
            encoder.write_all(&tar).unwrap();
            encoder.finish().unwrap()
        }
        Compression::Gzip => {
            let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&tar).unwrap();
            encoder.finish().unwrap()
        }
        Compression::None => tar,
    }
}

/// A catalog record laid out the way the feed publishes them: relative
/// addresses against `xml:base`, creators and formats as nested nodes.
///
/// Without a title the record parses but can't be reconstructed.
pub(crate) fn record(id: u64, title: Option<&str>) -> String {
    let title = title
        .map(|title| format!("<dcterms:title>{title}</dcterms:title>"))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xml:base="http://www.gutenberg.org/"
  xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
  xmlns:dcterms="http://purl.org/dc/terms/"
  xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/">
  <pgterms:ebook rdf:about="ebooks/{id}">
    {title}
    <pgterms:downloads rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">42</pgterms:downloads>
    <dcterms:issued rdf:datatype="http://www.w3.org/2001/XMLSchema#date">2001-07-01</dcterms:issued>
    <dcterms:creator>
      <pgterms:agent rdf:about="2009/agents/9">
        <pgterms:name>Melville, Herman</pgterms:name>
        <pgterms:birthdate rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">1819</pgterms:birthdate>
      </pgterms:agent>
    </dcterms:creator>
    <dcterms:hasFormat>
      <pgterms:file rdf:about="https://www.gutenberg.org/ebooks/{id}.txt.utf-8">
        <dcterms:format>
          <rdf:Description>
            <rdf:value rdf:datatype="http://purl.org/dc/terms/IMT">text/plain; charset=utf-8</rdf:value>
          </rdf:Description>
        </dcterms:format>
      </pgterms:file>
    </dcterms:hasFormat>
  </pgterms:ebook>
</rdf:RDF>
"#
    )
}
