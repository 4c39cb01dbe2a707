//! A single DBPF resource: its identity, its payload, and its compression state.

use crate::dbpf::identity::Identity;
use crate::qfs;

/// One resource in a [`super::Pack`]. The CLST is never represented as an
/// `EntryModel` — see [`super::clst`].
#[derive(Debug, Clone)]
pub struct EntryModel {
    pub identity: Identity,
    pub buf: Vec<u8>,
    pub compressed: bool,
    /// Set when another entry in the same archive shares this identity
    /// tuple. Repeated entries are never (re)compressed.
    pub repeated: bool,
    /// Byte offset this entry's payload was written at. Only meaningful
    /// during [`super::writer::PackageWriter::write`]; the reader never
    /// sets it since the index entry it came from is not retained.
    pub location: u32,
}

impl EntryModel {
    pub fn new(identity: Identity, buf: Vec<u8>) -> Self {
        EntryModel { identity, buf, compressed: false, repeated: false, location: 0 }
    }

    /// Decompress in place if currently compressed. A failed decode leaves
    /// the entry untouched — `decode` only fails on malformed QFS framing,
    /// and the reader already checked the magic bytes before setting
    /// `compressed`, so this is defensive rather than expected to trigger.
    pub fn decompress(&mut self) {
        if self.compressed {
            let (out, ok) = qfs::decode(&self.buf);
            if ok {
                self.buf = out;
                self.compressed = false;
            }
        }
    }

    /// Compress in place if not already compressed and not repeated.
    /// Repeated entries are skipped: the CLST records one uncompressed size
    /// per identity tuple, so two distinct compressed payloads sharing a
    /// tuple could never both be represented.
    pub fn compress(&mut self) {
        if !self.compressed && !self.repeated {
            let (out, ok) = qfs::encode(&self.buf);
            if ok {
                self.buf = out;
                self.compressed = true;
            }
        }
    }

    /// Decompress then recompress — the operation the driver runs over
    /// every non-repeated entry.
    pub fn recompress(&mut self) {
        self.decompress();
        self.compress();
    }

    /// The size the payload decodes to: the QFS header's uncompressed-size
    /// field when compressed, or the raw payload length otherwise. This is
    /// what the synthesized CLST records for this entry.
    pub fn uncompressed_size(&self) -> u32 {
        if self.compressed {
            qfs::QfsHeader::parse(&self.buf)
                .map(|h| h.uncompressed_size)
                .unwrap_or(self.buf.len() as u32)
        } else {
            self.buf.len() as u32
        }
    }
}
