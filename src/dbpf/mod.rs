//! DBPF (Database Packed File) container layer.
//!
//! Parses and re-emits the archive's 96-byte header and entry index, and
//! reconciles the CLST (compressed-entry directory) with each entry's
//! actual compression state. The codec itself lives in [`crate::qfs`].

pub mod clst;
pub mod entry;
pub mod header;
pub mod identity;
pub mod reader;
pub mod writer;

pub use entry::EntryModel;
pub use identity::Identity;
pub use reader::PackageReader;
pub use writer::PackageWriter;

/// Malformed-container conditions the reader/writer refuse to paper over.
///
/// Mirrors the block codec's error style: a plain enum with no `Display` or
/// `std::error::Error` impl. Callers at the CLI boundary print it with
/// `{:?}` rather than converting it into an `anyhow::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbpfError {
    /// Fewer than 96 bytes, or the `DBPF` magic is absent.
    TruncatedHeader,
    /// `indexVersion` is neither 1 nor 2.
    UnsupportedIndexVersion(u32),
    /// `indexLocation` or an entry's `location + size` falls outside the
    /// source buffer.
    IndexOutOfRange,
}

/// An in-memory archive: its index version plus the entries read from (or
/// to be written to) a DBPF byte image. The CLST is never a member of
/// `entries` — it is consumed on read and synthesized fresh on write.
#[derive(Debug, Clone)]
pub struct Pack {
    pub index_version: u32,
    pub entries: Vec<EntryModel>,
}
