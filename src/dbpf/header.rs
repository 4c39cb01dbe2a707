//! The fixed 96-byte DBPF header.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 4 | Magic `DBPF` |
//! | 4 | 4 | Major version (= 1) |
//! | 8 | 4 | Minor version (= 1) |
//! | 12 | 12 | Reserved, zero |
//! | 24 | 4 | Date created |
//! | 28 | 4 | Date modified |
//! | 32 | 4 | Index major version (= 7) |
//! | 36 | 4 | Index entry count |
//! | 40 | 4 | Index location |
//! | 44 | 4 | Index size |
//! | 48 | 12 | Hole index fields, zero |
//! | 60 | 4 | Index minor version (`indexVersion` ∈ {1,2}) |
//! | 64 | 32 | Reserved padding |

use crate::config::{DBPF_HEADER_SIZE, DBPF_MAGIC, INDEX_MAJOR_VERSION};
use crate::dbpf::DbpfError;
use crate::stream::ByteStream;

/// Byte offset of the index entry count field.
const INDEX_ENTRY_COUNT_OFFSET: usize = 36;
/// Byte offset of the index minor version field (controls 20- vs 24-byte entries).
const INDEX_VERSION_OFFSET: usize = 60;

/// Fields extracted from the 96-byte header, ignoring fields the reader
/// never needs (dates, reserved words).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbpfHeader {
    pub index_entry_count: u32,
    pub index_location: u32,
    pub index_version: u32,
}

impl DbpfHeader {
    /// Parse the fixed header out of a full archive image.
    pub fn parse(src: &[u8]) -> Result<DbpfHeader, DbpfError> {
        if src.len() < DBPF_HEADER_SIZE || src[0..4] != DBPF_MAGIC {
            return Err(DbpfError::TruncatedHeader);
        }

        let mut stream = ByteStream::new(src[0..DBPF_HEADER_SIZE].to_vec());
        stream.set_position(INDEX_ENTRY_COUNT_OFFSET);
        let index_entry_count = stream.read_u32_le();
        let index_location = stream.read_u32_le();

        stream.set_position(INDEX_VERSION_OFFSET);
        let index_version = stream.read_u32_le();
        if index_version != 1 && index_version != 2 {
            return Err(DbpfError::UnsupportedIndexVersion(index_version));
        }

        Ok(DbpfHeader { index_entry_count, index_location, index_version })
    }

    /// Write the 96-byte header template with the entry-count, index-location,
    /// and index-size fields left as placeholders (patched later by
    /// [`super::writer::PackageWriter`] once the index has been written).
    pub fn write_template(stream: &mut ByteStream, index_version: u32) {
        stream.write(&DBPF_MAGIC);
        stream.write_u32_le(1); // major version
        stream.write_u32_le(1); // minor version
        stream.write(&[0u8; 12]); // reserved
        stream.write_u32_le(0); // date created
        stream.write_u32_le(0); // date modified
        stream.write_u32_le(INDEX_MAJOR_VERSION);
        stream.write_u32_le(0); // entry count, patched later
        stream.write_u32_le(0); // index location, patched later
        stream.write_u32_le(0); // index size, patched later
        stream.write(&[0u8; 12]); // hole index fields
        stream.write_u32_le(index_version);
        stream.write(&[0u8; 32]); // reserved padding
    }

    /// Patch the entry-count/index-location/index-size fields after the
    /// index has been written.
    pub fn patch_counts(stream: &mut ByteStream, entry_count: u32, index_location: u32, index_size: u32) {
        let end = stream.position();
        stream.set_position(INDEX_ENTRY_COUNT_OFFSET);
        stream.write_u32_le(entry_count);
        stream.write_u32_le(index_location);
        stream.write_u32_le(index_size);
        stream.set_position(end);
    }
}
