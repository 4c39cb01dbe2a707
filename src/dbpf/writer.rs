//! Emits a DBPF byte image from a [`super::Pack`], synthesizing a fresh CLST.

use crate::dbpf::clst;
use crate::dbpf::entry::EntryModel;
use crate::dbpf::header::DbpfHeader;
use crate::dbpf::identity::Identity;
use crate::dbpf::Pack;
use crate::stream::ByteStream;

pub struct PackageWriter;

impl PackageWriter {
    /// Consume `pack`, returning the serialized archive bytes.
    ///
    /// If the synthesized CLST is appended, it is always the last entry
    /// written — per-entry uncompressed sizes must already be known when
    /// its body is built.
    pub fn write(mut pack: Pack) -> Vec<u8> {
        let mut stream = ByteStream::empty();
        DbpfHeader::write_template(&mut stream, pack.index_version);

        let has_compressed = pack.entries.iter().any(|e| e.compressed);
        if has_compressed {
            let body = clst::build(&pack.entries, pack.index_version);
            pack.entries.push(EntryModel::new(Identity::CLST, body));
        }

        for entry in &mut pack.entries {
            entry.location = stream.position() as u32;
            stream.write(&entry.buf);
        }

        let index_start = stream.position();
        for entry in &pack.entries {
            stream.write_u32_le(entry.identity.type_id);
            stream.write_u32_le(entry.identity.group_id);
            stream.write_u32_le(entry.identity.instance_id);
            if pack.index_version == 2 {
                stream.write_u32_le(entry.identity.resource_id);
            }
            stream.write_u32_le(entry.location);
            stream.write_u32_le(entry.buf.len() as u32);
        }
        let index_end = stream.position();

        DbpfHeader::patch_counts(
            &mut stream,
            pack.entries.len() as u32,
            index_start as u32,
            (index_end - index_start) as u32,
        );

        stream.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbpf::reader::PackageReader;

    fn id(n: u32) -> Identity {
        Identity { type_id: n, group_id: n, instance_id: n, resource_id: 0 }
    }

    #[test]
    fn archive_with_no_compressed_entries_carries_no_clst() {
        let entries = vec![EntryModel::new(id(1), b"plain".to_vec())];
        let image = PackageWriter::write(Pack { index_version: 1, entries });
        let read_back = PackageReader::read(&image).unwrap();
        assert_eq!(read_back.entries.len(), 1);
    }

    #[test]
    fn archive_with_compressed_entry_gets_clst_and_stays_hidden_from_entries() {
        let mut entry = EntryModel::new(id(1), "xyzxyzxyzxyzxyzxyzxyzxyz".repeat(5).into_bytes());
        entry.compress();
        let pack = Pack { index_version: 1, entries: vec![entry] };
        let image = PackageWriter::write(pack);

        let read_back = PackageReader::read(&image).unwrap();
        assert_eq!(read_back.entries.len(), 1);
        assert!(!read_back.entries.iter().any(|e| e.identity == Identity::CLST));
    }

    #[test]
    fn index_version_two_produces_24_byte_index_entries() {
        let mut entries = Vec::new();
        for i in 0..3u32 {
            let mut e = EntryModel::new(
                Identity { type_id: i, group_id: i, instance_id: i, resource_id: i },
                "compress me compress me compress me".repeat(3).into_bytes(),
            );
            e.compress();
            entries.push(e);
        }
        let pack = Pack { index_version: 2, entries };
        let image = PackageWriter::write(pack);

        let (count, index_size) = read_count_and_index_size(&image);
        assert_eq!(count, 4); // 3 data entries + synthesized CLST
        assert_eq!(index_size as usize, 4 * 24);
    }

    /// Reads back just the `(entryCount, indexSize)` pair without pulling in
    /// the full header API.
    fn read_count_and_index_size(image: &[u8]) -> (u32, u32) {
        let mut s = ByteStream::new(image[0..96].to_vec());
        s.set_position(36);
        let count = s.read_u32_le();
        s.read(4); // index location
        let size = s.read_u32_le();
        (count, size)
    }
}
