//! Parses a raw DBPF byte image into a [`super::Pack`].

use std::collections::HashMap;

use crate::dbpf::clst;
use crate::dbpf::entry::EntryModel;
use crate::dbpf::header::DbpfHeader;
use crate::dbpf::identity::Identity;
use crate::dbpf::{DbpfError, Pack};
use crate::qfs::QfsHeader;
use crate::stream::ByteStream;

/// Reads the fixed header, the entry index, and reconciles the CLST (if
/// present) against each entry's actual payload.
pub struct PackageReader;

impl PackageReader {
    /// Parse a full archive image.
    pub fn read(src: &[u8]) -> Result<Pack, DbpfError> {
        let header = DbpfHeader::parse(src)?;

        let index_record_size = if header.index_version == 2 { 24 } else { 20 };
        let index_location = header.index_location as usize;
        let index_bytes_needed = index_record_size * header.index_entry_count as usize;
        index_location
            .checked_add(index_bytes_needed)
            .filter(|&end| end <= src.len())
            .ok_or(DbpfError::IndexOutOfRange)?;

        let mut stream = ByteStream::new(src[index_location..].to_vec());
        let mut entries = Vec::with_capacity(header.index_entry_count as usize);
        let mut clst_body: Option<Vec<u8>> = None;

        for _ in 0..header.index_entry_count {
            let type_id = stream.read_u32_le();
            let group_id = stream.read_u32_le();
            let instance_id = stream.read_u32_le();
            let resource_id = if header.index_version == 2 { stream.read_u32_le() } else { 0 };
            let location = stream.read_u32_le() as usize;
            let size = stream.read_u32_le() as usize;

            let end = location
                .checked_add(size)
                .filter(|&end| end <= src.len())
                .ok_or(DbpfError::IndexOutOfRange)?;
            let payload = src[location..end].to_vec();

            let identity = Identity { type_id, group_id, instance_id, resource_id };
            if type_id == crate::config::CLST_TYPE_ID {
                clst_body = Some(payload);
            } else {
                entries.push(EntryModel::new(identity, payload));
            }
        }

        if let Some(body) = &clst_body {
            let claimed = clst::parse_identities(body, header.index_version);
            for entry in &mut entries {
                if claimed.contains(&entry.identity) && QfsHeader::has_magic(&entry.buf) {
                    entry.compressed = true;
                }
            }
        }

        mark_repeated(&mut entries);

        Ok(Pack { index_version: header.index_version, entries })
    }
}

/// Any identity tuple appearing more than once marks all its occurrences
/// `repeated`.
fn mark_repeated(entries: &mut [EntryModel]) {
    let mut seen: HashMap<Identity, usize> = HashMap::new();
    let mut repeats: Vec<usize> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if let Some(&j) = seen.get(&entry.identity) {
            repeats.push(i);
            repeats.push(j);
        }
        seen.insert(entry.identity, i);
    }
    for i in repeats {
        entries[i].repeated = true;
    }
}
