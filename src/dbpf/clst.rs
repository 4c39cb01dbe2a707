//! CLST: the compressed-entry directory resource.
//!
//! The CLST is archive metadata, not a resource — it is consumed on read
//! and regenerated on write from each entry's authoritative `compressed`
//! flag and decoded payload length. Persisting the original CLST verbatim
//! would desynchronize the moment any entry's compression state changes.

use std::collections::HashSet;

use crate::dbpf::entry::EntryModel;
use crate::dbpf::identity::Identity;
use crate::stream::ByteStream;

/// Parse a CLST body into the set of identity tuples it claims are
/// compressed. Each record is the identity tuple followed by 4 bytes of
/// recorded uncompressed size, which is skipped here — the size is
/// re-derived from the entry's own payload on output rather than trusted
/// from the stale directory.
pub fn parse_identities(buf: &[u8], index_version: u32) -> HashSet<Identity> {
    let mut stream = ByteStream::new(buf.to_vec());
    let mut identities = HashSet::new();

    let record_size = if index_version == 2 { 20 } else { 16 };
    while stream.position() + record_size <= buf.len() {
        let type_id = stream.read_u32_le();
        let group_id = stream.read_u32_le();
        let instance_id = stream.read_u32_le();
        let resource_id = if index_version == 2 { stream.read_u32_le() } else { 0 };
        stream.read(4); // uncompressed size, unused on read

        identities.insert(Identity { type_id, group_id, instance_id, resource_id });
    }

    identities
}

/// Synthesize a fresh CLST body: one record per entry in `entries`,
/// regardless of whether that entry is actually compressed, mirroring the
/// format's own directory contents (an uncompressed entry still gets a
/// record, just with `uncompressed_size == len(payload)`).
pub fn build(entries: &[EntryModel], index_version: u32) -> Vec<u8> {
    let mut stream = ByteStream::empty();
    for entry in entries {
        stream.write_u32_le(entry.identity.type_id);
        stream.write_u32_le(entry.identity.group_id);
        stream.write_u32_le(entry.identity.instance_id);
        if index_version == 2 {
            stream.write_u32_le(entry.identity.resource_id);
        }
        stream.write_u32_le(entry.uncompressed_size());
    }
    stream.into_inner()
}
