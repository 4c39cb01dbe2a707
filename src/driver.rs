//! Applies QFS recompression across every entry in a pack, in parallel.
//!
//! Partitions entries into contiguous shards by accumulated payload size
//! (not entry count), then recompresses each shard on its own worker. This
//! mirrors the source's `parallelCompress`/`main` split, fixing a bug where
//! its shard-boundary scan summed `entries[0].buf` on every iteration
//! instead of `entries[j].buf` — which made every shard boundary a function
//! of the first entry's size rather than the running total.

use std::ops::Range;

use crate::config::ENV_NBWORKERS;
use crate::dbpf::{EntryModel, Pack};
use crate::util::count_cores;

/// Resolve the worker count: an explicit override, then the
/// `DBPF_NBWORKERS` environment variable, then the platform's available
/// parallelism.
pub fn resolve_nb_workers(override_workers: Option<usize>) -> usize {
    if let Some(n) = override_workers {
        return n.max(1);
    }
    if let Ok(v) = std::env::var(ENV_NBWORKERS) {
        if let Ok(n) = v.parse::<usize>() {
            if n >= 1 {
                return n;
            }
        }
    }
    count_cores()
}

/// Partition `entries` into up to `nb_workers` contiguous, non-overlapping
/// ranges, each covering roughly `1 / nb_workers` of the total payload
/// bytes. Ranges always fully cover `0..entries.len()` with no gaps or
/// overlaps; fewer than `nb_workers` ranges are returned if there isn't
/// enough work to split that finely.
pub fn partition_by_size(entries: &[EntryModel], nb_workers: usize) -> Vec<Range<usize>> {
    if entries.is_empty() {
        return Vec::new();
    }
    if nb_workers <= 1 {
        return vec![0..entries.len()];
    }

    let total_length: usize = entries.iter().map(|e| e.buf.len()).sum();
    let partition_length = (total_length / nb_workers).max(1);

    let mut ranges = Vec::with_capacity(nb_workers);
    let mut i = 0;
    let mut j = 0;

    for _ in 0..nb_workers - 1 {
        if i >= entries.len() {
            break;
        }
        let mut length = 0;
        while j < entries.len() {
            length += entries[j].buf.len();
            j += 1;
            if length >= partition_length {
                break;
            }
        }
        ranges.push(i..j);
        i = j;
    }
    if i < entries.len() {
        ranges.push(i..entries.len());
    }

    ranges
}

/// Recompress every non-repeated entry in `pack` (decode then re-encode),
/// sharded across `nb_workers` threads. Entry order is preserved.
pub fn recompress_pack(mut pack: Pack, nb_workers: usize) -> Pack {
    let ranges = partition_by_size(&pack.entries, nb_workers.max(1));
    if ranges.len() <= 1 {
        for entry in &mut pack.entries {
            entry.recompress();
        }
        return pack;
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_workers.max(1))
        .build()
        .expect("failed to build recompression thread pool");

    let mut remaining: &mut [EntryModel] = &mut pack.entries;
    let mut shards: Vec<&mut [EntryModel]> = Vec::with_capacity(ranges.len());
    let mut offset = 0usize;
    for range in &ranges {
        let (head, tail) = remaining.split_at_mut(range.end - offset);
        shards.push(head);
        remaining = tail;
        offset = range.end;
    }

    pool.scope(|scope| {
        for shard in shards {
            scope.spawn(move |_| {
                for entry in shard {
                    entry.recompress();
                }
            });
        }
    });

    pack
}
