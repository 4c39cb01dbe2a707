//! QFS/RefPack compression.
//!
//! Greedy longest-match LZ77 parse over a 3-byte-window dictionary, emitting
//! the same 4-variant control-group format the decoder understands (see
//! [`super::decode`]). The parse is intentionally greedy with a single-step
//! lookahead, not optimal — see the module-level notes in DESIGN.md for why
//! that's a deliberate choice rather than an oversight.

use std::collections::HashMap;

use crate::config::{QFS_MAX_COPY_LEN, QFS_MAX_OFFSET, QFS_MAX_UNCOMPRESSED_SIZE};

/// One selected back-reference, found during the match search.
#[derive(Debug, Clone, Copy)]
struct Match {
    location: usize,
    length: usize,
    offset: usize,
}

/// A (length, offset) pair is representable by some control-group form only
/// within these combined bounds — longer copies require tighter offsets.
fn is_representable(length: usize, offset: usize) -> bool {
    offset <= 1024 || (offset <= 16384 && length >= 4) || (offset <= QFS_MAX_OFFSET && length >= 5)
}

/// Greedy longest-match search over every 3-byte window of `src`.
///
/// Builds a map from each 3-byte window to the (ascending) positions it
/// occurs at, then scans forward selecting the longest representable match
/// at each position, skipping over any position already covered by a
/// selected match.
fn find_matches(src: &[u8]) -> Vec<Match> {
    if src.len() < 3 {
        return Vec::new();
    }

    let mut dict: HashMap<[u8; 3], Vec<usize>> = HashMap::new();
    for i in 0..=src.len() - 3 {
        let window = [src[i], src[i + 1], src[i + 2]];
        dict.entry(window).or_default().push(i);
    }

    let mut matches = Vec::new();
    let mut i = 1;
    while i <= src.len() - 3 {
        let window = [src[i], src[i + 1], src[i + 2]];
        let locations = match dict.get(&window) {
            Some(l) if l.len() > 1 => l,
            _ => {
                i += 1;
                continue;
            }
        };

        // Binary search for the first candidate within the 128 KiB window.
        let min_index = i.saturating_sub(QFS_MAX_OFFSET);
        let start_index = if min_index > 0 && locations[0] < min_index {
            locations.partition_point(|&loc| loc <= min_index)
        } else {
            0
        };

        let mut best: Option<Match> = None;
        for &j in &locations[start_index..] {
            if j >= i {
                break;
            }

            let mut length = 3;
            while length < QFS_MAX_COPY_LEN
                && i + length < src.len()
                && src[i + length] == src[j + length]
            {
                length += 1;
            }
            let offset = i - j;
            let candidate = Match { location: i, length, offset };

            let better = match best {
                None => is_representable(length, offset),
                Some(b) => length >= b.length && is_representable(length, offset),
            };
            if better {
                best = Some(candidate);
                if length == QFS_MAX_COPY_LEN {
                    break;
                }
            }
            if i + length == src.len() {
                break;
            }
        }

        if let Some(m) = best {
            matches.push(m);
            i += m.length;
        } else {
            i += 1;
        }
    }

    matches
}

/// Emit a run of plain-only control groups (form four) draining `gap` bytes
/// from `src[*src_pos..]` into `dst`, leaving a residual of `<= 3` bytes in
/// `gap` for the caller to fold into the next control group (or the
/// terminator). Each group can carry at most 112 literal bytes: the 5-bit
/// field in the 0xE0-0xFB leader tops out there, not at the nominal 128 the
/// field width would allow, because 0xFC-0xFF is reserved for the
/// terminator form and must not collide with it.
fn emit_plain_runs(
    src: &[u8],
    src_pos: &mut usize,
    dst: &mut Vec<u8>,
    gap: &mut usize,
    budget: usize,
) -> bool {
    const MAX_PLAIN_RUN: usize = 112;
    while *gap > 3 {
        let mut plain = *gap - (*gap % 4);
        if plain > MAX_PLAIN_RUN {
            plain = MAX_PLAIN_RUN;
        }
        if dst.len() + plain + 1 > budget {
            return false;
        }
        let b0 = 0xE0u8 + ((plain >> 2) as u8) - 1;
        dst.push(b0);
        dst.extend_from_slice(&src[*src_pos..*src_pos + plain]);
        *src_pos += plain;
        *gap -= plain;
    }
    true
}

/// Compress `src`.
///
/// Returns `(dst, true)` on success. Returns `(Vec::new(), false)` if `src`
/// is too large to frame (≥ 2²⁴ bytes), or the compressed output would not
/// be smaller than `src` (the output budget is capped to `src.len() - 1`,
/// which is what actually rejects incompressible input).
pub fn encode(src: &[u8]) -> (Vec<u8>, bool) {
    if src.len() >= QFS_MAX_UNCOMPRESSED_SIZE {
        return (Vec::new(), false);
    }
    if src.is_empty() {
        let mut dst = vec![0u8; super::header::HEADER_SIZE + 1];
        dst[super::header::HEADER_SIZE] = 0xFC;
        super::header::QfsHeader::write(&mut dst, dst.len() as u32, 0);
        return (dst, true);
    }

    let matches = find_matches(src);

    // The output must end up strictly smaller than `src` or there was no
    // point compressing it; enforcing that as a hard byte budget up front
    // is what actually rejects incompressible input.
    let budget = src.len().saturating_sub(1);
    let mut dst = Vec::with_capacity(budget);
    dst.resize(super::header::HEADER_SIZE, 0);
    if dst.len() > budget {
        return (Vec::new(), false);
    }

    let mut src_pos = 0usize;

    for m in &matches {
        let mut gap = m.location - src_pos;
        if !emit_plain_runs(src, &mut src_pos, &mut dst, &mut gap, budget) {
            return (Vec::new(), false);
        }
        let plain = gap; // residual in [0, 3]

        let copy = m.length;
        let offset = m.offset - 1;

        if copy <= 10 && offset < 1024 {
            if dst.len() + plain + 2 > budget {
                return (Vec::new(), false);
            }
            let b0 = (((offset >> 3) & 0x60) + ((copy - 3) << 2) + plain) as u8;
            let b1 = offset as u8;
            dst.push(b0);
            dst.push(b1);
        } else if copy <= 67 && offset < 16384 {
            if dst.len() + plain + 3 > budget {
                return (Vec::new(), false);
            }
            let b0 = (0x80 + (copy - 4)) as u8;
            let b1 = (((plain << 6) + (offset >> 8)) & 0xFF) as u8;
            let b2 = offset as u8;
            dst.push(b0);
            dst.push(b1);
            dst.push(b2);
        } else if copy <= QFS_MAX_COPY_LEN && offset < QFS_MAX_OFFSET {
            if dst.len() + plain + 4 > budget {
                return (Vec::new(), false);
            }
            let b0 = (0xC0 + ((offset >> 12) & 0x10) + (((copy - 5) >> 6) & 0x0C) + plain) as u8;
            let b1 = (offset >> 8) as u8;
            let b2 = offset as u8;
            let b3 = (copy - 5) as u8;
            dst.push(b0);
            dst.push(b1);
            dst.push(b2);
            dst.push(b3);
        } else {
            // Not representable — find_matches never selects such a pair.
            return (Vec::new(), false);
        }

        if plain > 0 {
            dst.extend_from_slice(&src[src_pos..src_pos + plain]);
            src_pos += plain;
        }
        src_pos += copy;
    }

    let mut gap = src.len() - src_pos;
    if !emit_plain_runs(src, &mut src_pos, &mut dst, &mut gap, budget) {
        return (Vec::new(), false);
    }
    let plain = gap;
    if dst.len() + plain + 1 > budget {
        return (Vec::new(), false);
    }
    dst.push(0xFC + plain as u8);
    dst.extend_from_slice(&src[src_pos..src_pos + plain]);

    let compressed_size = dst.len() as u32;
    super::header::QfsHeader::write(&mut dst, compressed_size, src.len() as u32);

    (dst, true)
}

#[cfg(test)]
mod tests {
    use super::super::decode::decode;
    use super::*;

    #[test]
    fn empty_input_produces_header_and_terminator_only() {
        let (dst, ok) = encode(&[]);
        assert!(ok);
        assert_eq!(dst.len(), 9 + 1);
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert!(out.is_empty());
    }

    #[test]
    fn short_input_below_window_size_does_not_crash() {
        // Too small for the 9-byte header to ever pay for itself - abandons
        // cleanly rather than panicking on an undersized buffer.
        let (dst, ok) = encode(b"ab");
        assert!(!ok);
        assert!(dst.is_empty());
    }

    #[test]
    fn repeating_pattern_round_trips() {
        let src = b"ABCABCABCABCABCABCABC";
        let (dst, ok) = encode(src);
        assert!(ok);
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert_eq!(out, src);
    }

    #[test]
    fn run_of_zeros_compresses_small() {
        let src = vec![0u8; 4096];
        let (dst, ok) = encode(&src);
        assert!(ok);
        assert!(dst.len() <= 30, "compressed length was {}", dst.len());
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert_eq!(out, src);
    }

    #[test]
    fn random_data_abandons() {
        // Small xorshift PRNG, fixed seed - avoids pulling in a `rand` dependency
        // for a single deterministic test fixture.
        let mut state: u64 = 0x2545F4914F6CDD1D;
        let mut src = vec![0u8; 4096];
        for b in src.iter_mut() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            *b = (state & 0xFF) as u8;
        }
        let (dst, ok) = encode(&src);
        assert!(!ok);
        assert!(dst.is_empty());
    }

    #[test]
    fn repeated_english_text_round_trips() {
        let src = "The quick brown fox jumps over the lazy dog. ".repeat(100);
        let (dst, ok) = encode(src.as_bytes());
        assert!(ok);
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert_eq!(out, src.as_bytes());
    }

    #[test]
    fn max_length_match_at_max_offset_round_trips() {
        // 131072-byte offset back-reference stretched to the 1028-byte cap.
        let prefix_len = QFS_MAX_OFFSET;
        let pattern_len = QFS_MAX_COPY_LEN + 8;
        let mut src = vec![0u8; prefix_len + pattern_len];
        for (idx, b) in src.iter_mut().enumerate() {
            *b = (idx % 251) as u8;
        }
        // Duplicate the tail pattern at the very start so offset == prefix_len.
        let pattern = src[prefix_len..prefix_len + pattern_len].to_vec();
        src[0..pattern_len].copy_from_slice(&pattern);

        let (dst, ok) = encode(&src);
        assert!(ok);
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert_eq!(out, src);
    }

    #[test]
    fn large_incompressible_literal_gap_round_trips() {
        // Exercises the >112-byte literal-run split: a long unmatched stretch
        // of distinct bytes, followed by a match, forces more than one
        // plain-only control group before the match's own control group.
        let mut src: Vec<u8> = (0u32..300).map(|i| (i % 256) as u8).collect();
        src.extend_from_slice(b"REPEATREPEATREPEATREPEAT");
        let (dst, ok) = encode(&src);
        assert!(ok);
        let (out, ok2) = decode(&dst);
        assert!(ok2);
        assert_eq!(out, src);
    }
}
