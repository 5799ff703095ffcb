//! Statistics derived from the LCP array.

use crate::lcp::LcpArray;
use crate::rmq::IntervalMin;
use crate::table::SuffixTable;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Scalar LCP statistics of one text, as reported by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LcpStats {
    /// Distinct substrings, the empty substring included.
    pub distinct_substrings: u64,
    /// Largest entry of the LCP array.
    pub max_lcp: u32,
    /// Number of distinct values taken by the LCP array.
    pub distinct_lcp_values: usize,
}

/// Computes all scalar statistics in one pass over the LCP array.
pub fn lcp_stats(table: &SuffixTable, lcp: &LcpArray) -> LcpStats {
    LcpStats {
        distinct_substrings: distinct_substrings(table, lcp),
        max_lcp: lcp.values().iter().copied().max().unwrap_or(0),
        distinct_lcp_values: lcp.values().iter().copied().collect::<HashSet<_>>().len(),
    }
}

/// Number of distinct substrings of the text, counting the empty substring.
///
/// Each rank-`r` suffix contributes one new substring per prefix, except
/// the `lcp[r - 1]` prefixes it shares with its rank predecessor:
/// `n(n + 1)/2 + 1 - sum(lcp)`.
pub fn distinct_substrings(table: &SuffixTable, lcp: &LcpArray) -> u64 {
    let n = table.len() as u64;
    let shared: u64 = lcp.values().iter().map(|&v| u64::from(v)).sum();
    n * (n + 1) / 2 + 1 - shared
}

/// Start and length of a longest substring occurring at least twice, or
/// `None` when no substring repeats.
pub fn longest_repeated_substring(table: &SuffixTable, lcp: &LcpArray) -> Option<(usize, usize)> {
    let best_rank = (0..lcp.len()).max_by_key(|&r| lcp.get(r))?;
    let len = lcp.get(best_rank);
    if len == 0 {
        return None;
    }
    Some((table.table()[best_rank] as usize, len as usize))
}

/// For every text position `i`, the length of the longest prefix of the
/// suffix at `i` that also starts at some position `j < i`.
///
/// Sweeps positions in string order, keeping the set of already-seen ranks;
/// the candidate match for the current rank is whichever rank-neighbor in
/// the set yields the larger interval minimum over the LCP array.
pub fn repeated_prefix_lengths(table: &SuffixTable, lcp: &LcpArray) -> Vec<u32> {
    let n = table.len();
    if n == 0 {
        return Vec::new();
    }
    let positions = table.inverse();
    let tree = IntervalMin::new(lcp.values());
    let mut seen: BTreeSet<usize> = BTreeSet::new();
    let mut lengths = vec![0u32; n];

    for (i, length) in lengths.iter_mut().enumerate() {
        let rank = positions[i] as usize;
        let mut best = 0;
        if let Some(&next) = seen.range(rank + 1..).next() {
            best = best.max(tree.min(rank, next - 1));
        }
        if let Some(&prev) = seen.range(..rank).next_back() {
            best = best.max(tree.min(prev, rank - 1));
        }
        seen.insert(rank);
        *length = best;
    }

    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn build(text: &str) -> (SuffixTable, LcpArray) {
        let table = SuffixTable::new(text.as_bytes().to_vec(), &Alphabet::lowercase()).unwrap();
        let lcp = LcpArray::build(&table);
        (table, lcp)
    }

    #[test]
    fn abcab_distinct_substrings() {
        // Brute force: 12 non-empty distinct substrings plus the empty one.
        let (table, lcp) = build("abcab");
        assert_eq!(distinct_substrings(&table, &lcp), 13);
    }

    #[test]
    fn abcab_scalar_stats() {
        let (table, lcp) = build("abcab");
        let stats = lcp_stats(&table, &lcp);
        assert_eq!(stats.max_lcp, 2);
        assert_eq!(stats.distinct_lcp_values, 3); // {0, 1, 2}
    }

    #[test]
    fn empty_text_stats() {
        let (table, lcp) = build("");
        let stats = lcp_stats(&table, &lcp);
        assert_eq!(stats.distinct_substrings, 1); // just the empty substring
        assert_eq!(stats.max_lcp, 0);
        assert_eq!(stats.distinct_lcp_values, 0);
    }

    #[test]
    fn repeated_prefixes_abab() {
        let (table, lcp) = build("abab");
        // "ab" recurs at 2 with length 2, "b" at 3 with length 1.
        assert_eq!(repeated_prefix_lengths(&table, &lcp), vec![0, 0, 2, 1]);
    }

    #[test]
    fn repeated_prefixes_unique_text() {
        let (table, lcp) = build("abc");
        assert_eq!(repeated_prefix_lengths(&table, &lcp), vec![0, 0, 0]);
    }

    #[test]
    fn longest_repeat_banana() {
        let (table, lcp) = build("banana");
        let (start, len) = longest_repeated_substring(&table, &lcp).unwrap();
        assert_eq!(len, 3);
        assert_eq!(&table.text()[start..start + len], b"ana");
    }

    #[test]
    fn longest_repeat_absent() {
        let (table, lcp) = build("abcd");
        assert_eq!(longest_repeated_substring(&table, &lcp), None);
        let (table, lcp) = build("");
        assert_eq!(longest_repeated_substring(&table, &lcp), None);
    }
}
