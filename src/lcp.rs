use crate::rmq::IntervalMin;
use crate::table::SuffixTable;

/// Longest-common-prefix array of a suffix table, built with Kasai's
/// algorithm in `O(n)`.
///
/// The array has `n - 1` entries for a text of length `n` (or none for an
/// empty text): entry `r` is the length of the common prefix of the rank-`r`
/// and rank-`r + 1` suffixes. The last rank has no successor and therefore
/// no entry; no in-band sentinel value exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LcpArray {
    lcp: Box<[u32]>,
}

impl LcpArray {
    /// Computes the LCP array of `table`.
    ///
    /// Positions are scanned in original string order, not rank order:
    /// dropping the first character of a suffix loses at most one matched
    /// character, so the running prefix length decreases by at most 1 per
    /// step and the total extension work stays linear.
    pub fn build(table: &SuffixTable) -> Self {
        let n = table.len();
        if n == 0 {
            return LcpArray { lcp: Box::new([]) };
        }

        let text = table.codes();
        let sa = table.table();
        let positions = table.inverse();

        let mut lcp = vec![0u32; n - 1];
        let mut h = 0usize;
        for i in 0..n {
            if h > 0 {
                h -= 1;
            }
            let rank = positions[i] as usize;
            if rank == n - 1 {
                // No successor; the carried `h` stays a valid lower bound
                // for the next position's match.
                continue;
            }
            let j = sa[rank + 1] as usize;
            while i + h < n && j + h < n && text[i + h] == text[j + h] {
                h += 1;
            }
            lcp[rank] = h as u32;
        }

        LcpArray { lcp: lcp.into() }
    }

    /// Number of entries: `text length - 1`, or 0 for an empty text.
    #[inline]
    pub fn len(&self) -> usize {
        self.lcp.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lcp.is_empty()
    }

    /// LCP length between the suffixes at ranks `r` and `r + 1`.
    #[inline]
    pub fn get(&self, r: usize) -> u32 {
        self.lcp[r]
    }

    /// All entries, rank order.
    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.lcp
    }

    /// Builds the static range-minimum structure used to answer LCP queries
    /// between arbitrary ranks.
    pub fn interval_min(&self) -> IntervalMin {
        IntervalMin::new(&self.lcp)
    }
}

/// LCP length between the suffixes at two distinct ranks: the minimum LCP
/// entry strictly between them in sorted order.
///
/// `tree` must have been built over the same LCP array
/// (see [`LcpArray::interval_min`]).
pub fn lcp_of_ranks(tree: &IntervalMin, rank_a: usize, rank_b: usize) -> u32 {
    debug_assert_ne!(rank_a, rank_b);
    let (lo, hi) = if rank_a < rank_b {
        (rank_a, rank_b)
    } else {
        (rank_b, rank_a)
    };
    tree.min(lo, hi - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn lcp_of(text: &str) -> LcpArray {
        let table = SuffixTable::new(text.as_bytes().to_vec(), &Alphabet::lowercase()).unwrap();
        LcpArray::build(&table)
    }

    #[test]
    fn banana_golden() {
        // Ranks: a, ana, anana, banana, na, nana
        assert_eq!(lcp_of("banana").values(), &[1, 3, 0, 0, 2]);
    }

    #[test]
    fn repeated_symbol_is_strictly_increasing() {
        assert_eq!(lcp_of("aaaa").values(), &[1, 2, 3]);
    }

    #[test]
    fn degenerate_lengths() {
        assert!(lcp_of("").is_empty());
        assert!(lcp_of("x").is_empty());
        assert_eq!(lcp_of("ab").values(), &[0]);
        assert_eq!(lcp_of("aa").values(), &[1]);
    }

    #[test]
    fn rank_pair_queries() {
        let lcp = lcp_of("banana");
        let tree = lcp.interval_min();
        // "ana" (rank 1) vs "anana" (rank 2)
        assert_eq!(lcp_of_ranks(&tree, 1, 2), 3);
        // "a" (rank 0) vs "anana" (rank 2), symmetric
        assert_eq!(lcp_of_ranks(&tree, 0, 2), 1);
        assert_eq!(lcp_of_ranks(&tree, 2, 0), 1);
        // "a" vs "nana", nothing shared
        assert_eq!(lcp_of_ranks(&tree, 0, 5), 0);
    }
}
