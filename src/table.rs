use crate::alphabet::Alphabet;
use crate::doubling::suffix_array;
use anyhow::Result;
use rayon::prelude::*;
use std::fmt;

/// A suffix table is a byte string together with its lexicographically
/// sorted suffix array over a declared alphabet.
///
/// The table is built once and read-only afterwards. Suffix order follows
/// the alphabet's code order, not raw byte order.
#[derive(Clone, PartialEq, Eq)]
pub struct SuffixTable {
    text: Box<[u8]>,
    codes: Box<[u8]>,
    table: Box<[u32]>,
}

impl SuffixTable {
    /// Creates a new suffix table for `src` in `O(n log n)` time and `O(n)`
    /// space, rejecting any byte outside `alphabet`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sufftk::{Alphabet, SuffixTable};
    ///
    /// let st = SuffixTable::new(b"banana".to_vec(), &Alphabet::lowercase()).unwrap();
    /// assert_eq!(st.table(), &[5, 3, 1, 0, 4, 2]);
    /// ```
    pub fn new<S>(src: S, alphabet: &Alphabet) -> Result<Self>
    where
        S: Into<Box<[u8]>>,
    {
        let text = src.into();
        let codes = alphabet.encode(&text)?.into_boxed_slice();
        let table = suffix_array(&codes, alphabet.len()).into_boxed_slice();
        Ok(SuffixTable { text, codes, table })
    }

    /// Creates a suffix table by comparison-sorting whole suffixes,
    /// `O(n^2 log n)` worst case. Slow oracle for testing the doubling
    /// builder; prefer [`SuffixTable::new`].
    pub fn new_naive<S>(src: S, alphabet: &Alphabet) -> Result<Self>
    where
        S: Into<Box<[u8]>>,
    {
        let text = src.into();
        let codes = alphabet.encode(&text)?.into_boxed_slice();
        let mut table: Vec<u32> = (0..text.len() as u32).collect();
        table.sort_by(|&a, &b| codes[a as usize..].cmp(&codes[b as usize..]));
        Ok(SuffixTable {
            text,
            codes,
            table: table.into(),
        })
    }

    /// Returns the number of suffixes in the table.
    ///
    /// Alternatively, this is the number of bytes in the text.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` iff `self.len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying text.
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The suffix array: suffix start positions in lexicographic order.
    #[inline]
    pub fn table(&self) -> &[u32] {
        &self.table
    }

    /// The text mapped to dense alphabet codes.
    #[inline]
    pub(crate) fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Returns the suffix at rank `i`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &[u8] {
        &self.text[self.table[i] as usize..]
    }

    #[inline]
    fn suffix_codes(&self, i: usize) -> &[u8] {
        &self.codes[self.table[i] as usize..]
    }

    /// Checks that adjacent suffixes are in non-decreasing order. Always
    /// true for a table built by either constructor.
    pub fn is_sorted(&self) -> bool {
        self.table
            .par_windows(2)
            .all(|pair| self.codes[pair[0] as usize..] <= self.codes[pair[1] as usize..])
    }

    /// Rank of every text position: the inverse permutation of the table.
    pub fn inverse(&self) -> Vec<u32> {
        let mut positions = vec![0u32; self.len()];
        for (rank, &start) in self.table.iter().enumerate() {
            positions[start as usize] = rank as u32;
        }
        positions
    }

    /// Returns true if and only if `query` occurs in the text.
    ///
    /// Runs in `O(m log n)` time for `m == query.len()`. Bytes of `query`
    /// outside the alphabet cannot occur in the text, so they simply yield
    /// `false`.
    pub fn contains(&self, query: &[u8], alphabet: &Alphabet) -> bool {
        let Ok(query) = alphabet.encode(query) else {
            return false;
        };
        !query.is_empty()
            && self
                .table
                .binary_search_by(|&sufi| {
                    self.codes[sufi as usize..]
                        .iter()
                        .take(query.len())
                        .cmp(query.iter())
                })
                .is_ok()
    }

    /// Returns an unordered list of start positions where `query` occurs.
    pub fn positions(&self, query: &[u8], alphabet: &Alphabet) -> &[u32] {
        let Ok(query) = alphabet.encode(query) else {
            return &[];
        };
        if self.text.is_empty()
            || query.is_empty()
            || (query.as_slice() < self.suffix_codes(0)
                && !self.suffix_codes(0).starts_with(&query))
            || query.as_slice() > self.suffix_codes(self.len() - 1)
        {
            return &[];
        }

        let start = binary_search(&self.table, |&sufi| {
            query.as_slice() <= &self.codes[sufi as usize..]
        });
        let end = start
            + binary_search(&self.table[start..], |&sufi| {
                !self.codes[sufi as usize..].starts_with(&query)
            });

        if start > end {
            &[]
        } else {
            &self.table[start..end]
        }
    }
}

impl fmt::Debug for SuffixTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n-----------------------------------------")?;
        writeln!(f, "SUFFIX TABLE")?;
        for (rank, &sufstart) in self.table.iter().enumerate() {
            writeln!(f, "suffix[{}] {}", rank, sufstart)?;
        }
        writeln!(f, "-----------------------------------------")
    }
}

/// Binary search to find first element such that `pred(T) == true`.
///
/// Assumes that if `pred(xs[i]) == true` then `pred(xs[i+1]) == true`.
///
/// If all elements yield `pred(T) == false`, then `xs.len()` is returned.
fn binary_search<T, F>(xs: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let (mut left, mut right) = (0, xs.len());
    while left < right {
        let mid = (left + right) / 2;
        if pred(&xs[mid]) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lc(text: &str) -> SuffixTable {
        SuffixTable::new(text.as_bytes().to_vec(), &Alphabet::lowercase()).unwrap()
    }

    #[test]
    fn banana() {
        let st = lc("banana");
        assert_eq!(st.table(), &[5, 3, 1, 0, 4, 2]);
        assert!(st.is_sorted());
        assert_eq!(st.suffix(0), b"a");
        assert_eq!(st.suffix(3), b"banana");
    }

    #[test]
    fn empty_text() {
        let st = lc("");
        assert!(st.is_empty());
        assert_eq!(st.table(), &[] as &[u32]);
    }

    #[test]
    fn rejects_out_of_alphabet_bytes() {
        let err = SuffixTable::new(b"not lowercase".to_vec(), &Alphabet::lowercase());
        assert!(err.is_err());
    }

    #[test]
    fn inverse_is_inverse() {
        let st = lc("mississippi");
        let positions = st.inverse();
        for (rank, &start) in st.table().iter().enumerate() {
            assert_eq!(positions[start as usize], rank as u32);
        }
    }

    #[test]
    fn positions_and_contains() {
        let ab = Alphabet::lowercase();
        let st = lc("zzzzabczzzzzabczzzzzz");
        let mut found = st.positions(b"abc", &ab).to_vec();
        found.sort_unstable();
        assert_eq!(found, vec![4, 12]);
        assert!(st.contains(b"abc", &ab));
        assert!(!st.contains(b"cba", &ab));
        assert!(!st.contains(b"a!c", &ab));
    }

    #[test]
    fn order_follows_alphabet_not_bytes() {
        // 'b' gets a smaller code than 'a'.
        let ab = Alphabet::new(b"ba").unwrap();
        let st = SuffixTable::new(b"ab".to_vec(), &ab).unwrap();
        // Suffix "b" sorts before "ab".
        assert_eq!(st.table(), &[1, 0]);
    }
}
