use crate::alphabet::Alphabet;
use crate::doubling::sort_rotations;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Output of the Burrows-Wheeler transform: the last column of the sorted
/// rotation matrix plus the rank of the untouched rotation, which the
/// inverse needs to know where to start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bwt {
    pub data: Vec<u8>,
    pub primary_index: u32,
}

/// Burrows-Wheeler transform of `text` over `alphabet`.
///
/// Sorts the rotations of `text` (no sentinel — rotation order is exactly
/// what the cyclic prefix-doubling sort produces) and emits, for each
/// rotation, the symbol cyclically preceding its start.
///
/// # Example
///
/// ```rust
/// use sufftk::{bwt, Alphabet};
///
/// let ab = Alphabet::lowercase();
/// let out = bwt::transform(b"banana", &ab).unwrap();
/// assert_eq!(out.data, b"nnbaaa");
/// assert_eq!(out.primary_index, 3);
/// assert_eq!(bwt::invert(&out, &ab).unwrap(), b"banana");
/// ```
pub fn transform(text: &[u8], alphabet: &Alphabet) -> Result<Bwt> {
    let codes = alphabet.encode(text)?;
    let order = sort_rotations(&codes, alphabet.len());

    let n = text.len();
    let mut data = Vec::with_capacity(n);
    let mut primary_index = 0u32;
    for (rank, &start) in order.iter().enumerate() {
        data.push(text[(start as usize + n - 1) % n]);
        if start == 0 {
            primary_index = rank as u32;
        }
    }

    Ok(Bwt {
        data,
        primary_index,
    })
}

/// Inverts the Burrows-Wheeler transform in `O(n)` for a bounded alphabet.
///
/// Counting-sorts the transformed symbols to recover the first column of
/// the rotation matrix, derives the last-to-first transfer permutation from
/// stable per-symbol occurrence counts, and follows the chain from the
/// primary index. Does not touch the suffix array.
pub fn invert(bwt: &Bwt, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let codes = alphabet.encode(&bwt.data)?;
    let n = codes.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if bwt.primary_index as usize >= n {
        bail!(
            "primary index {} out of range for length {}",
            bwt.primary_index,
            n
        );
    }

    let sigma = alphabet.len();
    let mut symbol_count = vec![0u32; sigma];
    let mut earlier_same = vec![0u32; n];
    for (i, &c) in codes.iter().enumerate() {
        earlier_same[i] = symbol_count[c as usize];
        symbol_count[c as usize] += 1;
    }
    let mut cumulative = vec![0u32; sigma];
    for c in 1..sigma {
        cumulative[c] = cumulative[c - 1] + symbol_count[c - 1];
    }
    let mut transfer = vec![0u32; n];
    for (i, &c) in codes.iter().enumerate() {
        let sorted_rank = cumulative[c as usize] + earlier_same[i];
        transfer[sorted_rank as usize] = i as u32;
    }

    // First column of the sorted rotation matrix.
    let mut first_column = Vec::with_capacity(n);
    for (c, &count) in symbol_count.iter().enumerate() {
        for _ in 0..count {
            first_column.push(alphabet.symbol(c as u8));
        }
    }

    let mut decoded = Vec::with_capacity(n);
    let mut next = bwt.primary_index as usize;
    for _ in 0..n {
        decoded.push(first_column[next]);
        next = transfer[next] as usize;
    }
    Ok(decoded)
}
