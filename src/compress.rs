use crate::alphabet::Alphabet;
use crate::bwt::{self, Bwt};
use crate::huffman;
use crate::mtf;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A fully compressed text: Burrows-Wheeler transform, then move-to-front,
/// then Huffman coding. Serialized with bincode by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compressed {
    /// Rank of the untouched rotation in the BWT.
    pub primary_index: u32,
    /// Huffman codebook: `(symbol, code bits)` pairs.
    pub codebook: Vec<(u8, Vec<u8>)>,
    /// Meaningful bits in `payload`.
    pub bit_len: u64,
    /// Packed Huffman stream.
    pub payload: Vec<u8>,
}

/// Compresses `text` over `alphabet`.
///
/// The BWT groups symbols by right context, move-to-front turns those runs
/// into small ranks, and the Huffman pass squeezes the skewed rank
/// distribution.
///
/// # Example
///
/// ```rust
/// use sufftk::{compress, Alphabet};
///
/// let ab = Alphabet::text();
/// let packed = compress::compress(b"it was the best of times", &ab).unwrap();
/// let restored = compress::decompress(&packed, &ab).unwrap();
/// assert_eq!(restored, b"it was the best of times");
/// ```
pub fn compress(text: &[u8], alphabet: &Alphabet) -> Result<Compressed> {
    let transformed = bwt::transform(text, alphabet)?;
    let ranked = mtf::encode(&transformed.data, alphabet)?;
    let encoded = huffman::encode(&ranked, alphabet)?;

    Ok(Compressed {
        primary_index: transformed.primary_index,
        codebook: encoded.codebook,
        bit_len: encoded.bit_len,
        payload: encoded.payload,
    })
}

/// Inverts [`compress`].
pub fn decompress(compressed: &Compressed, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let ranked = huffman::decode(
        &compressed.codebook,
        compressed.bit_len,
        &compressed.payload,
    )?;
    let data = mtf::decode(&ranked, alphabet)?;
    bwt::invert(
        &Bwt {
            data,
            primary_index: compressed.primary_index,
        },
        alphabet,
    )
}
