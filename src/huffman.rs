use crate::alphabet::Alphabet;
use anyhow::{bail, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Huffman coding over alphabet symbols.
///
/// The tree is built from symbol frequencies with a min-heap; each symbol's
/// code is its root-to-leaf path (left 0, right 1). Code bits are packed
/// into bytes least-significant bit first, the layout the decoder and the
/// on-disk artifact share.

/// A Huffman-coded buffer together with everything needed to decode it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// `(symbol, code bits)` pairs; bits are 0/1 bytes, in code order.
    pub codebook: Vec<(u8, Vec<u8>)>,
    /// Number of meaningful bits in `payload`.
    pub bit_len: u64,
    /// Packed code stream, LSB-first within each byte.
    pub payload: Vec<u8>,
}

enum Node {
    Leaf(u8),
    Branch(Box<Node>, Box<Node>),
}

/// Heap entry ordered by count, with an insertion sequence number breaking
/// ties so tree shape (and thus the codebook) is deterministic.
struct Weighted {
    count: u64,
    seq: u32,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        (self.count, self.seq) == (other.count, other.seq)
    }
}
impl Eq for Weighted {}
impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Weighted {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the rarest first.
        (other.count, other.seq).cmp(&(self.count, self.seq))
    }
}

/// Huffman-encodes `text` over `alphabet`.
pub fn encode(text: &[u8], alphabet: &Alphabet) -> Result<Encoded> {
    let codes = alphabet.encode(text)?;
    if codes.is_empty() {
        return Ok(Encoded {
            codebook: Vec::new(),
            bit_len: 0,
            payload: Vec::new(),
        });
    }

    let mut frequencies = vec![0u64; alphabet.len()];
    for &c in &codes {
        frequencies[c as usize] += 1;
    }

    let mut heap = BinaryHeap::new();
    let mut seq = 0u32;
    for (code, &count) in frequencies.iter().enumerate() {
        if count > 0 {
            heap.push(Weighted {
                count,
                seq,
                node: Node::Leaf(code as u8),
            });
            seq += 1;
        }
    }
    while heap.len() > 1 {
        let first = heap.pop().expect("heap holds at least two entries");
        let second = heap.pop().expect("heap holds at least two entries");
        heap.push(Weighted {
            count: first.count + second.count,
            seq,
            node: Node::Branch(Box::new(first.node), Box::new(second.node)),
        });
        seq += 1;
    }
    let root = heap.pop().expect("non-empty input yields a root").node;

    let mut codebook = Vec::new();
    match &root {
        // A lone symbol still needs one bit per occurrence, or the decoder
        // could never tell how many there were.
        Node::Leaf(code) => codebook.push((alphabet.symbol(*code), vec![0])),
        Node::Branch(..) => collect_codes(&root, &mut Vec::new(), alphabet, &mut codebook),
    }

    let mut bits_of = [None::<&Vec<u8>>; 256];
    for (symbol, bits) in &codebook {
        bits_of[*symbol as usize] = Some(bits);
    }

    let mut payload = Vec::new();
    let mut bit_len = 0u64;
    let mut current = 0u8;
    let mut used = 0u32;
    for &symbol in text {
        let bits = bits_of[symbol as usize].expect("every input symbol is in the codebook");
        for &bit in bits.iter() {
            if bit == 1 {
                current |= 1 << used;
            }
            used += 1;
            bit_len += 1;
            if used == 8 {
                payload.push(current);
                current = 0;
                used = 0;
            }
        }
    }
    if used > 0 {
        payload.push(current);
    }

    Ok(Encoded {
        codebook,
        bit_len,
        payload,
    })
}

fn collect_codes(
    node: &Node,
    prefix: &mut Vec<u8>,
    alphabet: &Alphabet,
    codebook: &mut Vec<(u8, Vec<u8>)>,
) {
    match node {
        Node::Leaf(code) => codebook.push((alphabet.symbol(*code), prefix.clone())),
        Node::Branch(left, right) => {
            prefix.push(0);
            collect_codes(left, prefix, alphabet, codebook);
            prefix.pop();
            prefix.push(1);
            collect_codes(right, prefix, alphabet, codebook);
            prefix.pop();
        }
    }
}

#[derive(Default)]
struct TrieNode {
    symbol: Option<u8>,
    children: [Option<Box<TrieNode>>; 2],
}

fn decode_trie(codebook: &[(u8, Vec<u8>)]) -> Result<TrieNode> {
    let mut root = TrieNode::default();
    for (symbol, bits) in codebook {
        if bits.is_empty() {
            bail!("empty code for symbol {:?}", *symbol as char);
        }
        let mut node = &mut root;
        for &bit in bits {
            if bit > 1 {
                bail!("code bit {} for symbol {:?} is not 0/1", bit, *symbol as char);
            }
            if node.symbol.is_some() {
                bail!("codebook is not prefix-free");
            }
            node = node.children[bit as usize].get_or_insert_with(Default::default);
        }
        if node.symbol.is_some() || node.children.iter().any(Option::is_some) {
            bail!("codebook is not prefix-free");
        }
        node.symbol = Some(*symbol);
    }
    Ok(root)
}

/// Decodes `bit_len` bits of `payload` against `codebook`. Inverse of
/// [`encode`] for a matching codebook.
pub fn decode(codebook: &[(u8, Vec<u8>)], bit_len: u64, payload: &[u8]) -> Result<Vec<u8>> {
    if bit_len == 0 {
        return Ok(Vec::new());
    }
    if bit_len.div_ceil(8) > payload.len() as u64 {
        bail!(
            "payload of {} bytes too short for {} bits",
            payload.len(),
            bit_len
        );
    }

    let root = decode_trie(codebook)?;
    let mut out = Vec::new();
    let mut node = &root;
    let mut depth = 0usize;
    for bit_index in 0..bit_len {
        let bit = (payload[(bit_index / 8) as usize] >> (bit_index % 8)) & 1;
        node = match &node.children[bit as usize] {
            Some(child) => child,
            None => bail!("bit stream does not match the codebook"),
        };
        depth += 1;
        if let Some(symbol) = node.symbol {
            out.push(symbol);
            node = &root;
            depth = 0;
        }
    }
    if depth != 0 {
        bail!("bit stream ends inside a code");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let ab = Alphabet::text();
        for text in [
            "",
            "a",
            "aaaaaaa",
            "abracadabra",
            "Hello, world!",
            "What a piece of work is a man",
        ] {
            let encoded = encode(text.as_bytes(), &ab).unwrap();
            let decoded = decode(&encoded.codebook, encoded.bit_len, &encoded.payload).unwrap();
            assert_eq!(decoded, text.as_bytes(), "{text}");
        }
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let ab = Alphabet::lowercase();
        let encoded = encode(b"aaaa", &ab).unwrap();
        assert_eq!(encoded.codebook, vec![(b'a', vec![0])]);
        assert_eq!(encoded.bit_len, 4);
        assert_eq!(encoded.payload, vec![0]);
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let ab = Alphabet::lowercase();
        let encoded = encode(b"aaaaaaaabc", &ab).unwrap();
        let code_len = |sym: u8| {
            encoded
                .codebook
                .iter()
                .find(|(s, _)| *s == sym)
                .map(|(_, bits)| bits.len())
                .unwrap()
        };
        assert!(code_len(b'a') < code_len(b'b'));
        assert!(code_len(b'a') < code_len(b'c'));
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let ab = Alphabet::lowercase();
        let encoded = encode(b"abcabcxyz", &ab).unwrap();
        assert!(decode(&encoded.codebook, encoded.bit_len + 1, &encoded.payload).is_err());
        assert!(decode(&encoded.codebook, encoded.bit_len, &[]).is_err());
    }

    #[test]
    fn conflicting_codebook_is_rejected() {
        let bad = vec![(b'a', vec![0]), (b'b', vec![0, 1])];
        assert!(decode(&bad, 1, &[0]).is_err());
    }
}
