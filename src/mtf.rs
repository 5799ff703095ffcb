use crate::alphabet::Alphabet;
use anyhow::Result;
use std::collections::VecDeque;

/// Move-to-front transform over an alphabet.
///
/// Each symbol is replaced by its rank in a recency list, then moved to the
/// list's front. Ranks are re-expressed as alphabet symbols so the whole
/// compression pipeline stays byte-on-byte (the rank is at most
/// `sigma - 1`, so every rank has a symbol).

/// Encodes `text`; output byte `i` is the alphabet symbol whose code equals
/// the recency rank of `text[i]`.
pub fn encode(text: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>> {
    let codes = alphabet.encode(text)?;
    let mut recency: VecDeque<u8> = (0..alphabet.len() as u8).collect();
    let mut out = Vec::with_capacity(text.len());

    for code in codes {
        let rank = recency
            .iter()
            .position(|&c| c == code)
            .expect("recency list holds every code");
        out.push(alphabet.symbol(rank as u8));
        recency.remove(rank);
        recency.push_front(code);
    }
    Ok(out)
}

/// Decodes a move-to-front encoding. Inverse of [`encode`].
pub fn decode(text: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>> {
    let ranks = alphabet.encode(text)?;
    let mut recency: VecDeque<u8> = (0..alphabet.len() as u8).collect();
    let mut out = Vec::with_capacity(text.len());

    for rank in ranks {
        let code = recency[rank as usize];
        out.push(alphabet.symbol(code));
        recency.remove(rank as usize);
        recency.push_front(code);
    }
    Ok(out)
}
