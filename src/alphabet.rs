use anyhow::{bail, Result};

/// A fixed, ordered set of allowed byte symbols.
///
/// Every symbol maps to a dense code in `[0, sigma)`; code order is the
/// lexicographic order used by the suffix array and the compression
/// pipeline. The rotation sorter consumes these codes as-is; only the
/// suffix-array builder shifts them up by one internally to make room for
/// its end-of-string sentinel.
#[derive(Clone, Debug)]
pub struct Alphabet {
    symbols: Vec<u8>,
    code_of: [Option<u8>; 256],
}

impl Alphabet {
    /// Builds an alphabet from an ordered symbol slice. The slice order is
    /// the code order. Duplicate symbols are rejected.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            bail!("alphabet must contain at least one symbol");
        }
        if symbols.len() > 255 {
            bail!("alphabet too large: {} symbols (max 255)", symbols.len());
        }
        let mut code_of = [None; 256];
        for (code, &sym) in symbols.iter().enumerate() {
            if code_of[sym as usize].is_some() {
                bail!("duplicate symbol {:?} in alphabet", sym as char);
            }
            code_of[sym as usize] = Some(code as u8);
        }
        Ok(Alphabet {
            symbols: symbols.to_vec(),
            code_of,
        })
    }

    /// The lowercase letters `a..=z`.
    pub fn lowercase() -> Self {
        Self::new(&(b'a'..=b'z').collect::<Vec<_>>()).unwrap()
    }

    /// The allowed-symbol set of the text compressor: ASCII letters, space
    /// and a handful of punctuation marks.
    pub fn text() -> Self {
        Self::new(br#"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ ()':,.!?""#)
            .unwrap()
    }

    /// Number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Dense code of `symbol`, or `None` if it is not in the alphabet.
    #[inline]
    pub fn code(&self, symbol: u8) -> Option<u8> {
        self.code_of[symbol as usize]
    }

    /// Symbol carrying code `code`. Panics if the code is out of range.
    #[inline]
    pub fn symbol(&self, code: u8) -> u8 {
        self.symbols[code as usize]
    }

    /// Maps a byte string to its code sequence, failing fast on the first
    /// byte outside the alphabet.
    pub fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        text.iter()
            .map(|&b| match self.code(b) {
                Some(c) => Ok(c),
                None => bail!("symbol {:?} (0x{:02x}) is not in the alphabet", b as char, b),
            })
            .collect()
    }

    /// Maps a code sequence back to bytes. Inverse of `encode`.
    pub fn decode(&self, codes: &[u8]) -> Result<Vec<u8>> {
        codes
            .iter()
            .map(|&c| {
                if (c as usize) < self.symbols.len() {
                    Ok(self.symbols[c as usize])
                } else {
                    bail!("code {} out of range for alphabet of size {}", c, self.len())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_slice_order() {
        let ab = Alphabet::new(b"bac").unwrap();
        assert_eq!(ab.code(b'b'), Some(0));
        assert_eq!(ab.code(b'a'), Some(1));
        assert_eq!(ab.code(b'c'), Some(2));
        assert_eq!(ab.code(b'z'), None);
        assert_eq!(ab.symbol(1), b'a');
    }

    #[test]
    fn duplicate_symbol_rejected() {
        assert!(Alphabet::new(b"aba").is_err());
    }

    #[test]
    fn encode_rejects_foreign_bytes() {
        let ab = Alphabet::lowercase();
        assert!(ab.encode(b"hello world").is_err());
        assert_eq!(ab.encode(b"hello").unwrap(), vec![7, 4, 11, 11, 14]);
    }

    #[test]
    fn text_alphabet_covers_compressor_symbols() {
        let ab = Alphabet::text();
        assert_eq!(ab.len(), 62);
        assert!(ab.encode(b"Hello, world!").is_ok());
    }
}
