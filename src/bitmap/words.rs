/// A fixed-length, heap-allocated array of 64-bit words.
///
/// The array is allocated once and never resized. Bits are addressed by a
/// word index and a mask of bit positions within that word, which is how
/// [`IndexMap`](crate::IndexMap) records them.
#[derive(Debug)]
pub struct WordBitmap {
    words: Box<[u64]>,
}

impl WordBitmap {
    /// Allocate `word_len` zeroed words.
    pub fn new(word_len: usize) -> Self {
        Self {
            words: vec![0; word_len].into_boxed_slice(),
        }
    }

    /// Set every bit in `mask` within word `word`.
    ///
    /// # Panics
    ///
    /// Panics if `word` is out of bounds.
    pub fn set_mask(&mut self, word: usize, mask: u64) {
        self.words[word] |= mask;
    }

    /// Return the bits of `mask` that are not set in word `word`.
    ///
    /// # Panics
    ///
    /// Panics if `word` is out of bounds.
    pub fn missing(&self, word: usize, mask: u64) -> u64 {
        mask & !self.words[word]
    }

    /// Return `true` if bit `bit` of word `word` is set.
    ///
    /// # Panics
    ///
    /// Panics if `word` is out of bounds.
    pub fn get(&self, word: usize, bit: u32) -> bool {
        (self.words[word] >> bit) & 1 == 1
    }

    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// The number of addressable bits.
    pub fn bit_len(&self) -> usize {
        self.words.len() * 64
    }

    /// The number of set bits across all words.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const WORDS: usize = 16;

    #[test]
    fn test_new_is_zeroed() {
        let b = WordBitmap::new(3);
        assert_eq!(b.word_len(), 3);
        assert_eq!(b.bit_len(), 192);
        assert_eq!(b.count_ones(), 0);
        assert_eq!(b.missing(2, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_set_mask_is_idempotent() {
        let mut b = WordBitmap::new(1);
        b.set_mask(0, 0b101001);
        b.set_mask(0, 0b101001);

        assert_eq!(b.count_ones(), 3);
        assert!(b.get(0, 0));
        assert!(b.get(0, 3));
        assert!(b.get(0, 5));
        assert!(!b.get(0, 6));
        assert_eq!(b.missing(0, 0b101001), 0);
        assert_eq!(b.missing(0, 0b1101001), 0b1000000);
    }

    proptest! {
        #[test]
        fn prop_set_get(
            values in prop::collection::hash_set((0..WORDS, 0_u32..64), 0..40),
        ) {
            let mut b = WordBitmap::new(WORDS);

            for &(word, bit) in &values {
                b.set_mask(word, 1_u64 << bit);
            }

            // Invariant: a bit is set only when it was inserted.
            for word in 0..WORDS {
                for bit in 0..64 {
                    prop_assert_eq!(b.get(word, bit), values.contains(&(word, bit)));
                    prop_assert_eq!(b.missing(word, 1_u64 << bit) == 0, b.get(word, bit));
                }
            }
            prop_assert_eq!(b.count_ones(), values.len());
        }
    }
}
