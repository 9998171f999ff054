use std::collections::BTreeMap;

/// A set of bit locations within a [`Bloom`](crate::Bloom) bit array, keyed
/// by word index.
///
/// Each word maps to a 64-bit mask of the bit positions touched within it,
/// so recording the same location twice is a no-op. Iteration is in
/// ascending word, then bit, order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMap {
    words: BTreeMap<usize, u64>,
}

impl IndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record bit `bit` (0-63) of word `word`.
    ///
    /// # Panics
    ///
    /// Panics if `bit` is not below 64.
    pub fn insert(&mut self, word: usize, bit: u32) {
        assert!(bit < 64, "bit position {} out of range", bit);
        *self.words.entry(word).or_insert(0) |= 1_u64 << bit;
    }

    /// Return `true` if bit `bit` of word `word` has been recorded.
    pub fn contains(&self, word: usize, bit: u32) -> bool {
        bit < 64
            && self
                .words
                .get(&word)
                .map_or(false, |mask| mask & (1_u64 << bit) != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The number of distinct words with at least one recorded bit.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// The total number of distinct bits recorded.
    pub fn bit_count(&self) -> usize {
        self.words
            .values()
            .map(|mask| mask.count_ones() as usize)
            .sum()
    }

    /// The bit positions recorded for `word`, in ascending order.
    pub fn positions(&self, word: usize) -> impl Iterator<Item = u32> {
        mask_positions(self.words.get(&word).copied().unwrap_or(0))
    }

    /// Iterate over all recorded `(word, bit)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.words
            .iter()
            .flat_map(|(&word, &mask)| mask_positions(mask).map(move |bit| (word, bit)))
    }

    /// Iterate over each recorded word and its mask of touched bits.
    pub fn words(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.words.iter().map(|(&word, &mask)| (word, mask))
    }

    /// OR `mask` into the set of bits recorded for `word`. An empty mask
    /// records nothing.
    pub(crate) fn insert_mask(&mut self, word: usize, mask: u64) {
        if mask != 0 {
            *self.words.entry(word).or_insert(0) |= mask;
        }
    }
}

impl std::iter::FromIterator<(usize, u32)> for IndexMap {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        let mut map = IndexMap::new();
        for (word, bit) in iter {
            map.insert(word, bit);
        }
        map
    }
}

fn mask_positions(mut mask: u64) -> impl Iterator<Item = u32> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let bit = mask.trailing_zeros();
        mask &= mask - 1;
        Some(bit)
    })
}
