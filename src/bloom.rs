use crate::{bitmap::WordBitmap, params, BloomError, HashFunction, IndexMap};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// The smallest bit array a [`Bloom`] filter can be constructed with.
pub const MIN_BITS: usize = 64;

/// A thread-safe bloom filter over byte-string keys.
///
/// The filter stores its state in a fixed array of 64-bit words, and maps
/// each key to a set of bits by applying every configured [`HashFunction`]
/// to it. Each 64-bit hash value `h` addresses bit `h % 64` of word
/// `h / 64`; hash values beyond the end of the array wrap around modulo the
/// word count.
///
/// ```rust
/// use bloomfilters::{default_hashes, optimal_params, Bloom};
///
/// let params = optimal_params(100_000, 0.001).unwrap();
/// let filter = Bloom::new(params.bits, default_hashes());
///
/// filter.set("Bob").unwrap();
///
/// assert!(filter.test("Bob").unwrap());
/// assert!(!filter.test("Joe").unwrap());
/// assert_eq!(filter.insert_count(), 1);
/// ```
///
/// A `Bloom` is `Send + Sync` and is shared between threads by reference or
/// through an [`Arc`](std::sync::Arc). Calls to [`test`](Bloom::test) run
/// concurrently with each other, while [`set`](Bloom::set) takes exclusive
/// access to the bit array.
pub struct Bloom {
    bitmap: RwLock<WordBitmap>,
    hashes: Vec<Box<dyn HashFunction>>,
    inserts: AtomicU64,
}

impl Bloom {
    /// Initialise a filter with `size` bits, using `hashes` to map keys to
    /// bits.
    ///
    /// `size` is rounded down to the nearest multiple of 64. The hash
    /// functions are applied in order on every operation, and there need not
    /// be as many as the [suggested hash count](crate::FilterParams). An
    /// empty `hashes` list is accepted here, but every subsequent
    /// [`set`](Bloom::set) and [`test`](Bloom::test) returns
    /// [`BloomError::NoHashFunctions`].
    ///
    /// # Panics
    ///
    /// Panics if `size` is less than [`MIN_BITS`]. Use
    /// [`try_new`](Bloom::try_new) to handle this as an error instead.
    pub fn new(size: usize, hashes: Vec<Box<dyn HashFunction>>) -> Self {
        match Self::try_new(size, hashes) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`new`](Bloom::new), but returns [`BloomError::SizeTooSmall`]
    /// instead of panicking when `size` is less than [`MIN_BITS`].
    pub fn try_new(size: usize, hashes: Vec<Box<dyn HashFunction>>) -> Result<Self, BloomError> {
        if size < MIN_BITS {
            return Err(BloomError::SizeTooSmall { size });
        }

        let bits = size - (size % 64);
        if bits != size {
            debug!(requested = size, bits, "rounded bit array size down to a multiple of 64");
        }

        if hashes.is_empty() {
            warn!("bloom filter initialised without any hash functions");
        }

        let word_len = bits / 64;
        debug!(bits, word_len, hash_count = hashes.len(), "initialised bloom filter");

        Ok(Self {
            bitmap: RwLock::new(WordBitmap::new(word_len)),
            hashes,
            inserts: AtomicU64::new(0),
        })
    }

    /// Initialise a filter sized by [`optimal_params`](crate::optimal_params)
    /// to hold `expected_items` entries at a `false_positive_rate`.
    ///
    /// The suggested hash count is not enforced; `hashes` is used as given.
    pub fn optimal(
        expected_items: u64,
        false_positive_rate: f64,
        hashes: Vec<Box<dyn HashFunction>>,
    ) -> Result<Self, BloomError> {
        let params = params::optimal_params(expected_items, false_positive_rate)?;
        if params.hash_count != hashes.len() {
            debug!(
                suggested = params.hash_count,
                configured = hashes.len(),
                "hash function count differs from the suggested count"
            );
        }
        Self::try_new(params.bits, hashes)
    }

    /// Insert `key` into the filter.
    ///
    /// Any subsequent call to [`test`](Bloom::test) for the same `key` will
    /// return `true`. Inserting a key is idempotent.
    ///
    /// An empty key produces no hash values, and so sets no bits.
    ///
    /// Every call increments the [insert count](Bloom::insert_count) by one,
    /// including calls that set no bits or that fail.
    pub fn set<K: AsRef<[u8]>>(&self, key: K) -> Result<(), BloomError> {
        if self.hashes.is_empty() {
            self.inserts.fetch_add(1, Ordering::Relaxed);
            return Err(BloomError::NoHashFunctions);
        }

        let key = key.as_ref();
        self.set_hashes(&self.apply_hashes(key));

        trace!(key_len = key.len(), "set key");
        Ok(())
    }

    /// Checks if `key` exists in the filter.
    ///
    /// If `test` returns true, `key` has **probably** been inserted
    /// previously. If `test` returns false, `key` has **definitely not** been
    /// inserted into the filter.
    ///
    /// An empty key always tests `false`.
    pub fn test<K: AsRef<[u8]>>(&self, key: K) -> Result<bool, BloomError> {
        if self.hashes.is_empty() {
            return Err(BloomError::NoHashFunctions);
        }

        let key = key.as_ref();
        let found = self.test_hashes(&self.apply_hashes(key));

        trace!(key_len = key.len(), found, "tested key");
        Ok(found)
    }

    /// Set the bits addressed by the raw hash values in `hashes`, and count
    /// it as one insert.
    pub fn set_hashes(&self, hashes: &[u64]) {
        let indexes = self.locate(hashes);

        let mut bitmap = self.bitmap.write();
        for (word, mask) in indexes.words() {
            bitmap.set_mask(word, mask);
        }
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Return `true` if every bit addressed by the raw hash values in
    /// `hashes` is set, stopping at the first unset bit.
    ///
    /// An empty `hashes` slice returns `false`.
    pub fn test_hashes(&self, hashes: &[u64]) -> bool {
        let indexes = self.locate(hashes);
        if indexes.is_empty() {
            return false;
        }

        let bitmap = self.bitmap.read();
        let found = indexes
            .words()
            .all(|(word, mask)| bitmap.missing(word, mask) == 0);
        found
    }

    /// Map raw hash values to the bit locations they address in this filter.
    ///
    /// Each hash value `h` addresses bit `h % 64` of word `h / 64`. A word
    /// index past the end of the bit array wraps around modulo the word
    /// count, so large hash values share words with small ones. This raises
    /// the collision rate for hash functions whose output range is much
    /// larger than the filter, which is the norm for 64-bit hashes.
    pub fn locate(&self, hashes: &[u64]) -> IndexMap {
        let word_len = self.word_len() as u64;

        let mut indexes = IndexMap::new();
        for &h in hashes {
            let bit = (h % 64) as u32;
            let mut word = h / 64;
            if word >= word_len {
                word %= word_len;
            }
            indexes.insert(word as usize, bit);
        }
        indexes
    }

    /// Check every bit in `indexes` without stopping at the first unset bit.
    ///
    /// Returns the subset of `indexes` that is not set, and `true` if that
    /// subset is empty. An empty `indexes` is reported as not set, with no
    /// faulty entries.
    ///
    /// Words past the end of the bit array can never be set, so any bits
    /// recorded for them are reported as faulty. Maps produced by
    /// [`locate`](Bloom::locate) never contain such words.
    pub fn check_bits(&self, indexes: &IndexMap) -> (IndexMap, bool) {
        let mut faulty = IndexMap::new();
        if indexes.is_empty() {
            return (faulty, false);
        }

        let bitmap = self.bitmap.read();
        for (word, mask) in indexes.words() {
            if word >= bitmap.word_len() {
                faulty.insert_mask(word, mask);
                continue;
            }
            faulty.insert_mask(word, bitmap.missing(word, mask));
        }
        drop(bitmap);

        let all_set = faulty.is_empty();
        (faulty, all_set)
    }

    /// The number of [`set`](Bloom::set) and [`set_hashes`](Bloom::set_hashes)
    /// calls made against this filter.
    pub fn insert_count(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// The number of addressable bits.
    pub fn bit_len(&self) -> usize {
        self.bitmap.read().bit_len()
    }

    /// The number of 64-bit words backing the filter.
    pub fn word_len(&self) -> usize {
        self.bitmap.read().word_len()
    }

    /// The number of configured hash functions.
    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }

    /// The number of bits currently set.
    pub fn count_ones(&self) -> usize {
        self.bitmap.read().count_ones()
    }

    /// Estimate the current false-positive probability from the filter size,
    /// hash count and [insert count](Bloom::insert_count).
    pub fn estimated_false_positive_rate(&self) -> f64 {
        params::false_positive_rate(self.bit_len(), self.insert_count(), self.hash_count())
    }

    fn apply_hashes(&self, key: &[u8]) -> Vec<u64> {
        if key.is_empty() {
            return Vec::new();
        }
        self.hashes.iter().map(|h| h.hash(key)).collect()
    }
}

impl fmt::Debug for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bloom")
            .field("bit_len", &self.bit_len())
            .field("hash_count", &self.hash_count())
            .field("insert_count", &self.insert_count())
            .finish()
    }
}
