//! Hash functions used to map keys to bit indexes.

use std::io::Cursor;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A hash function mapping an arbitrary byte sequence to a 64-bit value.
///
/// Implementations must be deterministic. Any `Fn(&[u8]) -> u64` that is
/// `Send + Sync` implements this trait, so plain functions and closures can
/// be mixed freely with the defaults:
///
/// ```rust
/// use bloomfilters::{hash, Bloom, HashFunction};
///
/// let seed = 42_u64;
/// let hashes: Vec<Box<dyn HashFunction>> = vec![
///     Box::new(hash::fnv1) as Box<dyn HashFunction>,
///     Box::new(move |data: &[u8]| hash::murmur3(data) ^ seed) as Box<dyn HashFunction>,
/// ];
///
/// let filter = Bloom::new(1024, hashes);
/// filter.set(b"hello").unwrap();
/// assert!(filter.test(b"hello").unwrap());
/// ```
pub trait HashFunction: Send + Sync {
    /// Hash `data` to a 64-bit value.
    fn hash(&self, data: &[u8]) -> u64;
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> u64 + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> u64 {
        self(data)
    }
}

/// 64-bit FNV-1.
pub fn fnv1(data: &[u8]) -> u64 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        hash.wrapping_mul(FNV_PRIME) ^ u64::from(byte)
    })
}

/// The lower 64 bits of MurmurHash3 x64/128 with a zero seed.
pub fn murmur3(data: &[u8]) -> u64 {
    // Reading from an in-memory slice cannot fail.
    ::murmur3::murmur3_x64_128(&mut Cursor::new(data), 0)
        .map(|hash| hash as u64)
        .unwrap_or_default()
}

/// The default hash function list: [`fnv1`] followed by [`murmur3`].
pub fn default_hashes() -> Vec<Box<dyn HashFunction>> {
    vec![
        Box::new(fnv1) as Box<dyn HashFunction>,
        Box::new(murmur3) as Box<dyn HashFunction>,
    ]
}
