//! bloomfilters implements a thread-safe bloom filter backed by a fixed array
//! of 64-bit words, with a caller-supplied list of hash functions.
//!
//! A filter answers "definitely absent" or "possibly present" for byte-string
//! keys in `O(k)` time, where `k` is the number of configured hash functions.
//! Use [`optimal_params`] to size the bit array for an expected number of
//! entries and a target false-positive rate:
//!
//! ```rust
//! use bloomfilters::{default_hashes, optimal_params, Bloom};
//!
//! let params = optimal_params(1_000, 0.01).unwrap();
//! let filter = Bloom::new(params.bits, default_hashes());
//!
//! filter.set("hello 🐐").unwrap();
//! assert!(filter.test("hello 🐐").unwrap());
//! ```
//!
//! Filters are insert-only: entries cannot be removed, and the bit array is
//! never resized.
//!
//! ## Features
//!
//! * `serde` - enable serialisation of [`FilterParams`] with [serde], disabled
//!   by default
//!
//! [serde]: (https://github.com/serde-rs/serde)

mod bitmap;
mod bloom;
mod error;
pub mod hash;
mod index;
mod params;

pub use bloom::*;
pub use error::*;
pub use hash::{default_hashes, HashFunction};
pub use index::*;
pub use params::*;
