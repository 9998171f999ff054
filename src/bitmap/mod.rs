//! Packed word storage backing a [`Bloom`](crate::Bloom) filter.

mod words;
pub use words::*;
