//! Optimal filter sizing.
//!
//! Translates an expected number of entries `n` and a desired false-positive
//! probability `p` into a bit array size `m` and hash function count `k`:
//!
//! ```text
//!     m = ceil(-n * ln(p) / (ln 2)^2)
//!     k = ceil((m / n) * ln 2)
//! ```

use std::f64::consts::LN_2;

use crate::BloomError;

/// Bit array size and hash function count for a [`Bloom`](crate::Bloom)
/// filter, as computed by [`optimal_params`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterParams {
    /// Size of the bit array, always a multiple of 64.
    pub bits: usize,

    /// Suggested number of hash functions.
    pub hash_count: usize,
}

/// Compute the bit array size and hash function count needed to hold
/// `expected_items` entries with a false-positive probability of
/// `false_positive_rate`.
///
/// The bit array size is rounded **down** to the nearest multiple of 64 so
/// it can be passed straight to [`Bloom::new`](crate::Bloom::new) without
/// further truncation. This means the returned size can be up to 63 bits
/// smaller than the optimum, and the effective false-positive rate is
/// slightly above the requested rate for small filters. For very small
/// `expected_items` the aligned size may fall below the 64 bit minimum a
/// filter accepts.
///
/// The hash count is derived from the unaligned size.
///
/// ```rust
/// use bloomfilters::optimal_params;
///
/// let params = optimal_params(100_000, 0.001).unwrap();
/// assert_eq!(params.bits % 64, 0);
/// assert_eq!(params.hash_count, 10);
/// ```
pub fn optimal_params(
    expected_items: u64,
    false_positive_rate: f64,
) -> Result<FilterParams, BloomError> {
    if expected_items == 0 {
        return Err(BloomError::InvalidItemCount);
    }

    // Also rejects NaN.
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(BloomError::InvalidFalsePositiveRate {
            rate: false_positive_rate,
        });
    }

    let n = expected_items as f64;
    let m = (-n * false_positive_rate.ln() / (LN_2 * LN_2)).ceil();
    let k = (m / n * LN_2).ceil();

    let m = m as usize;

    Ok(FilterParams {
        bits: m - (m % 64),
        hash_count: k as usize,
    })
}

/// Estimate the false-positive probability of a filter of `bits` size using
/// `hash_count` hash functions after `items` insertions:
///
/// ```text
///     p = (1 - e^(-k * n / m))^k
/// ```
///
/// Returns `1.0` for an empty bit array.
pub fn false_positive_rate(bits: usize, items: u64, hash_count: usize) -> f64 {
    if bits == 0 {
        return 1.0;
    }

    let exponent = -(hash_count as f64) * (items as f64) / (bits as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_values() {
        let p = optimal_params(100_000, 0.001).unwrap();
        assert_eq!(
            p,
            FilterParams {
                bits: 1_437_696,
                hash_count: 10,
            }
        );

        let p = optimal_params(1000, 0.01).unwrap();
        assert_eq!(
            p,
            FilterParams {
                bits: 9536,
                hash_count: 7,
            }
        );
    }

    #[test]
    fn test_small_filter_aligns_below_minimum() {
        // m = 48 before alignment.
        let p = optimal_params(10, 0.1).unwrap();
        assert_eq!(p.bits, 0);
        assert_eq!(p.hash_count, 4);
    }

    #[test]
    fn test_zero_items() {
        assert_eq!(optimal_params(0, 0.01), Err(BloomError::InvalidItemCount));
    }

    #[test]
    fn test_invalid_rates() {
        for rate in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            match optimal_params(100, rate) {
                Err(BloomError::InvalidFalsePositiveRate { .. }) => {}
                v => panic!("rate {} should be rejected, got {:?}", rate, v),
            }
        }
    }

    #[test]
    fn test_false_positive_rate() {
        assert_eq!(false_positive_rate(0, 10, 3), 1.0);
        assert_eq!(false_positive_rate(1024, 0, 3), 0.0);

        // Sized for 1% at 1000 entries.
        let params = optimal_params(1000, 0.01).unwrap();
        let fpr = false_positive_rate(params.bits, 1000, params.hash_count);
        assert!(fpr > 0.005 && fpr < 0.02, "got {}", fpr);
    }

    proptest! {
        #[test]
        fn prop_bits_aligned(n in 1_u64..10_000_000, p in 0.0001_f64..0.5) {
            let params = optimal_params(n, p).unwrap();
            prop_assert_eq!(params.bits % 64, 0);
            prop_assert!(params.hash_count >= 1);
        }

        #[test]
        fn prop_more_items_need_more_bits(n in 1_000_u64..1_000_000, p in 0.0001_f64..0.5) {
            let a = optimal_params(n, p).unwrap();
            let b = optimal_params(n * 2, p).unwrap();
            prop_assert!(b.bits >= a.bits);
        }
    }
}
