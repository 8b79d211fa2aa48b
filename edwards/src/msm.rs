//! Pippenger multiexponentiation.

use rayon::prelude::*;
use tracing::trace;

use crate::arithmetic::bit_length;
use crate::errors::CurveError;
use crate::group::ScalarBits;
use crate::{Projective, ScalarField};

/// Widest supported bucket window.
pub const MAX_WINDOW: usize = 16;

/// Inputs at least this long have their windows summed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Window width heuristic, roughly `0.69 * log2(len) + 2`.
fn window_width(len: usize) -> usize {
    if len < 32 {
        return 3;
    }
    let log2 = (usize::BITS - len.leading_zeros()) as usize;
    (log2 * 69 / 100 + 2).min(MAX_WINDOW)
}

/// The `width`-bit digit of `limbs` starting at bit `offset`.
#[inline]
fn window_digit(limbs: &[u64; 4], offset: usize, width: usize) -> usize {
    let limb = offset / 64;
    if limb >= 4 {
        return 0;
    }
    let shift = offset % 64;
    let mut bits = limbs[limb] >> shift;
    if shift + width > 64 && limb + 1 < 4 {
        bits |= limbs[limb + 1] << (64 - shift);
    }
    (bits & ((1u64 << width) - 1)) as usize
}

/// Bucket accumulation for one window: `sum_k k * (sum of points whose digit is k)`.
fn window_sum(limbs: &[[u64; 4]], points: &[Projective], offset: usize, width: usize) -> Projective {
    let mut buckets = vec![Projective::IDENTITY; (1 << width) - 1];
    for (scalar, point) in limbs.iter().zip(points) {
        let digit = window_digit(scalar, offset, width);
        if digit != 0 {
            buckets[digit - 1] += *point;
        }
    }

    let mut running = Projective::IDENTITY;
    let mut sum = Projective::IDENTITY;
    for bucket in buckets.into_iter().rev() {
        running += bucket;
        sum += running;
    }
    sum
}

/// Computes `sum(scalars[i] * points[i])`.
///
/// Returns the identity for empty input and [`CurveError::SizeMismatch`] if
/// the slices differ in length.
pub fn multiexp(scalars: &[ScalarField], points: &[Projective]) -> Result<Projective, CurveError> {
    multiexp_with_window(scalars, points, window_width(scalars.len()))
}

/// [`multiexp`] with an explicit bucket window width in `1..=16`.
pub fn multiexp_with_window(
    scalars: &[ScalarField],
    points: &[Projective],
    width: usize,
) -> Result<Projective, CurveError> {
    if scalars.len() != points.len() {
        return Err(CurveError::SizeMismatch {
            expected: scalars.len(),
            actual: points.len(),
        });
    }
    if width == 0 || width > MAX_WINDOW {
        return Err(CurveError::InvalidWindow(width));
    }

    let limbs: Vec<[u64; 4]> = scalars.iter().map(|s| s.to_u64_limbs()).collect();
    let max_bits = limbs.iter().map(bit_length).max().unwrap_or(0);
    if max_bits == 0 {
        return Ok(Projective::IDENTITY);
    }

    let groups = max_bits.div_ceil(width);
    trace!(len = scalars.len(), width, groups, "multiexp");

    let sums: Vec<Projective> = if scalars.len() >= PARALLEL_THRESHOLD {
        (0..groups)
            .into_par_iter()
            .map(|g| window_sum(&limbs, points, g * width, width))
            .collect()
    } else {
        (0..groups)
            .map(|g| window_sum(&limbs, points, g * width, width))
            .collect()
    };

    let mut result = Projective::IDENTITY;
    for sum in sums.into_iter().rev() {
        for _ in 0..width {
            result = result.double();
        }
        result += sum;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_inputs(len: usize, seed: u64) -> (Vec<ScalarField>, Vec<Projective>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let scalars = (0..len).map(|_| ScalarField::random(&mut rng)).collect();
        let points = (0..len)
            .map(|_| Projective::mul_generator(&ScalarField::random(&mut rng)))
            .collect();
        (scalars, points)
    }

    fn naive(scalars: &[ScalarField], points: &[Projective]) -> Projective {
        scalars.iter().zip(points).map(|(s, p)| *p * s).sum()
    }

    #[test]
    fn test_matches_naive() {
        for (len, seed) in [(1, 1), (2, 2), (5, 5), (8, 8), (33, 33)] {
            let (scalars, points) = random_inputs(len, seed);
            assert_eq!(multiexp(&scalars, &points), Ok(naive(&scalars, &points)), "len {len}");
        }
    }

    #[test]
    fn test_parallel_path_matches_naive() {
        let (scalars, points) = random_inputs(PARALLEL_THRESHOLD + 3, 64);
        assert_eq!(multiexp(&scalars, &points), Ok(naive(&scalars, &points)));
    }

    #[test]
    fn test_every_window_width() {
        let (scalars, points) = random_inputs(6, 17);
        let expected = naive(&scalars, &points);
        for width in 1..=MAX_WINDOW {
            assert_eq!(multiexp_with_window(&scalars, &points, width), Ok(expected), "width {width}");
        }
    }

    #[test]
    fn test_empty_is_identity() {
        assert_eq!(multiexp(&[], &[]), Ok(Projective::IDENTITY));
        let zeros = [ScalarField::ZERO; 3];
        let (_, points) = random_inputs(3, 4);
        assert_eq!(multiexp(&zeros, &points), Ok(Projective::IDENTITY));
    }

    #[test]
    fn test_small_scalars() {
        let g = Projective::generator();
        let scalars = [ScalarField::from_canonical_u64(3), ScalarField::ONE];
        assert_eq!(multiexp(&scalars, &[g, g]), Ok(g.mul_u64(4)));
    }

    #[test]
    fn test_errors() {
        let (scalars, points) = random_inputs(3, 3);
        assert_eq!(
            multiexp(&scalars, &points[..2]),
            Err(CurveError::SizeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            multiexp_with_window(&scalars, &points, 0),
            Err(CurveError::InvalidWindow(0))
        );
        assert_eq!(
            multiexp_with_window(&scalars, &points, 17),
            Err(CurveError::InvalidWindow(17))
        );
    }

    #[test]
    fn test_window_digit_straddles_limbs() {
        let limbs = [0xF000_0000_0000_0000, 0x5, 0, 0];
        assert_eq!(window_digit(&limbs, 60, 8), 0x5F);
        assert_eq!(window_digit(&limbs, 256, 4), 0);
    }

    #[test]
    fn test_group_trait_delegates() {
        let (scalars, points) = random_inputs(4, 12);
        assert_eq!(
            Projective::multi_scalar_mul(&points, &scalars),
            Ok(naive(&scalars, &points))
        );
    }
}
