use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::errors::CurveError;

/// Access to a scalar's canonical bits.
pub trait ScalarBits {
    /// Canonical (non-Montgomery) little-endian limbs.
    fn to_u64_limbs(&self) -> [u64; 4];

    /// 4-bit digits, most significant first.
    fn nibbles_msb_first(&self) -> impl Iterator<Item = usize> {
        let limbs = self.to_u64_limbs();
        (0..64)
            .rev()
            .map(move |i| ((limbs[i / 16] >> ((i % 16) * 4)) & 0xF) as usize)
    }
}

/// Ladder over little-endian limbs, high bit first.
fn double_and_add<G: Group>(point: &G, limbs: &[u64]) -> G {
    let mut acc = G::identity();
    for bit in (0..limbs.len() * 64).rev() {
        acc = acc.double();
        if (limbs[bit / 64] >> (bit % 64)) & 1 == 1 {
            acc += *point;
        }
    }
    acc
}

/// Prime-order group operations shared by the affine and extended point types.
pub trait Group:
    Sized + Copy + Add<Output = Self> + AddAssign + Sub<Output = Self> + SubAssign + Neg<Output = Self>
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    #[inline]
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        double_and_add(self, &scalar.to_u64_limbs())
    }

    /// Fixed 4-bit window: 15 precomputed multiples, four doublings per digit.
    fn scalar_mul_windowed(&self, scalar: &Self::Scalar) -> Self {
        if self.is_identity() {
            return Self::identity();
        }

        let mut multiples = [Self::identity(); 16];
        for i in 1..16 {
            multiples[i] = multiples[i - 1] + *self;
        }

        scalar.nibbles_msb_first().fold(Self::identity(), |acc, digit| {
            let acc = acc.double().double().double().double();
            if digit == 0 { acc } else { acc + multiples[digit] }
        })
    }

    fn mul_u64(&self, n: u64) -> Self {
        double_and_add(self, &[n])
    }

    /// `sum(scalars[i] * points[i])`, one scalar multiplication per term.
    fn multi_scalar_mul(points: &[Self], scalars: &[Self::Scalar]) -> Result<Self, CurveError> {
        if points.len() != scalars.len() {
            return Err(CurveError::SizeMismatch {
                expected: scalars.len(),
                actual: points.len(),
            });
        }

        Ok(points
            .iter()
            .zip(scalars)
            .fold(Self::identity(), |acc, (point, scalar)| {
                acc + point.scalar_mul(scalar)
            }))
    }
}
