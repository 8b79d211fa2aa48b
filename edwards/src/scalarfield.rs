//! Scalar field of the curve. l = 2^252 + 27742317777372353535851937790883648493
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{
    add_mod, biguint_to_limbs, is_zero, limbs_from_le_bytes, limbs_to_biguint, limbs_to_le_bytes,
    lt, montgomery_mul, neg_mod, sub_mod, Limbs,
};
use crate::errors::CurveError;
use crate::group::ScalarBits;

/// Scalar field element for the curve.
/// Represented in Montgomery form with [u64; 4].
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct ScalarField {
    /// Montgomery form: value * R mod l, where R = 2^256
    limbs: Limbs,
}

// Group order: l = 0x1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed
const MODULUS: Limbs = [
    0x5812631a5cf5d3ed,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
];

// R = 2^256 mod l
const R: Limbs = [
    0xd6ec31748d98951d,
    0xc6ef5bf4737dcf70,
    0xfffffffffffffffe,
    0x0fffffffffffffff,
];

// R^2 = 2^512 mod l
const R2: Limbs = [
    0xa40611e3449c0f01,
    0xd00e1ba768859347,
    0xceec73d217f5be65,
    0x0399411b7c309a3d,
];

// -l^{-1} mod 2^64
const MU: u64 = 0xd2b51da312547e1b;

// l - 2, the Fermat inversion exponent
const MODULUS_MINUS_TWO: Limbs = [
    0x5812631a5cf5d3eb,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
];

impl ScalarField {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = ScalarField {
        limbs: [0, 0, 0, 0],
    };

    /// One element (in Montgomery form: R mod l)
    pub const ONE: Self = ScalarField { limbs: R };

    /// Create a new scalar field element from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    /// Convert from Montgomery form to canonical form
    #[inline]
    pub fn to_canonical_u64_vec(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], MODULUS, MU)
    }

    /// Reduces any 256-bit little-endian limb value modulo l.
    #[inline]
    fn from_canonical_limbs(limbs: Limbs) -> Self {
        ScalarField {
            limbs: montgomery_mul(limbs, R2, MODULUS, MU),
        }
    }

    /// Decodes a canonical 32-byte little-endian encoding.
    ///
    /// Values at or above the group order are rejected with
    /// [`CurveError::Decode`].
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let limbs = limbs_from_le_bytes(bytes);
        if !lt(limbs, MODULUS) {
            return Err(CurveError::Decode);
        }
        Ok(Self::from_canonical_limbs(limbs))
    }

    /// Decodes from a slice that must hold exactly 32 canonical bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CurveError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| CurveError::Decode)?;
        Self::from_bytes(&array)
    }

    /// Interprets 32 little-endian bytes as an integer and reduces it mod l.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Self {
        Self::from_canonical_limbs(limbs_from_le_bytes(bytes))
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.to_canonical_u64_vec())
    }

    /// The group order l.
    pub fn order() -> BigUint {
        limbs_to_biguint(&MODULUS)
    }

    /// Reduces an arbitrary-size integer mod l.
    pub fn from_biguint(value: &BigUint) -> Self {
        Self::from_canonical_limbs(biguint_to_limbs(value, &MODULUS))
    }

    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(&self.to_canonical_u64_vec())
    }

    /// Check if this field element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        is_zero(self.limbs)
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Raises `self` to a non-negative integer power.
    pub fn pow(&self, exp: u64) -> Self {
        self.pow_vartime([exp, 0, 0, 0])
    }

    /// Multiplicative inverse.
    ///
    /// Fails with [`CurveError::DivisionByZero`] on zero.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.pow_vartime(MODULUS_MINUS_TWO))
    }

    /// Multiplicative inverse that maps zero to zero.
    pub fn invert_or_zero(&self) -> Self {
        self.pow_vartime(MODULUS_MINUS_TWO)
    }

    /// Variable-time square-and-multiply, least significant bit first.
    fn pow_vartime(&self, exp: Limbs) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp.iter() {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base * base;
                remaining >>= 1;
            }
        }

        result
    }
}

impl From<u64> for ScalarField {
    fn from(value: u64) -> Self {
        Self::from_canonical_u64(value)
    }
}

impl TryFrom<[u8; 32]> for ScalarField {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<ScalarField> for [u8; 32] {
    fn from(scalar: ScalarField) -> Self {
        scalar.to_bytes()
    }
}

impl ScalarBits for ScalarField {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_u64_vec()
    }
}

impl Distribution<ScalarField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        loop {
            let mut bytes: [u8; 32] = rng.random();
            // l < 2^253
            bytes[31] &= 0x1f;

            if let Ok(scalar) = ScalarField::from_bytes(&bytes) {
                return scalar;
            }
        }
    }
}

// Arithmetic operations
impl Add for ScalarField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ScalarField {
            limbs: add_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl AddAssign for ScalarField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ScalarField {
            limbs: sub_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl SubAssign for ScalarField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ScalarField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ScalarField {
            limbs: neg_mod(self.limbs, MODULUS),
        }
    }
}

impl Mul for ScalarField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        ScalarField {
            limbs: montgomery_mul(self.limbs, rhs.limbs, MODULUS, MU),
        }
    }
}

impl MulAssign for ScalarField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for ScalarField {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a ScalarField> for ScalarField {
    fn sum<I: Iterator<Item = &'a ScalarField>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl Product for ScalarField {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a ScalarField> for ScalarField {
    fn product<I: Iterator<Item = &'a ScalarField>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * *x)
    }
}

// Ordering follows the canonical representative, not the Montgomery limbs.
impl Ord for ScalarField {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.to_canonical_u64_vec();
        let b = other.to_canonical_u64_vec();
        a.iter().rev().cmp(b.iter().rev())
    }
}

impl PartialOrd for ScalarField {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Display and Debug
impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_u64_vec();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self)
    }
}

impl Hash for ScalarField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}
