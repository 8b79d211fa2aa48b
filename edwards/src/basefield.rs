//! Base field of the curve. q = 2^255 - 19
//!
//! Same Montgomery representation as the scalar field, with the extra
//! operations point decoding needs (square roots and sign bits).

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::arithmetic::{
    add_mod, is_zero, limbs_from_le_bytes, limbs_to_le_bytes, lt, montgomery_mul, neg_mod,
    sub_mod, Limbs,
};

/// Base field element, Montgomery form with [u64; 4].
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct BaseField {
    limbs: Limbs,
}

const MODULUS: Limbs = [
    0xffffffffffffffed,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

// R = 2^256 mod q = 38
const R: Limbs = [0x26, 0, 0, 0];

// R^2 = 2^512 mod q = 1444
const R2: Limbs = [0x5a4, 0, 0, 0];

// -q^{-1} mod 2^64
const MU: u64 = 0x86bca1af286bca1b;

const MODULUS_MINUS_TWO: Limbs = [
    0xffffffffffffffeb,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

// (q + 3) / 8
const SQRT_EXPONENT: Limbs = [
    0xfffffffffffffffe,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x0fffffffffffffff,
];

impl BaseField {
    pub const ZERO: Self = BaseField {
        limbs: [0, 0, 0, 0],
    };

    pub const ONE: Self = BaseField { limbs: R };

    /// sqrt(-1) = 2^((q-1)/4)
    pub(crate) const SQRT_M1: Self = BaseField {
        limbs: [
            0x3b5807d4fe2bdb04,
            0x03f590fdb51be9ed,
            0x6d6e16bf336202d1,
            0x75776b0bd6c71ba8,
        ],
    };

    /// Builds an element directly from Montgomery-form limbs.
    pub(crate) const fn from_montgomery(limbs: Limbs) -> Self {
        BaseField { limbs }
    }

    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        BaseField {
            limbs: montgomery_mul([val, 0, 0, 0], R2, MODULUS, MU),
        }
    }

    #[inline]
    pub fn to_canonical_u64_vec(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], MODULUS, MU)
    }

    /// Decodes 32 little-endian bytes, rejecting values `>= q`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let limbs = limbs_from_le_bytes(bytes);
        if !lt(limbs, MODULUS) {
            return None;
        }
        Some(BaseField {
            limbs: montgomery_mul(limbs, R2, MODULUS, MU),
        })
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.to_canonical_u64_vec())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        is_zero(self.limbs)
    }

    /// Parity of the canonical representative.
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.to_canonical_u64_vec()[0] & 1 == 1
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Multiplicative inverse, with zero mapped to zero.
    pub fn invert_or_zero(&self) -> Self {
        self.pow_vartime(MODULUS_MINUS_TWO)
    }

    /// Square root, if one exists.
    ///
    /// Uses q = 5 mod 8: the candidate `a^((q+3)/8)` is either a root or a
    /// root of `-a`, in which case multiplying by sqrt(-1) fixes it up.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = self.pow_vartime(SQRT_EXPONENT);
        if candidate.square() == *self {
            return Some(candidate);
        }
        let candidate = candidate * Self::SQRT_M1;
        if candidate.square() == *self {
            return Some(candidate);
        }
        None
    }

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

/// Inverts every element of `values` with a single field inversion.
///
/// Zero entries are left as zero.
pub(crate) fn batch_invert(values: &mut [BaseField]) {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = BaseField::ONE;
    for value in values.iter() {
        prefix.push(acc);
        if !value.is_zero() {
            acc *= *value;
        }
    }

    let mut inv = acc.invert_or_zero();
    for (value, before) in values.iter_mut().zip(prefix).rev() {
        if value.is_zero() {
            continue;
        }
        let next = inv * *value;
        *value = inv * before;
        inv = next;
    }
}

impl Add for BaseField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        BaseField {
            limbs: add_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl AddAssign for BaseField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BaseField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        BaseField {
            limbs: sub_mod(self.limbs, rhs.limbs, MODULUS),
        }
    }
}

impl SubAssign for BaseField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for BaseField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        BaseField {
            limbs: neg_mod(self.limbs, MODULUS),
        }
    }
}

impl Mul for BaseField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        BaseField {
            limbs: montgomery_mul(self.limbs, rhs.limbs, MODULUS, MU),
        }
    }
}

impl MulAssign for BaseField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_u64_vec();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BaseField({})", self)
    }
}

impl Hash for BaseField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}
