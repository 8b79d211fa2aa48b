use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

use crate::basefield::BaseField;
use crate::errors::CurveError;
use crate::{Group, ScalarField};

/// Affine point on the twisted Edwards curve `-x^2 + y^2 = 1 + d*x^2*y^2`.
/// The identity is `(0, 1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct Affine {
    x: BaseField,
    y: BaseField,
}

impl Affine {
    /// d = -121665/121666
    pub(crate) const D: BaseField = BaseField::from_montgomery([
        0x80ed8bfedf47e9fa,
        0x10a18777afc62973,
        0xe5939207bc188690,
        0x2c822b5a729fc526,
    ]);

    pub const IDENTITY: Self = Affine {
        x: BaseField::ZERO,
        y: BaseField::ONE,
    };

    /// Standard basepoint, y = 4/5 with even x.
    pub const GENERATOR: Self = Affine {
        x: BaseField::from_montgomery([
            0xe2cabc553f9da287,
            0x9ca598562396e489,
            0x9879936bade4b5b7,
            0x759e23707e6077d0,
        ]),
        y: BaseField::from_montgomery([
            0x333333333333334a,
            0x3333333333333333,
            0x3333333333333333,
            0x3333333333333333,
        ]),
    };

    /// Create a point from coordinates, checking the curve equation.
    pub fn new(x: BaseField, y: BaseField) -> Result<Self, CurveError> {
        let point = Affine { x, y };
        if !point.is_on_curve() {
            return Err(CurveError::InvalidPoint);
        }
        Ok(point)
    }

    pub(crate) const fn new_unchecked(x: BaseField, y: BaseField) -> Self {
        Affine { x, y }
    }

    #[inline]
    pub const fn x(&self) -> BaseField {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> BaseField {
        self.y
    }

    pub fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == BaseField::ONE
    }

    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        y2 - x2 == BaseField::ONE + Self::D * x2 * y2
    }

    /// Unified addition law; valid for equal and distinct operands alike.
    fn add_unified(&self, other: &Self) -> Self {
        let x1y2 = self.x * other.y;
        let x2y1 = other.x * self.y;
        let y1y2 = self.y * other.y;
        let x1x2 = self.x * other.x;
        let dxy = Self::D * x1x2 * y1y2;

        // Both denominators are nonzero on the curve since d is a non-square.
        let x = (x1y2 + x2y1) * (BaseField::ONE + dxy).invert_or_zero();
        let y = (y1y2 + x1x2) * (BaseField::ONE - dxy).invert_or_zero();
        Affine { x, y }
    }

    pub fn double(&self) -> Self {
        self.add_unified(self)
    }

    pub fn negate(&self) -> Self {
        Affine {
            x: -self.x,
            y: self.y,
        }
    }

    /// 32-byte encoding: little-endian y with the parity of x in the top bit.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = self.y.to_bytes();
        if self.x.is_odd() {
            bytes[31] |= 0x80;
        }
        bytes
    }

    /// Decodes and validates a 32-byte point encoding.
    ///
    /// Subgroup membership is not checked.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let x_odd = bytes[31] >> 7 == 1;
        let mut y_bytes = *bytes;
        y_bytes[31] &= 0x7f;

        let y = BaseField::from_bytes(&y_bytes).ok_or(CurveError::InvalidPoint)?;
        let y2 = y.square();
        let x2 = (y2 - BaseField::ONE) * (Self::D * y2 + BaseField::ONE).invert_or_zero();
        let mut x = x2.sqrt().ok_or(CurveError::InvalidPoint)?;

        if x.is_zero() && x_odd {
            return Err(CurveError::InvalidPoint);
        }
        if x.is_odd() != x_odd {
            x = -x;
        }

        Ok(Affine { x, y })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CurveError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| CurveError::InvalidPoint)?;
        Self::from_bytes(&array)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[u8; 32]> for Affine {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<Affine> for [u8; 32] {
    fn from(point: Affine) -> Self {
        point.to_bytes()
    }
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        Affine::is_identity(self)
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Affine::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Affine::negate(self)
    }
}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_unified(&other)
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASEPOINT_BYTES: [u8; 32] = [
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ];

    #[test]
    fn test_generator_on_curve() {
        assert!(Affine::GENERATOR.is_on_curve());
        assert!(Affine::IDENTITY.is_on_curve());
        assert_eq!(
            Affine::GENERATOR.y() * BaseField::from_canonical_u64(5),
            BaseField::from_canonical_u64(4)
        );
    }

    #[test]
    fn test_generator_encoding() {
        assert_eq!(Affine::GENERATOR.to_bytes(), BASEPOINT_BYTES);
        assert_eq!(Affine::from_bytes(&BASEPOINT_BYTES), Ok(Affine::GENERATOR));
    }

    #[test]
    fn test_identity_laws() {
        let g = Affine::generator();
        assert_eq!(g + Affine::IDENTITY, g);
        assert_eq!(g + g.negate(), Affine::IDENTITY);
        assert_eq!(g - g, Affine::IDENTITY);
    }

    #[test]
    fn test_double_matches_add() {
        let g = Affine::generator();
        assert_eq!(g.double(), g + g);
        assert_eq!(g.double() + g, g.mul_u64(3));
    }

    #[test]
    fn test_order_annihilates() {
        // l * G = identity, computed as (l - 1) * G + G
        let minus_one = -ScalarField::ONE;
        let g = Affine::generator();
        assert_eq!(g * minus_one + g, Affine::IDENTITY);
    }

    #[test]
    fn test_scalar_mul_variants_agree() {
        let g = Affine::generator();
        let s = ScalarField::from_canonical_u64(0x1234_5678_9abc);
        assert_eq!(g.scalar_mul(&s), g.scalar_mul_windowed(&s));
        assert_eq!(g.scalar_mul(&s), g.mul_u64(0x1234_5678_9abc));
    }

    #[test]
    fn test_new_rejects_off_curve() {
        let one = BaseField::ONE;
        assert_eq!(Affine::new(one, one), Err(CurveError::InvalidPoint));
        assert_eq!(Affine::new(BaseField::ZERO, one), Ok(Affine::IDENTITY));
    }

    #[test]
    fn test_decode_rejects_bad_encodings() {
        // y = q is out of range
        let mut out_of_range = [0xff; 32];
        out_of_range[0] = 0xed;
        out_of_range[31] = 0x7f;
        assert_eq!(Affine::from_bytes(&out_of_range), Err(CurveError::InvalidPoint));

        // y = 2 has no matching x
        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert_eq!(Affine::from_bytes(&off_curve), Err(CurveError::InvalidPoint));

        // identity with the sign bit set
        let mut negative_zero = [0u8; 32];
        negative_zero[0] = 1;
        negative_zero[31] = 0x80;
        assert_eq!(Affine::from_bytes(&negative_zero), Err(CurveError::InvalidPoint));

        assert_eq!(Affine::from_slice(&[0u8; 33]), Err(CurveError::InvalidPoint));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut p = Affine::generator();
        for _ in 0..8 {
            assert_eq!(Affine::from_bytes(&p.to_bytes()), Ok(p));
            assert_eq!(Affine::from_bytes(&p.negate().to_bytes()), Ok(p.negate()));
            p = p.double() + Affine::generator();
        }
    }
}
