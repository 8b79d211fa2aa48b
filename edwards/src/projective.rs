use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

use crate::affine::Affine;
use crate::basefield::{batch_invert, BaseField};
use crate::errors::CurveError;
use crate::generator_table::mul_generator_projective;
use crate::msm::multiexp;
use crate::{Group, ScalarField};

/// Point in extended twisted Edwards coordinates (X:Y:Z:T) with
/// x = X/Z, y = Y/Z and x*y = T/Z.
/// The identity is (0:1:1:0).
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct Projective {
    x: BaseField,
    y: BaseField,
    z: BaseField,
    t: BaseField,
}

impl Projective {
    /// 2d, for the a = -1 extended addition law.
    const D2: BaseField = BaseField::from_montgomery([
        0x01db17fdbe8fd3f4,
        0x21430eef5f8c52e7,
        0xcb27240f78310d20,
        0x590456b4e53f8a4d,
    ]);

    pub const IDENTITY: Self = Projective {
        x: BaseField::ZERO,
        y: BaseField::ONE,
        z: BaseField::ONE,
        t: BaseField::ZERO,
    };

    pub const GENERATOR: Self = Projective {
        x: Affine::GENERATOR.x(),
        y: Affine::GENERATOR.y(),
        z: BaseField::ONE,
        t: BaseField::from_montgomery([
            0x4f0896aa994ae86c,
            0xe3b7ad11b612506e,
            0x46c7a922f183c492,
            0x5e181c59feb3930d,
        ]),
    };

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    pub fn generator() -> Self {
        Self::GENERATOR
    }

    pub fn from_affine(point: &Affine) -> Self {
        Projective {
            x: point.x(),
            y: point.y(),
            z: BaseField::ONE,
            t: point.x() * point.y(),
        }
    }

    pub fn to_affine(&self) -> Affine {
        // Z never vanishes under the complete addition law.
        let z_inv = self.z.invert_or_zero();
        Affine::new_unchecked(self.x * z_inv, self.y * z_inv)
    }

    /// Converts many points to affine form with a single field inversion.
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine> {
        let mut z_inv: Vec<BaseField> = points.iter().map(|p| p.z).collect();
        batch_invert(&mut z_inv);
        points
            .iter()
            .zip(z_inv)
            .map(|(p, zi)| Affine::new_unchecked(p.x * zi, p.y * zi))
            .collect()
    }

    /// Extended-coordinates addition (add-2008-hwcd-3), complete for a = -1.
    fn add_extended(&self, other: &Self) -> Self {
        let a = (self.y - self.x) * (other.y - other.x);
        let b = (self.y + self.x) * (other.y + other.x);
        let c = self.t * Self::D2 * other.t;
        let d = (self.z + self.z) * other.z;
        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;
        Projective {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    /// Doubling fast path (dbl-2008-hwcd) with a = -1.
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let zz = self.z.square();
        let c = zz + zz;
        let d = -a;
        let e = (self.x + self.y).square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;
        Projective {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    pub fn negate(&self) -> Self {
        Projective {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Multiplies by the cofactor 8.
    pub fn mul_by_cofactor(&self) -> Self {
        self.double().double().double()
    }

    /// Whether `l * P` is the identity, i.e. `P` has no small-order component.
    ///
    /// Decoding accepts any curve point, so values taken from untrusted
    /// encodings are checked with this before they enter an equation.
    pub fn is_torsion_free(&self) -> bool {
        // (l - 1) * P + P
        (*self * -ScalarField::ONE + *self).is_identity()
    }

    /// Multiply the fixed generator using a precomputed table.
    pub fn mul_generator(scalar: &ScalarField) -> Self {
        mul_generator_projective(scalar)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.to_affine().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        Affine::from_bytes(bytes).map(Self::from)
    }
}

impl Default for Projective {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl Eq for Projective {}

impl TryFrom<[u8; 32]> for Projective {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<Projective> for [u8; 32] {
    fn from(point: Projective) -> Self {
        point.to_bytes()
    }
}

impl Group for Projective {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        Projective::is_identity(self)
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Projective::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Projective::negate(self)
    }

    fn multi_scalar_mul(points: &[Self], scalars: &[ScalarField]) -> Result<Self, CurveError> {
        multiexp(scalars, points)
    }
}

impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_extended(&other)
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Sum for Projective {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, p| acc + p)
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Projective> for ScalarField {
    type Output = Projective;

    fn mul(self, point: Projective) -> Projective {
        <Projective as Group>::scalar_mul(&point, &self)
    }
}

impl Mul<&Projective> for ScalarField {
    type Output = Projective;

    fn mul(self, point: &Projective) -> Projective {
        <Projective as Group>::scalar_mul(point, &self)
    }
}

// Conversions
impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Affine {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}

impl From<&Projective> for Affine {
    fn from(point: &Projective) -> Self {
        point.to_affine()
    }
}
