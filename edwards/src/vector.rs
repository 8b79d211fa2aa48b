//! Fixed-length scalar and point vectors.
//!
//! Binary operations require equal lengths and fail with
//! [`CurveError::SizeMismatch`] otherwise; nothing is truncated or padded.

use core::ops::{Index, Mul, Neg, Range};

use crate::errors::CurveError;
use crate::hash::HashInput;
use crate::msm::multiexp;
use crate::{Projective, ScalarField};

fn check_len(expected: usize, actual: usize) -> Result<(), CurveError> {
    if expected != actual {
        return Err(CurveError::SizeMismatch { expected, actual });
    }
    Ok(())
}

fn check_range(range: &Range<usize>, len: usize) -> Result<(), CurveError> {
    if range.start > range.end || range.end > len {
        return Err(CurveError::SizeMismatch {
            expected: range.end,
            actual: len,
        });
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScalarVector(Vec<ScalarField>);

impl ScalarVector {
    pub fn new(values: Vec<ScalarField>) -> Self {
        Self(values)
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![ScalarField::ZERO; len])
    }

    /// `[1, x, x^2, ..., x^(len-1)]`
    pub fn powers(x: ScalarField, len: usize) -> Self {
        let mut values = Vec::with_capacity(len);
        let mut acc = ScalarField::ONE;
        for _ in 0..len {
            values.push(acc);
            acc *= x;
        }
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ScalarField] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ScalarField> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ScalarField> {
        self.0
    }

    pub fn push(&mut self, value: ScalarField) {
        self.0.push(value);
    }

    pub fn extend(&mut self, other: &ScalarVector) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn concat(&self, other: &ScalarVector) -> Self {
        let mut out = self.clone();
        out.extend(other);
        out
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Self, CurveError> {
        check_range(&range, self.len())?;
        Ok(Self(self.0[range].to_vec()))
    }

    pub fn elementwise_add(&self, other: &ScalarVector) -> Result<Self, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a + *b).collect())
    }

    pub fn elementwise_sub(&self, other: &ScalarVector) -> Result<Self, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a - *b).collect())
    }

    pub fn hadamard(&self, other: &ScalarVector) -> Result<Self, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a * *b).collect())
    }

    pub fn inner_product(&self, other: &ScalarVector) -> Result<ScalarField, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a * *b).sum())
    }

    pub fn scale(&self, factor: ScalarField) -> Self {
        self.0.iter().map(|a| *a * factor).collect()
    }

    pub fn sum(&self) -> ScalarField {
        self.0.iter().sum()
    }

    /// Batch inversion: one field inversion plus O(len) multiplications.
    ///
    /// Fails with [`CurveError::DivisionByZero`], leaving nothing inverted,
    /// if any element is zero.
    pub fn invert(&self) -> Result<Self, CurveError> {
        if self.0.iter().any(ScalarField::is_zero) {
            return Err(CurveError::DivisionByZero);
        }
        Ok(self.invert_or_zero())
    }

    /// Batch inversion that maps zero elements to zero.
    pub fn invert_or_zero(&self) -> Self {
        let mut prefix = Vec::with_capacity(self.len());
        let mut acc = ScalarField::ONE;
        for value in &self.0 {
            prefix.push(acc);
            if !value.is_zero() {
                acc *= *value;
            }
        }

        let mut out = vec![ScalarField::ZERO; self.len()];
        let mut inv = acc.invert_or_zero();
        for i in (0..self.len()).rev() {
            let value = self.0[i];
            if value.is_zero() {
                continue;
            }
            out[i] = inv * prefix[i];
            inv *= value;
        }
        Self(out)
    }

    /// `sum(self[i] * points[i])`.
    pub fn multiexp(&self, points: &PointVector) -> Result<Projective, CurveError> {
        multiexp(&self.0, &points.0)
    }
}

impl Index<usize> for ScalarVector {
    type Output = ScalarField;

    fn index(&self, index: usize) -> &ScalarField {
        &self.0[index]
    }
}

impl FromIterator<ScalarField> for ScalarVector {
    fn from_iter<I: IntoIterator<Item = ScalarField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ScalarVector {
    type Item = ScalarField;
    type IntoIter = std::vec::IntoIter<ScalarField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<ScalarField>> for ScalarVector {
    fn from(values: Vec<ScalarField>) -> Self {
        Self(values)
    }
}

impl Neg for ScalarVector {
    type Output = Self;

    fn neg(self) -> Self {
        self.0.into_iter().map(|a| -a).collect()
    }
}

impl Mul<ScalarField> for &ScalarVector {
    type Output = ScalarVector;

    fn mul(self, factor: ScalarField) -> ScalarVector {
        self.scale(factor)
    }
}

impl HashInput for ScalarVector {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.0.write_hash_input(out)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointVector(Vec<Projective>);

impl PointVector {
    pub fn new(points: Vec<Projective>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Projective] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Projective> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Projective> {
        self.0
    }

    pub fn push(&mut self, point: Projective) {
        self.0.push(point);
    }

    pub fn extend(&mut self, other: &PointVector) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn concat(&self, other: &PointVector) -> Self {
        let mut out = self.clone();
        out.extend(other);
        out
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Self, CurveError> {
        check_range(&range, self.len())?;
        Ok(Self(self.0[range].to_vec()))
    }

    pub fn elementwise_add(&self, other: &PointVector) -> Result<Self, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a + *b).collect())
    }

    pub fn elementwise_sub(&self, other: &PointVector) -> Result<Self, CurveError> {
        check_len(self.len(), other.len())?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| *a - *b).collect())
    }

    /// `[scalars[i] * self[i]]`
    pub fn hadamard(&self, scalars: &ScalarVector) -> Result<Self, CurveError> {
        check_len(self.len(), scalars.len())?;
        Ok(self.0.iter().zip(&scalars.0).map(|(p, s)| *p * s).collect())
    }

    pub fn scale(&self, factor: ScalarField) -> Self {
        self.0.iter().map(|p| *p * factor).collect()
    }

    /// `sum(scalars[i] * self[i])`.
    pub fn multiexp(&self, scalars: &ScalarVector) -> Result<Projective, CurveError> {
        multiexp(&scalars.0, &self.0)
    }
}

impl Index<usize> for PointVector {
    type Output = Projective;

    fn index(&self, index: usize) -> &Projective {
        &self.0[index]
    }
}

impl FromIterator<Projective> for PointVector {
    fn from_iter<I: IntoIterator<Item = Projective>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PointVector {
    type Item = Projective;
    type IntoIter = std::vec::IntoIter<Projective>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Projective>> for PointVector {
    fn from(points: Vec<Projective>) -> Self {
        Self(points)
    }
}

impl Neg for PointVector {
    type Output = Self;

    fn neg(self) -> Self {
        self.0.into_iter().map(|p| -p).collect()
    }
}

impl HashInput for PointVector {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.0.write_hash_input(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scalars(values: &[u64]) -> ScalarVector {
        values.iter().map(|v| ScalarField::from_canonical_u64(*v)).collect()
    }

    #[test]
    fn test_elementwise_ops() {
        let a = scalars(&[1, 2, 3]);
        let b = scalars(&[4, 5, 6]);
        assert_eq!(a.elementwise_add(&b), Ok(scalars(&[5, 7, 9])));
        assert_eq!(b.elementwise_sub(&a), Ok(scalars(&[3, 3, 3])));
        assert_eq!(a.hadamard(&b), Ok(scalars(&[4, 10, 18])));
        assert_eq!(a.inner_product(&b), Ok(ScalarField::from_canonical_u64(32)));
        assert_eq!(&a * ScalarField::from_canonical_u64(2), scalars(&[2, 4, 6]));
        assert_eq!(a.sum(), ScalarField::from_canonical_u64(6));
        assert_eq!((-a.clone()).elementwise_add(&a), Ok(ScalarVector::zeros(3)));
    }

    #[test]
    fn test_length_mismatch() {
        let a = scalars(&[1, 2, 3]);
        let b = scalars(&[1, 2]);
        let err = CurveError::SizeMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(a.elementwise_add(&b), Err(err));
        assert_eq!(a.hadamard(&b), Err(err));
        assert_eq!(a.inner_product(&b), Err(err));
        let points = PointVector::new(vec![Projective::generator(); 2]);
        assert!(a.multiexp(&points).is_err());
    }

    #[test]
    fn test_slice_and_concat() {
        let a = scalars(&[1, 2, 3, 4]);
        assert_eq!(a.slice(1..3), Ok(scalars(&[2, 3])));
        assert_eq!(a.slice(0..0), Ok(ScalarVector::default()));
        assert!(a.slice(2..5).is_err());
        let joined = scalars(&[1, 2]).concat(&scalars(&[3, 4]));
        assert_eq!(joined, a);
    }

    #[test]
    fn test_powers() {
        let x = ScalarField::from_canonical_u64(3);
        assert_eq!(ScalarVector::powers(x, 4), scalars(&[1, 3, 9, 27]));
        assert!(ScalarVector::powers(x, 0).is_empty());
    }

    #[test]
    fn test_batch_invert() {
        let mut rng = StdRng::seed_from_u64(5);
        let values: ScalarVector = (0..7).map(|_| ScalarField::random(&mut rng)).collect();
        let inverted = values.invert().expect("nonzero");
        for i in 0..values.len() {
            assert_eq!(values[i] * inverted[i], ScalarField::ONE);
        }
    }

    #[test]
    fn test_batch_invert_with_zero() {
        let values = scalars(&[2, 0, 5]);
        assert_eq!(values.invert(), Err(CurveError::DivisionByZero));

        let inverted = values.invert_or_zero();
        assert_eq!(inverted[1], ScalarField::ZERO);
        assert_eq!(inverted[0] * values[0], ScalarField::ONE);
        assert_eq!(inverted[2] * values[2], ScalarField::ONE);
    }

    #[test]
    fn test_point_vector_ops() {
        let g = Projective::generator();
        let points = PointVector::new(vec![g, g.double(), g.mul_u64(3)]);
        let weights = scalars(&[1, 1, 2]);

        assert_eq!(points.multiexp(&weights), Ok(g.mul_u64(9)));
        assert_eq!(weights.multiexp(&points), Ok(g.mul_u64(9)));

        let scaled = points.hadamard(&weights).expect("lengths");
        assert_eq!(scaled[2], g.mul_u64(6));
        assert_eq!(points.scale(ScalarField::from_canonical_u64(2))[0], g.double());

        let diff = points.elementwise_sub(&points).expect("lengths");
        assert!(diff.iter().all(|p| p.is_identity()));
        assert_eq!(points.slice(1..2).map(|v| v[0]), Ok(g.double()));
    }
}
