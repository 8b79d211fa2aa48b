use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::ScalarField;

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Samples until a nonzero element comes up.
    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }

    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let scalar = Self::random(rng);
            if !scalar.is_zero() {
                return scalar;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let a = ScalarField::random(&mut StdRng::seed_from_u64(1));
        let b = ScalarField::random(&mut StdRng::seed_from_u64(1));
        let c = ScalarField::random(&mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_samples_are_canonical() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..64 {
            let s = ScalarField::random_nonzero(&mut rng);
            assert!(!s.is_zero());
            assert!(s.to_biguint() < ScalarField::order());
        }
    }
}
