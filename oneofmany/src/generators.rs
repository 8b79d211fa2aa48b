//! Public generators and Pedersen commitments.

use edwards::{generator, Projective, ScalarField};

use crate::constants::{H_LABEL, MATRIX_LABEL, U_LABEL};
use crate::parameters::Parameters;

/// Pedersen value base `H`.
pub fn value_generator() -> Projective {
    generator(H_LABEL, &[])
}

/// Linking base `U`; a linking tag is `J = r^-1 * U`.
pub fn linking_generator() -> Projective {
    generator(U_LABEL, &[])
}

/// Matrix commitment bases, `m` rows of `n`.
pub(crate) fn matrix_generators(params: &Parameters) -> Vec<Vec<Projective>> {
    (0..params.m())
        .map(|j| {
            (0..params.n())
                .map(|i| generator(MATRIX_LABEL, &[j as u64, i as u64]))
                .collect()
        })
        .collect()
}

/// Tensor commitment bases for spend proofs, `spends` blocks of `m` rows
/// of `n`.
pub(crate) fn tensor_generators(params: &Parameters, spends: usize) -> Vec<Vec<Vec<Projective>>> {
    (0..spends)
        .map(|u| {
            (0..params.m())
                .map(|j| {
                    (0..params.n())
                        .map(|i| generator(MATRIX_LABEL, &[u as u64, j as u64, i as u64]))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Pedersen commitment `value * H + blinder * G`.
pub fn commit(value: &ScalarField, blinder: &ScalarField) -> Projective {
    value_generator() * value + Projective::mul_generator(blinder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edwards::Group;

    #[test]
    fn test_generators_are_distinct() {
        let params = Parameters::new(2, 2).expect("valid");
        let mut all = vec![Projective::generator(), value_generator(), linking_generator()];
        all.extend(matrix_generators(&params).into_iter().flatten());
        for i in 0..all.len() {
            assert!(!all[i].is_identity());
            for j in i + 1..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn test_tensor_generators_distinct_from_matrix() {
        let params = Parameters::new(2, 2).expect("valid");
        let tensor = tensor_generators(&params, 2);
        assert_eq!(tensor.len(), 2);
        let mut all: Vec<Projective> = matrix_generators(&params).into_iter().flatten().collect();
        all.extend(tensor.into_iter().flatten().flatten());
        assert_eq!(all.len(), 4 + 8);
        for i in 0..all.len() {
            for j in i + 1..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn test_commit_is_homomorphic() {
        let a = commit(&ScalarField::from(3u64), &ScalarField::from(5u64));
        let b = commit(&ScalarField::from(4u64), &ScalarField::from(6u64));
        assert_eq!(a + b, commit(&ScalarField::from(7u64), &ScalarField::from(11u64)));
    }

    #[test]
    fn test_zero_value_commitment() {
        let blinder = ScalarField::from(9u64);
        assert_eq!(
            commit(&ScalarField::ZERO, &blinder),
            Projective::mul_generator(&blinder)
        );
    }
}
