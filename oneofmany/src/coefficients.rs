//! Ring-index coefficient products and the prover's digit polynomials.

use edwards::{ScalarField, ScalarVector};
use tracing::trace;

use crate::errors::ProofError;
use crate::gray::GrayCode;
use crate::parameters::Parameters;

/// How the verifier computes `t_k = prod_j f[j][k_j]` for every ring index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CoefficientStrategy {
    /// Recompute each product from scratch, `O(N * m)` multiplications.
    Direct,
    /// Walk the ring in Gray-code order, updating one factor per step.
    /// Falls back to [`Direct`](Self::Direct) if any `f` entry is zero.
    #[default]
    GrayCode,
}

/// `t_k` for `k` in `0..ring_size`, in natural index order.
///
/// `f` must hold exactly `m` rows of `n` entries, otherwise
/// [`ProofError::SizeMismatch`] is returned.
pub fn ring_coefficients(
    params: &Parameters,
    f: &[Vec<ScalarField>],
    strategy: CoefficientStrategy,
) -> Result<Vec<ScalarField>, ProofError> {
    check_matrix(params, f)?;
    Ok(match strategy {
        CoefficientStrategy::Direct => direct_coefficients(params, f),
        CoefficientStrategy::GrayCode => gray_coefficients(params, f),
    })
}

fn check_matrix(params: &Parameters, f: &[Vec<ScalarField>]) -> Result<(), ProofError> {
    if f.len() != params.m() {
        return Err(ProofError::SizeMismatch {
            expected: params.m(),
            actual: f.len(),
        });
    }
    match f.iter().find(|row| row.len() != params.n()) {
        Some(row) => Err(ProofError::SizeMismatch {
            expected: params.n(),
            actual: row.len(),
        }),
        None => Ok(()),
    }
}

fn direct_coefficients(params: &Parameters, f: &[Vec<ScalarField>]) -> Vec<ScalarField> {
    (0..params.ring_size())
        .map(|k| {
            params
                .decompose(k)
                .iter()
                .zip(f)
                .map(|(digit, row)| row[*digit])
                .product()
        })
        .collect()
}

fn gray_coefficients(params: &Parameters, f: &[Vec<ScalarField>]) -> Vec<ScalarField> {
    let n = params.n();
    let flat: ScalarVector = f.iter().flatten().copied().collect();
    let Ok(inverses) = flat.invert() else {
        trace!("zero coefficient, recomputing ring products directly");
        return direct_coefficients(params, f);
    };

    let place: Vec<usize> = (0..params.m()).map(|j| n.pow(j as u32)).collect();
    let mut out = vec![ScalarField::ZERO; params.ring_size()];
    let mut product: ScalarField = f.iter().map(|row| row[0]).product();
    let mut index = 0;
    out[0] = product;

    for change in GrayCode::new(n, params.m()) {
        let j = change.position;
        product *= inverses[j * n + change.old] * f[j][change.new];
        index = index + change.new * place[j] - change.old * place[j];
        out[index] = product;
    }
    out
}

/// `a + b*X` per digit, multiplied out: coefficient `j` of ring index `k`'s
/// polynomial `prod_j (a[j][k_j] + delta(l_j, k_j) * X)`.
///
/// Each returned row has `m + 1` coefficients; the leading one is 1 exactly
/// at `k = l`.
pub(crate) fn ring_polynomials(
    params: &Parameters,
    a: &[Vec<ScalarField>],
    secret_digits: &[usize],
) -> Vec<Vec<ScalarField>> {
    (0..params.ring_size())
        .map(|k| {
            let mut poly = vec![ScalarField::ONE];
            for (j, digit) in params.decompose(k).into_iter().enumerate() {
                let slope = if digit == secret_digits[j] {
                    ScalarField::ONE
                } else {
                    ScalarField::ZERO
                };
                poly = convolve(&poly, &[a[j][digit], slope]);
            }
            poly
        })
        .collect()
}

fn convolve(x: &[ScalarField], y: &[ScalarField]) -> Vec<ScalarField> {
    let mut out = vec![ScalarField::ZERO; x.len() + y.len() - 1];
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            out[i + j] += *xi * *yj;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use edwards::RandomField;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn random_matrix(rng: &mut StdRng, params: &Parameters) -> Vec<Vec<ScalarField>> {
        (0..params.m())
            .map(|_| (0..params.n()).map(|_| ScalarField::random(rng)).collect())
            .collect()
    }

    #[test]
    fn test_strategies_agree() {
        let mut rng = StdRng::seed_from_u64(21);
        for (n, m) in [(2, 1), (2, 3), (3, 2), (4, 2), (3, 3)] {
            let params = Parameters::new(n, m).expect("valid");
            let f = random_matrix(&mut rng, &params);
            assert_eq!(
                ring_coefficients(&params, &f, CoefficientStrategy::Direct),
                ring_coefficients(&params, &f, CoefficientStrategy::GrayCode),
                "n {n} m {m}"
            );
        }
    }

    #[test]
    fn test_gray_falls_back_on_zero() {
        let mut rng = StdRng::seed_from_u64(22);
        let params = Parameters::new(3, 2).expect("valid");
        let mut f = random_matrix(&mut rng, &params);
        f[1][2] = ScalarField::ZERO;
        let direct = ring_coefficients(&params, &f, CoefficientStrategy::Direct).expect("shape");
        assert_eq!(
            ring_coefficients(&params, &f, CoefficientStrategy::GrayCode),
            Ok(direct.clone())
        );
        // k = 2 + 3 * 2 picks f[1][2]
        assert_eq!(direct[8], ScalarField::ZERO);
    }

    #[test]
    fn test_product_sums_to_row_sum_power() {
        let mut rng = StdRng::seed_from_u64(23);
        let params = Parameters::new(3, 2).expect("valid");
        let f = random_matrix(&mut rng, &params);
        let total: ScalarField = ring_coefficients(&params, &f, CoefficientStrategy::default())
            .expect("shape")
            .into_iter()
            .sum();
        let expected: ScalarField = f.iter().map(|row| row.iter().sum::<ScalarField>()).product();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_malformed_matrix_rejected() {
        let mut rng = StdRng::seed_from_u64(25);
        let params = Parameters::new(2, 2).expect("valid");
        let full = random_matrix(&mut rng, &params);

        let missing_row = full[..1].to_vec();
        let mut short_row = full.clone();
        short_row[1].pop();
        let mut long_row = full.clone();
        long_row[0].push(ScalarField::ONE);

        for strategy in [CoefficientStrategy::Direct, CoefficientStrategy::GrayCode] {
            assert_eq!(
                ring_coefficients(&params, &missing_row, strategy),
                Err(ProofError::SizeMismatch {
                    expected: 2,
                    actual: 1
                })
            );
            assert_eq!(
                ring_coefficients(&params, &short_row, strategy),
                Err(ProofError::SizeMismatch {
                    expected: 2,
                    actual: 1
                })
            );
            assert_eq!(
                ring_coefficients(&params, &long_row, strategy),
                Err(ProofError::SizeMismatch {
                    expected: 2,
                    actual: 3
                })
            );
            assert!(ring_coefficients(&params, &[], strategy).is_err());
        }
    }

    #[test]
    fn test_polynomials_evaluate_to_delta() {
        let mut rng = StdRng::seed_from_u64(24);
        let params = Parameters::new(3, 2).expect("valid");
        let a = random_matrix(&mut rng, &params);
        let secret = 5;
        let polys = ring_polynomials(&params, &a, &params.decompose(secret));

        for (k, poly) in polys.iter().enumerate() {
            assert_eq!(poly.len(), params.m() + 1);
            let leading = poly[params.m()];
            let expected = if k == secret { ScalarField::ONE } else { ScalarField::ZERO };
            assert_eq!(leading, expected, "k {k}");
        }

        // Evaluate at x and compare with the products of f = delta * x + a.
        let x = ScalarField::random(&mut rng);
        let digits = params.decompose(secret);
        let f: Vec<Vec<ScalarField>> = a
            .iter()
            .enumerate()
            .map(|(j, row)| {
                row.iter()
                    .enumerate()
                    .map(|(i, a)| if i == digits[j] { x + *a } else { *a })
                    .collect()
            })
            .collect();
        let t = ring_coefficients(&params, &f, CoefficientStrategy::Direct).expect("shape");
        for (k, poly) in polys.iter().enumerate() {
            let value: ScalarField = poly
                .iter()
                .zip(ScalarVector::powers(x, poly.len()).iter())
                .map(|(c, p)| *c * *p)
                .sum();
            assert_eq!(value, t[k]);
        }
    }
}
