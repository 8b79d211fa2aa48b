//! Proof generation.

use edwards::{Projective, RandomField, ScalarField, ScalarVector, Transcript, multiexp};
use rand::Rng;
use tracing::debug;

use crate::coefficients::ring_polynomials;
use crate::constants::PROTOCOL_NAME;
use crate::errors::ProofError;
use crate::generators::{linking_generator, matrix_generators, value_generator};
use crate::parameters::Parameters;
use crate::proof::{HiddenData, Proof, hidden_blinders};
use crate::witness::Witness;

/// Pedersen matrix commitment `sum_{j,i} Gi[j][i] * values[j][i] + blinder * H`.
pub(crate) fn commit_matrix(
    generators: &[Vec<Projective>],
    values: &[Vec<ScalarField>],
    blinder: ScalarField,
) -> Result<Projective, ProofError> {
    let mut scalars: Vec<ScalarField> = values.iter().flatten().copied().collect();
    let mut points: Vec<Projective> = generators.iter().flatten().copied().collect();
    scalars.push(blinder);
    points.push(value_generator());
    Ok(multiexp(&scalars, &points)?)
}

/// Binds the ring, the tags and the matrix commitments, and draws `mu`.
pub(crate) fn aggregation_challenge(
    transcript: &mut Transcript,
    keys: &[Projective],
    commitments: &[Projective],
    points: [&Projective; 6],
) -> Result<ScalarField, ProofError> {
    transcript.update(keys)?;
    transcript.update(commitments)?;
    for point in points {
        transcript.update(point)?;
    }
    Ok(transcript.challenge())
}

/// Binds the response commitments and draws `x`.
pub(crate) fn response_challenge(
    transcript: &mut Transcript,
    x_points: &[Projective],
    y_points: &[Projective],
) -> Result<ScalarField, ProofError> {
    transcript.update(x_points)?;
    transcript.update(y_points)?;
    Ok(transcript.challenge())
}

/// Unit row with a one at `digit`.
pub(crate) fn indicator(digit: usize, n: usize) -> Vec<ScalarField> {
    (0..n)
        .map(|i| if i == digit { ScalarField::ONE } else { ScalarField::ZERO })
        .collect()
}

/// `m` random rows of `n` that each sum to zero.
pub(crate) fn zero_sum_rows<R: Rng + ?Sized>(
    rng: &mut R,
    params: &Parameters,
) -> Vec<Vec<ScalarField>> {
    (0..params.m())
        .map(|_| {
            let mut row = vec![ScalarField::ZERO; params.n()];
            for value in row.iter_mut().skip(1) {
                *value = ScalarField::random(rng);
            }
            row[0] = -row[1..].iter().sum::<ScalarField>();
            row
        })
        .collect()
}

/// The `C` and `D` openings: `a * (1 - 2 * sigma)` and `-a^2`.
pub(crate) fn cross_terms(
    a: &[Vec<ScalarField>],
    sigma: &[Vec<ScalarField>],
) -> (Vec<Vec<ScalarField>>, Vec<Vec<ScalarField>>) {
    let two = ScalarField::from(2u64);
    let a_sigma = a
        .iter()
        .zip(sigma)
        .map(|(a_row, s_row)| {
            a_row
                .iter()
                .zip(s_row)
                .map(|(a, s)| *a * (ScalarField::ONE - two * *s))
                .collect()
        })
        .collect();
    let a_squared = a
        .iter()
        .map(|row| row.iter().map(|a| -a.square()).collect())
        .collect();
    (a_sigma, a_squared)
}

/// Proves that `keys[l]` and `commitments[l]` are both commitments to zero
/// for the witness's secret index `l`, without revealing `l`.
///
/// Both rings must hold exactly `n^m` points. The witness is checked against
/// the ring before any proving work and rejected with
/// [`ProofError::InvalidWitness`] if it does not open position `l`.
///
/// With `hidden`, the `A`..`D` blinders are derived from the seed so that
/// [`verify`](crate::verify) can return the embedded [`AuxData`](crate::AuxData)
/// to a holder of the same seed.
#[allow(non_snake_case)]
pub fn prove<R: Rng + ?Sized>(
    rng: &mut R,
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    witness: &Witness,
    hidden: Option<&HiddenData>,
) -> Result<Proof, ProofError> {
    params.check_ring_len(keys.len())?;
    params.check_ring_len(commitments.len())?;

    let l = witness.index();
    if l >= params.ring_size() {
        return Err(ProofError::InvalidWitness);
    }
    let r = *witness.key();
    let s = *witness.blinder();
    if keys[l] != Projective::mul_generator(&r) || commitments[l] != Projective::mul_generator(&s)
    {
        return Err(ProofError::InvalidWitness);
    }

    let n = params.n();
    let m = params.m();
    let G = Projective::generator();
    let U = linking_generator();
    let Gi = matrix_generators(params);

    let J = U * r.invert()?;
    let K = J * s;

    let (rA, rB, rC, rD) = match hidden {
        Some(hidden) => {
            let [rA, rB, rC, rD] =
                hidden_blinders(&hidden.seed, &[&keys, &commitments, &J, &K])?;
            (rA + hidden.aux.first, rB, rC, rD + hidden.aux.second)
        }
        None => (
            ScalarField::random(rng),
            ScalarField::random(rng),
            ScalarField::random(rng),
            ScalarField::random(rng),
        ),
    };

    let a = zero_sum_rows(rng, params);
    let digits = params.decompose(l);
    let sigma: Vec<Vec<ScalarField>> = digits.iter().map(|d| indicator(*d, n)).collect();
    let (a_sigma, a_squared) = cross_terms(&a, &sigma);

    let A = commit_matrix(&Gi, &a, rA)?;
    let B = commit_matrix(&Gi, &sigma, rB)?;
    let C = commit_matrix(&Gi, &a_sigma, rC)?;
    let D = commit_matrix(&Gi, &a_squared, rD)?;

    let mut transcript = Transcript::new(PROTOCOL_NAME);
    let mu = aggregation_challenge(
        &mut transcript,
        keys,
        commitments,
        [&J, &K, &A, &B, &C, &D],
    )?;

    let polys = ring_polynomials(params, &a, &digits);
    let mut rho = ScalarVector::default();
    for _ in 0..m {
        rho.push(ScalarField::random(rng));
    }

    let ring: Vec<Projective> = keys
        .iter()
        .chain(commitments)
        .copied()
        .chain([G])
        .collect();
    let mut X = Vec::with_capacity(m);
    let mut Y = Vec::with_capacity(m);
    for j in 0..m {
        let mut scalars = Vec::with_capacity(ring.len());
        scalars.extend(polys.iter().map(|p| p[j]));
        scalars.extend(polys.iter().map(|p| mu * p[j]));
        scalars.push(rho[j]);
        X.push(multiexp(&scalars, &ring)?);

        let weight: ScalarField = polys.iter().map(|p| p[j]).sum();
        Y.push(U * weight + J * rho[j]);
    }

    let x = response_challenge(&mut transcript, &X, &Y)?;
    let x_powers = ScalarVector::powers(x, m + 1);

    let f: Vec<Vec<ScalarField>> = sigma
        .iter()
        .zip(&a)
        .map(|(s_row, a_row)| (1..n).map(|i| s_row[i] * x + a_row[i]).collect())
        .collect();
    let zA = rB * x + rA;
    let zC = rC * x + rD;
    let masks = rho.inner_product(&x_powers.slice(0..m)?)?;
    let z = (r + mu * s) * x_powers[m] - masks;

    debug!(
        n,
        m,
        ring_size = params.ring_size(),
        hidden = hidden.is_some(),
        "generated one-of-many proof"
    );

    Ok(Proof {
        J,
        K,
        A,
        B,
        C,
        D,
        X,
        Y,
        f,
        zA,
        zC,
        z,
    })
}
