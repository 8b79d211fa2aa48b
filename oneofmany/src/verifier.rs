//! Single and batch verification.
//!
//! Each proof's four equations are folded into one multiexp with random
//! weights. In a batch, the terms on shared generators and on the ring are
//! summed across proofs first, so the whole batch costs a single multiexp.

use edwards::{Projective, RandomField, ScalarField, ScalarVector, Transcript, multiexp};
use rayon::prelude::*;
use tracing::debug;

use crate::coefficients::{CoefficientStrategy, ring_coefficients};
use crate::constants::PROTOCOL_NAME;
use crate::errors::VerifyError;
use crate::generators::{linking_generator, matrix_generators, value_generator};
use crate::parameters::Parameters;
use crate::proof::{AuxData, Proof, hidden_blinders, recover_aux};
use crate::prover::{aggregation_challenge, response_challenge};

/// One proof's weighted contribution to the combined check.
struct ProofTerms {
    x: ScalarField,
    matrix: Vec<ScalarField>,
    h: ScalarField,
    g: ScalarField,
    u: ScalarField,
    keys: Vec<ScalarField>,
    commitments: Vec<ScalarField>,
    scalars: Vec<ScalarField>,
    points: Vec<Projective>,
}

fn proof_terms(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    proof: &Proof,
    strategy: CoefficientStrategy,
) -> Result<ProofTerms, VerifyError> {
    proof.check_shape(params)?;
    if proof.J.is_identity() {
        debug!("rejecting identity linking tag");
        return Err(VerifyError::Failed);
    }
    if !proof.points().all(|point| point.is_torsion_free()) {
        debug!("rejecting proof point outside the prime-order subgroup");
        return Err(VerifyError::Failed);
    }

    let mut transcript = Transcript::new(PROTOCOL_NAME);
    let mu = aggregation_challenge(
        &mut transcript,
        keys,
        commitments,
        [&proof.J, &proof.K, &proof.A, &proof.B, &proof.C, &proof.D],
    )?;
    let x = response_challenge(&mut transcript, &proof.X, &proof.Y)?;

    // Restore the implied first column so every row sums to x.
    let f: Vec<Vec<ScalarField>> = proof
        .f
        .iter()
        .map(|row| {
            let mut full = Vec::with_capacity(row.len() + 1);
            full.push(x - row.iter().sum::<ScalarField>());
            full.extend_from_slice(row);
            full
        })
        .collect();

    let mut rng = rand::rng();
    let [w1, w2, w3, w4]: [ScalarField; 4] =
        core::array::from_fn(|_| ScalarField::random_nonzero(&mut rng));

    let matrix = f
        .iter()
        .flatten()
        .map(|f| w1 * *f + w2 * *f * (x - *f))
        .collect();

    let t = ring_coefficients(params, &f, strategy)?;
    let t_sum: ScalarField = t.iter().sum();
    let key_weight = w3;
    let commitment_weight = w3 * mu;

    let x_powers = ScalarVector::powers(x, params.m());
    let mut scalars = vec![
        -w1,
        -(w1 * x),
        -(w2 * x),
        -w2,
        -(w4 * proof.z),
        w4 * mu * t_sum,
    ];
    let mut points = vec![proof.A, proof.B, proof.C, proof.D, proof.J, proof.K];
    for (j, power) in x_powers.iter().enumerate() {
        scalars.push(-(w3 * *power));
        points.push(proof.X[j]);
        scalars.push(-(w4 * *power));
        points.push(proof.Y[j]);
    }

    Ok(ProofTerms {
        x,
        matrix,
        h: w1 * proof.zA + w2 * proof.zC,
        g: -(w3 * proof.z),
        u: w4 * t_sum,
        keys: t.iter().map(|t| key_weight * *t).collect(),
        commitments: t.iter().map(|t| commitment_weight * *t).collect(),
        scalars,
        points,
    })
}

/// Sums the shared terms and evaluates the combined check.
fn check_terms(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    terms: Vec<ProofTerms>,
) -> Result<(), VerifyError> {
    let ring_size = params.ring_size();
    let proofs = terms.len();

    let mut matrix = vec![ScalarField::ZERO; params.n() * params.m()];
    let mut key_scalars = vec![ScalarField::ZERO; ring_size];
    let mut commitment_scalars = vec![ScalarField::ZERO; ring_size];
    let mut h = ScalarField::ZERO;
    let mut g = ScalarField::ZERO;
    let mut u = ScalarField::ZERO;
    let mut scalars = Vec::new();
    let mut points = Vec::new();

    for term in terms {
        for (acc, value) in matrix.iter_mut().zip(&term.matrix) {
            *acc += *value;
        }
        for (acc, value) in key_scalars.iter_mut().zip(&term.keys) {
            *acc += *value;
        }
        for (acc, value) in commitment_scalars.iter_mut().zip(&term.commitments) {
            *acc += *value;
        }
        h += term.h;
        g += term.g;
        u += term.u;
        scalars.extend(term.scalars);
        points.extend(term.points);
    }

    scalars.extend(matrix);
    points.extend(matrix_generators(params).into_iter().flatten());
    scalars.extend([h, g, u]);
    points.extend([
        value_generator(),
        Projective::generator(),
        linking_generator(),
    ]);
    scalars.extend(key_scalars);
    points.extend_from_slice(keys);
    scalars.extend(commitment_scalars);
    points.extend_from_slice(commitments);

    debug!(proofs, terms = scalars.len(), "evaluating verification multiexp");
    if multiexp(&scalars, &points)?.is_identity() {
        Ok(())
    } else {
        debug!(proofs, "verification equation does not hold");
        Err(VerifyError::Failed)
    }
}

fn check_rings(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
) -> Result<(), VerifyError> {
    params.check_ring_len(keys.len())?;
    params.check_ring_len(commitments.len())?;
    Ok(())
}

/// Verifies `proof` against the ring.
///
/// With `seed`, a successful verification also returns the [`AuxData`] the
/// prover embedded under that seed. A wrong seed yields unrelated scalars,
/// not an error.
pub fn verify(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    proof: &Proof,
    seed: Option<&ScalarField>,
) -> Result<Option<AuxData>, VerifyError> {
    verify_with_strategy(
        params,
        keys,
        commitments,
        proof,
        seed,
        CoefficientStrategy::default(),
    )
}

/// [`verify`] with an explicit [`CoefficientStrategy`].
pub fn verify_with_strategy(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    proof: &Proof,
    seed: Option<&ScalarField>,
    strategy: CoefficientStrategy,
) -> Result<Option<AuxData>, VerifyError> {
    check_rings(params, keys, commitments)?;
    let terms = proof_terms(params, keys, commitments, proof, strategy)?;
    let x = terms.x;
    check_terms(params, keys, commitments, vec![terms])?;

    let Some(seed) = seed else {
        return Ok(None);
    };
    let blinders = hidden_blinders(seed, &[&keys, &commitments, &proof.J, &proof.K])?;
    Ok(Some(recover_aux(blinders, x, proof.zA, proof.zC)))
}

/// Verifies every proof in `proofs` against the same ring in one multiexp.
///
/// An empty batch is valid. On failure the batch is rejected as a whole;
/// verify proofs individually to find the culprit.
pub fn verify_batch(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    proofs: &[Proof],
) -> Result<(), VerifyError> {
    verify_batch_with_strategy(
        params,
        keys,
        commitments,
        proofs,
        CoefficientStrategy::default(),
    )
}

/// [`verify_batch`] with an explicit [`CoefficientStrategy`].
pub fn verify_batch_with_strategy(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    proofs: &[Proof],
    strategy: CoefficientStrategy,
) -> Result<(), VerifyError> {
    check_rings(params, keys, commitments)?;
    if proofs.is_empty() {
        return Ok(());
    }

    let terms = proofs
        .par_iter()
        .map(|proof| proof_terms(params, keys, commitments, proof, strategy))
        .collect::<Result<Vec<_>, _>>()?;
    check_terms(params, keys, commitments, terms)
}
