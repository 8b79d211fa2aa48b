//! Multi-input spend verification.
//!
//! The tensor, key, linking and balance equations are folded into a single
//! multiexp with random weights, as for single proofs.

use edwards::{Projective, RandomField, ScalarField, ScalarVector, Transcript, multiexp};
use rayon::prelude::*;
use tracing::debug;

use crate::coefficients::{CoefficientStrategy, ring_coefficients};
use crate::constants::SPEND_PROTOCOL_NAME;
use crate::errors::VerifyError;
use crate::generators::{linking_generator, tensor_generators, value_generator};
use crate::parameters::Parameters;
use crate::proof::{AuxData, hidden_blinders, recover_aux};
use crate::spend::SpendProof;
use crate::spend_prover::{spend_aggregation_challenge, spend_response_challenge};

/// Tags must be valid, prime-order and pairwise distinct.
fn check_points(proof: &SpendProof) -> Result<(), VerifyError> {
    if proof.J.iter().any(Projective::is_identity) {
        debug!("rejecting identity linking tag");
        return Err(VerifyError::Failed);
    }
    if !proof.points().all(|point| point.is_torsion_free()) {
        debug!("rejecting spend proof point outside the prime-order subgroup");
        return Err(VerifyError::Failed);
    }
    for (i, tag) in proof.J.iter().enumerate() {
        if proof.J[i + 1..].contains(tag) {
            debug!("rejecting repeated linking tag");
            return Err(VerifyError::Failed);
        }
    }
    Ok(())
}

/// Verifies a spend of `proof.spends()` ring members into `outputs`.
///
/// With `seed`, a successful verification also returns the [`AuxData`]
/// embedded under that seed.
pub fn verify_spend(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    outputs: &[Projective],
    proof: &SpendProof,
    seed: Option<&ScalarField>,
) -> Result<Option<AuxData>, VerifyError> {
    verify_spend_with_strategy(
        params,
        keys,
        commitments,
        outputs,
        proof,
        seed,
        CoefficientStrategy::default(),
    )
}

/// [`verify_spend`] with an explicit [`CoefficientStrategy`].
pub fn verify_spend_with_strategy(
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    outputs: &[Projective],
    proof: &SpendProof,
    seed: Option<&ScalarField>,
    strategy: CoefficientStrategy,
) -> Result<Option<AuxData>, VerifyError> {
    params.check_ring_len(keys.len())?;
    params.check_ring_len(commitments.len())?;
    proof.check_shape(params)?;
    check_points(proof)?;

    let m = params.m();
    let spends = proof.spends();
    let ring_size = params.ring_size();

    let mut transcript = Transcript::new(SPEND_PROTOCOL_NAME);
    let mu = spend_aggregation_challenge(
        &mut transcript,
        keys,
        commitments,
        outputs,
        &proof.J,
        [&proof.A, &proof.B, &proof.C, &proof.D],
    )?;
    let x = spend_response_challenge(&mut transcript, &proof.X, &proof.Y, &proof.Z)?;

    // Restore the implied first column so every row sums to x.
    let f: Vec<Vec<Vec<ScalarField>>> = proof
        .f
        .iter()
        .map(|block| {
            block
                .iter()
                .map(|row| {
                    let mut full = Vec::with_capacity(row.len() + 1);
                    full.push(x - row.iter().sum::<ScalarField>());
                    full.extend_from_slice(row);
                    full
                })
                .collect()
        })
        .collect();

    let coefficients = f
        .par_iter()
        .map(|f_u| ring_coefficients(params, f_u, strategy))
        .collect::<Result<Vec<_>, _>>()?;
    let mut t = vec![ScalarField::ZERO; ring_size];
    for t_u in &coefficients {
        for (acc, value) in t.iter_mut().zip(t_u) {
            *acc += *value;
        }
    }

    let mut rng = rand::rng();
    let [w1, w2, w3, w4, w5]: [ScalarField; 5] =
        core::array::from_fn(|_| ScalarField::random_nonzero(&mut rng));

    let mu_powers = ScalarVector::powers(mu, ring_size);
    let x_powers = ScalarVector::powers(x, m + 1);
    let x_m = x_powers[m];
    let z_r_sum: ScalarField = proof.zR.iter().sum();
    let weighted_t: ScalarField = t.iter().zip(mu_powers.iter()).map(|(t, p)| *t * *p).sum();

    let mut scalars = Vec::new();
    let mut points = Vec::new();

    scalars.extend(
        f.iter()
            .flatten()
            .flatten()
            .map(|f| w1 * *f + w2 * *f * (x - *f)),
    );
    points.extend(tensor_generators(params, spends).into_iter().flatten().flatten());

    scalars.extend([
        w1 * proof.zA + w2 * proof.zC,
        -w1,
        -(w1 * x),
        -(w2 * x),
        -w2,
        w4 * weighted_t,
        -(w3 * z_r_sum) - w5 * proof.zS,
    ]);
    points.extend([
        value_generator(),
        proof.A,
        proof.B,
        proof.C,
        proof.D,
        linking_generator(),
        Projective::generator(),
    ]);

    for ((t, power), (key, commitment)) in t
        .iter()
        .zip(mu_powers.iter())
        .zip(keys.iter().zip(commitments))
    {
        scalars.push(w3 * *t * *power);
        points.push(*key);
        scalars.push(w5 * *t);
        points.push(*commitment);
    }
    for (j, power) in x_powers.iter().take(m).enumerate() {
        scalars.extend([-(w3 * *power), -(w4 * *power), -(w5 * *power)]);
        points.extend([proof.X[j], proof.Y[j], proof.Z[j]]);
    }
    for (z_r, tag) in proof.zR.iter().zip(&proof.J) {
        scalars.push(-(w4 * *z_r));
        points.push(*tag);
    }
    for output in outputs {
        scalars.push(-(w5 * x_m));
        points.push(*output);
    }

    debug!(
        spends,
        outputs = outputs.len(),
        terms = scalars.len(),
        "evaluating spend verification multiexp"
    );
    if !multiexp(&scalars, &points)?.is_identity() {
        debug!(spends, "spend verification equation does not hold");
        return Err(VerifyError::Failed);
    }

    let Some(seed) = seed else {
        return Ok(None);
    };
    let blinders = hidden_blinders(seed, &[&keys, &commitments, &outputs, &proof.J])?;
    Ok(Some(recover_aux(blinders, x, proof.zA, proof.zC)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spend::{InputOpening, OutputOpening, SpendWitness};
    use crate::spend_prover::prove_spend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn honest_proof(rng: &mut StdRng, params: &Parameters) -> SpendProof {
        let inputs: Vec<InputOpening> = [0, 1]
            .into_iter()
            .map(|index| InputOpening::random(rng, params, index, ScalarField::ONE).expect("input"))
            .collect();
        let keys: Vec<Projective> = inputs.iter().map(|i| i.verification_key()).collect();
        let commitments: Vec<Projective> = inputs.iter().map(|i| i.commitment()).collect();
        let outputs = vec![OutputOpening::random(rng, ScalarField::from(2u64))];
        let witness = SpendWitness::new(params, inputs, outputs).expect("balanced");
        let q = witness.output_commitments();
        prove_spend(rng, params, &keys, &commitments, &q, &witness, None).expect("prove")
    }

    #[test]
    fn test_check_points() {
        let mut rng = StdRng::seed_from_u64(60);
        let params = Parameters::new(2, 1).expect("parameters");
        let proof = honest_proof(&mut rng, &params);
        assert_eq!(check_points(&proof), Ok(()));

        let mut encoded = [0xffu8; 32];
        encoded[0] = 0xec;
        encoded[31] = 0x7f;
        let small = Projective::from_bytes(&encoded).expect("on curve");

        let mut shifted_tag = proof.clone();
        shifted_tag.J[0] = shifted_tag.J[0] + small;
        assert_eq!(check_points(&shifted_tag), Err(VerifyError::Failed));

        let mut shifted_z = proof.clone();
        shifted_z.Z[0] = shifted_z.Z[0] + small;
        assert_eq!(check_points(&shifted_z), Err(VerifyError::Failed));

        let mut repeated = proof.clone();
        repeated.J[1] = repeated.J[0];
        assert_eq!(check_points(&repeated), Err(VerifyError::Failed));

        let mut identity = proof;
        identity.J[1] = Projective::IDENTITY;
        assert_eq!(check_points(&identity), Err(VerifyError::Failed));
    }
}
