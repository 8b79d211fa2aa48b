//! Multi-input spend proof generation.

use edwards::{Projective, RandomField, ScalarField, ScalarVector, Transcript, multiexp};
use rand::Rng;
use tracing::debug;

use crate::coefficients::ring_polynomials;
use crate::constants::SPEND_PROTOCOL_NAME;
use crate::errors::ProofError;
use crate::generators::{linking_generator, tensor_generators};
use crate::parameters::Parameters;
use crate::proof::{HiddenData, hidden_blinders};
use crate::prover::{commit_matrix, cross_terms, indicator, zero_sum_rows};
use crate::spend::{SpendProof, SpendWitness};

/// Binds the ring, the outputs, the tags and the tensor commitments, and
/// draws `mu`.
pub(crate) fn spend_aggregation_challenge(
    transcript: &mut Transcript,
    keys: &[Projective],
    commitments: &[Projective],
    outputs: &[Projective],
    tags: &[Projective],
    points: [&Projective; 4],
) -> Result<ScalarField, ProofError> {
    transcript.update(keys)?;
    transcript.update(commitments)?;
    transcript.update(outputs)?;
    transcript.update(tags)?;
    for point in points {
        transcript.update(point)?;
    }
    Ok(transcript.challenge())
}

/// Binds the `X`, `Y` and `Z` response commitments and draws `x`.
pub(crate) fn spend_response_challenge(
    transcript: &mut Transcript,
    x_points: &[Projective],
    y_points: &[Projective],
    z_points: &[Projective],
) -> Result<ScalarField, ProofError> {
    transcript.update(x_points)?;
    transcript.update(y_points)?;
    transcript.update(z_points)?;
    Ok(transcript.challenge())
}

/// Commits a `spends x m x n` tensor against the matching bases.
fn commit_tensor(
    generators: &[Vec<Vec<Projective>>],
    values: &[Vec<Vec<ScalarField>>],
    blinder: ScalarField,
) -> Result<Projective, ProofError> {
    commit_matrix(&generators.concat(), &values.concat(), blinder)
}

fn random_masks<R: Rng + ?Sized>(rng: &mut R, spends: usize, m: usize) -> Vec<ScalarVector> {
    (0..spends)
        .map(|_| (0..m).map(|_| ScalarField::random(rng)).collect())
        .collect()
}

/// Proves that every input of `witness` opens a distinct ring position and
/// that the spent amounts equal the amounts committed in `outputs`.
///
/// For each input `u` at index `l_u`, `keys[l_u]` must be `r_u * G` and
/// `commitments[l_u]` must be `a_u * H + s_u * G`. `outputs` must list the
/// witness's output commitments in order.
///
/// With `hidden`, the tensor commitment blinders are derived from the seed
/// as for single proofs, and
/// [`verify_spend`](crate::verify_spend) returns the embedded payload to a
/// holder of the same seed.
#[allow(non_snake_case)]
pub fn prove_spend<R: Rng + ?Sized>(
    rng: &mut R,
    params: &Parameters,
    keys: &[Projective],
    commitments: &[Projective],
    outputs: &[Projective],
    witness: &SpendWitness,
    hidden: Option<&HiddenData>,
) -> Result<SpendProof, ProofError> {
    params.check_ring_len(keys.len())?;
    params.check_ring_len(commitments.len())?;
    params.check_spend_count(witness.spends())?;
    if outputs.len() != witness.outputs().len() {
        return Err(ProofError::SizeMismatch {
            expected: witness.outputs().len(),
            actual: outputs.len(),
        });
    }

    for input in witness.inputs() {
        let l = input.index();
        if l >= params.ring_size()
            || keys[l] != input.verification_key()
            || commitments[l] != input.commitment()
        {
            return Err(ProofError::InvalidWitness);
        }
    }
    if outputs
        .iter()
        .zip(witness.outputs())
        .any(|(public, opening)| *public != opening.commitment())
    {
        return Err(ProofError::InvalidWitness);
    }

    let n = params.n();
    let m = params.m();
    let spends = witness.spends();
    let ring_size = params.ring_size();
    let G = Projective::generator();
    let U = linking_generator();
    let Gi = tensor_generators(params, spends);

    let J = witness
        .inputs()
        .iter()
        .map(|input| input.linking_tag())
        .collect::<Result<Vec<_>, _>>()?;

    let (rA, rB, rC, rD) = match hidden {
        Some(hidden) => {
            let [rA, rB, rC, rD] =
                hidden_blinders(&hidden.seed, &[&keys, &commitments, &outputs, &J])?;
            (rA + hidden.aux.first, rB, rC, rD + hidden.aux.second)
        }
        None => (
            ScalarField::random(rng),
            ScalarField::random(rng),
            ScalarField::random(rng),
            ScalarField::random(rng),
        ),
    };

    let a: Vec<Vec<Vec<ScalarField>>> =
        (0..spends).map(|_| zero_sum_rows(rng, params)).collect();
    let digits: Vec<Vec<usize>> = witness
        .inputs()
        .iter()
        .map(|input| params.decompose(input.index()))
        .collect();
    let sigma: Vec<Vec<Vec<ScalarField>>> = digits
        .iter()
        .map(|row| row.iter().map(|d| indicator(*d, n)).collect())
        .collect();
    let (a_sigma, a_squared): (Vec<_>, Vec<_>) = a
        .iter()
        .zip(&sigma)
        .map(|(a_u, sigma_u)| cross_terms(a_u, sigma_u))
        .unzip();

    let A = commit_tensor(&Gi, &a, rA)?;
    let B = commit_tensor(&Gi, &sigma, rB)?;
    let C = commit_tensor(&Gi, &a_sigma, rC)?;
    let D = commit_tensor(&Gi, &a_squared, rD)?;

    let mut transcript = Transcript::new(SPEND_PROTOCOL_NAME);
    let mu = spend_aggregation_challenge(
        &mut transcript,
        keys,
        commitments,
        outputs,
        &J,
        [&A, &B, &C, &D],
    )?;
    let mu_powers = ScalarVector::powers(mu, ring_size);

    // Every spend's polynomials summed per ring index.
    let mut polys = vec![vec![ScalarField::ZERO; m + 1]; ring_size];
    for (a_u, digits_u) in a.iter().zip(&digits) {
        for (acc, poly) in polys.iter_mut().zip(ring_polynomials(params, a_u, digits_u)) {
            for (acc, coefficient) in acc.iter_mut().zip(poly) {
                *acc += coefficient;
            }
        }
    }

    let rho_r = random_masks(rng, spends, m);
    let rho_s = random_masks(rng, spends, m);

    let key_ring: Vec<Projective> = keys.iter().copied().chain([G]).collect();
    let commitment_ring: Vec<Projective> = commitments.iter().copied().chain([G]).collect();
    let tag_bases: Vec<Projective> = [U].into_iter().chain(J.iter().copied()).collect();
    let mut X = Vec::with_capacity(m);
    let mut Y = Vec::with_capacity(m);
    let mut Z = Vec::with_capacity(m);
    for j in 0..m {
        let weighted: Vec<ScalarField> = polys
            .iter()
            .zip(mu_powers.iter())
            .map(|(p, power)| p[j] * *power)
            .collect();
        let rho_r_sum: ScalarField = rho_r.iter().map(|rho| rho[j]).sum();
        let rho_s_sum: ScalarField = rho_s.iter().map(|rho| rho[j]).sum();

        let mut scalars = weighted.clone();
        scalars.push(rho_r_sum);
        X.push(multiexp(&scalars, &key_ring)?);

        let mut scalars: Vec<ScalarField> = vec![weighted.iter().sum()];
        scalars.extend(rho_r.iter().map(|rho| rho[j]));
        Y.push(multiexp(&scalars, &tag_bases)?);

        let mut scalars: Vec<ScalarField> = polys.iter().map(|p| p[j]).collect();
        scalars.push(rho_s_sum);
        Z.push(multiexp(&scalars, &commitment_ring)?);
    }

    let x = spend_response_challenge(&mut transcript, &X, &Y, &Z)?;
    let x_powers = ScalarVector::powers(x, m + 1);
    let mask_powers = x_powers.slice(0..m)?;
    let x_m = x_powers[m];

    let f: Vec<Vec<Vec<ScalarField>>> = sigma
        .iter()
        .zip(&a)
        .map(|(sigma_u, a_u)| {
            sigma_u
                .iter()
                .zip(a_u)
                .map(|(s_row, a_row)| (1..n).map(|i| s_row[i] * x + a_row[i]).collect())
                .collect()
        })
        .collect();
    let zA = rB * x + rA;
    let zC = rC * x + rD;

    let mut zR = Vec::with_capacity(spends);
    for (input, rho) in witness.inputs().iter().zip(&rho_r) {
        let masks = rho.inner_product(&mask_powers)?;
        zR.push(mu_powers[input.index()] * *input.key() * x_m - masks);
    }

    let input_blinders: ScalarField = witness.inputs().iter().map(|i| *i.blinder()).sum();
    let output_blinders: ScalarField = witness.outputs().iter().map(|o| *o.blinder()).sum();
    let mut masks = ScalarField::ZERO;
    for rho in &rho_s {
        masks += rho.inner_product(&mask_powers)?;
    }
    let zS = (input_blinders - output_blinders) * x_m - masks;

    debug!(
        n,
        m,
        spends,
        outputs = outputs.len(),
        hidden = hidden.is_some(),
        "generated spend proof"
    );

    Ok(SpendProof {
        J,
        A,
        B,
        C,
        D,
        X,
        Y,
        Z,
        f,
        zA,
        zC,
        zR,
        zS,
    })
}
