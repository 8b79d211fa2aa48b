use edwards::{Projective, RandomField, ScalarField};
use oneofmany::{AuxData, HiddenData, Parameters, Proof, Witness, prove, verify};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let params = Parameters::new(2, 4).expect("parameters");
    let index = 11;

    let witness = Witness::random(&mut rng, &params, index).expect("witness");
    let mut keys: Vec<Projective> = (0..params.ring_size())
        .map(|_| Projective::mul_generator(&ScalarField::random(&mut rng)))
        .collect();
    let mut commitments: Vec<Projective> = (0..params.ring_size())
        .map(|_| Projective::mul_generator(&ScalarField::random(&mut rng)))
        .collect();
    keys[index] = witness.verification_key();
    commitments[index] = witness.commitment();

    let seed = ScalarField::random(&mut rng);
    let aux = AuxData {
        first: ScalarField::from(2024u64),
        second: ScalarField::from(7u64),
    };
    let proof = prove(
        &mut rng,
        &params,
        &keys,
        &commitments,
        &witness,
        Some(&HiddenData::new(seed, aux)),
    )
    .expect("prove");

    let proof_bytes = bincode::serialize(&proof).expect("serialize proof");
    let wire = proof.to_bytes();
    println!(
        "ring of {} members, proof is {} bytes ({} with bincode)",
        params.ring_size(),
        wire.len(),
        proof_bytes.len()
    );

    let proof2: Proof = bincode::deserialize(&proof_bytes).expect("deserialize proof");
    let proof3 = Proof::from_bytes(&params, &wire).expect("decode proof");
    assert_eq!(proof2, proof3);

    let ok = verify(&params, &keys, &commitments, &proof2, None).expect("verify");
    assert_eq!(ok, None);

    let recovered = verify(&params, &keys, &commitments, &proof3, Some(&seed)).expect("verify");
    assert_eq!(recovered, Some(aux));
}
