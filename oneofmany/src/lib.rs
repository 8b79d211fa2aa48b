//! One-of-many proofs of commitment to zero over ed25519.
//!
//! This library implements a Triptych-style linkable ring proof:
//! - A ring of `N = n^m` verification keys `M_k = r_k * G` and matching
//!   commitments `P_k = s_k * G`
//! - A prover who knows `(r, s)` for one secret index `l` shows that both
//!   `M_l` and `P_l` open to zero, without revealing `l`
//! - A linking tag `J = r^-1 * U` that repeats whenever the same signing key
//!   proves again
//!
//! Proofs are logarithmic in `N`. Verification is a single multiexp, and
//! batches of proofs over the same ring share one multiexp.
//!
//! [`prove_spend`] extends this to several inputs at once. Each commitment
//! then carries an amount, `P_k = a_k * H + s_k * G`, and the proof also
//! shows that the spent amounts equal those in a list of output
//! commitments. Each input gets its own linking tag.
//!
//! # Example
//!
//! ```
//! use edwards::{Projective, RandomField, ScalarField};
//! use oneofmany::{Parameters, Witness, prove, verify};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let params = Parameters::new(2, 2).expect("parameters");
//!
//! // Build a ring with the signer at index 1
//! let witness = Witness::random(&mut rng, &params, 1).expect("witness");
//! let mut keys: Vec<Projective> = (0..params.ring_size())
//!     .map(|_| Projective::mul_generator(&ScalarField::random(&mut rng)))
//!     .collect();
//! let mut commitments = keys.clone();
//! keys[1] = witness.verification_key();
//! commitments[1] = witness.commitment();
//!
//! let proof = prove(&mut rng, &params, &keys, &commitments, &witness, None).expect("prove");
//! assert_eq!(verify(&params, &keys, &commitments, &proof, None), Ok(None));
//! ```
//!
//! # Security Considerations
//!
//! - Use a cryptographically secure random number generator for proving
//! - A hidden-data seed must stay private; anyone holding it can read the
//!   embedded scalars
//! - Proofs bind the whole ring, so verifiers must use the exact ring the
//!   prover used, in the same order
//! - Proof points are checked for small-order components, ring members and
//!   outputs are not; validate them with
//!   [`Projective::is_torsion_free`](edwards::Projective::is_torsion_free)
//!   when they come from untrusted sources

mod coefficients;
mod constants;
mod errors;
mod generators;
mod gray;
mod parameters;
mod proof;
mod prover;
mod spend;
mod spend_prover;
mod spend_verifier;
mod verifier;
mod witness;


pub use coefficients::{CoefficientStrategy, ring_coefficients};
pub use constants::{MAX_RING_SIZE, POINT_SIZE, SCALAR_SIZE};
pub use errors::{ProofError, VerifyError};
pub use generators::{commit, linking_generator, value_generator};
pub use gray::{DigitChange, GrayCode};
pub use parameters::Parameters;
pub use proof::{AuxData, HiddenData, Proof};
pub use prover::prove;
pub use spend::{InputOpening, OutputOpening, SpendProof, SpendWitness};
pub use spend_prover::prove_spend;
pub use spend_verifier::{verify_spend, verify_spend_with_strategy};
pub use verifier::{verify, verify_batch, verify_batch_with_strategy, verify_with_strategy};
pub use witness::Witness;
