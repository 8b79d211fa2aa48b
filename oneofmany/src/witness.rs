//! Prover-side secret for a ring position.

use core::fmt;

use edwards::{Projective, RandomField, ScalarField};
use rand::Rng;

use crate::errors::ProofError;
use crate::generators::linking_generator;
use crate::parameters::Parameters;

/// Secret index `l` with the signing key `r` and commitment blinder `s`
/// such that `M[l] = r * G` and `P[l] = s * G`.
///
/// A witness is never serialized and its `Debug` output omits the scalars.
#[derive(Clone)]
pub struct Witness {
    index: usize,
    key: ScalarField,
    blinder: ScalarField,
}

impl Witness {
    /// Requires `index < ring_size` and a nonzero signing key.
    pub fn new(
        params: &Parameters,
        index: usize,
        key: ScalarField,
        blinder: ScalarField,
    ) -> Result<Self, ProofError> {
        if index >= params.ring_size() || key.is_zero() {
            return Err(ProofError::InvalidWitness);
        }
        Ok(Self {
            index,
            key,
            blinder,
        })
    }

    /// Fresh random signing key and blinder at `index`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        params: &Parameters,
        index: usize,
    ) -> Result<Self, ProofError> {
        let key = ScalarField::random_nonzero(rng);
        let blinder = ScalarField::random(rng);
        Self::new(params, index, key, blinder)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn key(&self) -> &ScalarField {
        &self.key
    }

    pub(crate) fn blinder(&self) -> &ScalarField {
        &self.blinder
    }

    /// The ring key this witness opens, `r * G`.
    pub fn verification_key(&self) -> Projective {
        Projective::mul_generator(&self.key)
    }

    /// The ring commitment this witness opens, `s * G`.
    pub fn commitment(&self) -> Projective {
        Projective::mul_generator(&self.blinder)
    }

    /// Linking tag `J = r^-1 * U`.
    ///
    /// Deterministic in the signing key, so two proofs spending the same key
    /// carry the same tag.
    pub fn linking_tag(&self) -> Result<Projective, ProofError> {
        Ok(linking_generator() * self.key.invert()?)
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Witness")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
