//! Multi-input spends: several ring members consumed at once, balanced
//! against a list of output commitments.
//!
//! Each spent member `u` has a signing key `M[l_u] = r_u * G` and an amount
//! commitment `P[l_u] = a_u * H + s_u * G`. Outputs are `Q_j = b_j * H + t_j * G`
//! and the amounts must satisfy `sum a_u = sum b_j`.

use core::fmt;

use edwards::{Projective, RandomField, ScalarField};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ProofError;
use crate::generators::{commit, linking_generator};
use crate::parameters::Parameters;
use crate::proof::Reader;

/// Secret opening of one spent ring member.
#[derive(Clone)]
pub struct InputOpening {
    index: usize,
    key: ScalarField,
    blinder: ScalarField,
    amount: ScalarField,
}

impl InputOpening {
    /// Requires `index < ring_size` and a nonzero signing key.
    pub fn new(
        params: &Parameters,
        index: usize,
        key: ScalarField,
        blinder: ScalarField,
        amount: ScalarField,
    ) -> Result<Self, ProofError> {
        if index >= params.ring_size() || key.is_zero() {
            return Err(ProofError::InvalidWitness);
        }
        Ok(Self {
            index,
            key,
            blinder,
            amount,
        })
    }

    /// Fresh random key and blinder for `amount` at `index`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        params: &Parameters,
        index: usize,
        amount: ScalarField,
    ) -> Result<Self, ProofError> {
        let key = ScalarField::random_nonzero(rng);
        let blinder = ScalarField::random(rng);
        Self::new(params, index, key, blinder, amount)
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

    pub(crate) fn amount(&self) -> &ScalarField {
        &self.amount
    }

    /// `r * G`
    pub fn verification_key(&self) -> Projective {
        Projective::mul_generator(&self.key)
    }

    /// `a * H + s * G`
    pub fn commitment(&self) -> Projective {
        commit(&self.amount, &self.blinder)
    }

    /// `r^-1 * U`, the same tag a single-input proof with this key carries.
    pub fn linking_tag(&self) -> Result<Projective, ProofError> {
        Ok(linking_generator() * self.key.invert()?)
    }
}

impl fmt::Debug for InputOpening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputOpening")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Secret opening of one output commitment.
#[derive(Clone)]
pub struct OutputOpening {
    blinder: ScalarField,
    amount: ScalarField,
}

impl OutputOpening {
    pub fn new(blinder: ScalarField, amount: ScalarField) -> Self {
        Self { blinder, amount }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, amount: ScalarField) -> Self {
        Self::new(ScalarField::random(rng), amount)
    }

    pub(crate) fn blinder(&self) -> &ScalarField {
        &self.blinder
    }

    pub(crate) fn amount(&self) -> &ScalarField {
        &self.amount
    }

    /// `b * H + t * G`
    pub fn commitment(&self) -> Projective {
        commit(&self.amount, &self.blinder)
    }
}

impl fmt::Debug for OutputOpening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputOpening").finish_non_exhaustive()
    }
}

/// Everything the prover of a spend knows.
#[derive(Clone, Debug)]
pub struct SpendWitness {
    inputs: Vec<InputOpening>,
    outputs: Vec<OutputOpening>,
}

impl SpendWitness {
    /// Checks the input count, that input indices are distinct, and that
    /// amounts balance.
    pub fn new(
        params: &Parameters,
        inputs: Vec<InputOpening>,
        outputs: Vec<OutputOpening>,
    ) -> Result<Self, ProofError> {
        params.check_spend_count(inputs.len())?;

        let mut indices: Vec<usize> = inputs.iter().map(InputOpening::index).collect();
        indices.sort_unstable();
        if indices.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ProofError::InvalidWitness);
        }

        let spent: ScalarField = inputs.iter().map(|input| *input.amount()).sum();
        let created: ScalarField = outputs.iter().map(|output| *output.amount()).sum();
        if spent != created {
            return Err(ProofError::Unbalanced);
        }

        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &[InputOpening] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputOpening] {
        &self.outputs
    }

    /// Number of spent ring members.
    pub fn spends(&self) -> usize {
        self.inputs.len()
    }

    /// The public output list `Q`.
    pub fn output_commitments(&self) -> Vec<Projective> {
        self.outputs.iter().map(OutputOpening::commitment).collect()
    }
}

/// A multi-input spend proof.
///
/// `J` holds one linking tag per spent member and `f[u]` the revealed
/// coefficients of spend `u`. `Z` and `zS` carry the balance relation.
#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendProof {
    pub(crate) J: Vec<Projective>,
    pub(crate) A: Projective,
    pub(crate) B: Projective,
    pub(crate) C: Projective,
    pub(crate) D: Projective,
    pub(crate) X: Vec<Projective>,
    pub(crate) Y: Vec<Projective>,
    pub(crate) Z: Vec<Projective>,
    pub(crate) f: Vec<Vec<Vec<ScalarField>>>,
    pub(crate) zA: ScalarField,
    pub(crate) zC: ScalarField,
    pub(crate) zR: Vec<ScalarField>,
    pub(crate) zS: ScalarField,
}

impl SpendProof {
    /// One linking tag per spent member.
    pub fn linking_tags(&self) -> &[Projective] {
        &self.J
    }

    pub fn spends(&self) -> usize {
        self.J.len()
    }

    /// Whether the two proofs spend a common signing key.
    pub fn linked(&self, other: &SpendProof) -> bool {
        self.J.iter().any(|tag| other.J.contains(tag))
    }

    /// Every group element in the proof, in encoding order.
    pub(crate) fn points(&self) -> impl Iterator<Item = &Projective> {
        self.J
            .iter()
            .chain([&self.A, &self.B, &self.C, &self.D])
            .chain(&self.X)
            .chain(&self.Y)
            .chain(&self.Z)
    }

    /// Checks vector lengths against `params` and the proof's own spend
    /// count.
    pub(crate) fn check_shape(&self, params: &Parameters) -> Result<(), ProofError> {
        let spends = self.spends();
        params.check_spend_count(spends)?;

        let mismatch = |expected: usize, actual: usize| {
            if expected == actual {
                Ok(())
            } else {
                Err(ProofError::SizeMismatch { expected, actual })
            }
        };
        for len in [self.X.len(), self.Y.len(), self.Z.len()] {
            mismatch(params.m(), len)?;
        }
        mismatch(spends, self.f.len())?;
        mismatch(spends, self.zR.len())?;
        for block in &self.f {
            mismatch(params.m(), block.len())?;
            for row in block {
                mismatch(params.n() - 1, row.len())?;
            }
        }
        Ok(())
    }

    /// Ordered concatenation `J A B C D X Y Z f zA zC zR zS`, no padding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for point in self.points() {
            out.extend_from_slice(&point.to_bytes());
        }
        for scalar in self.f.iter().flatten().flatten() {
            out.extend_from_slice(&scalar.to_bytes());
        }
        for scalar in [&self.zA, &self.zC].into_iter().chain(&self.zR) {
            out.extend_from_slice(&scalar.to_bytes());
        }
        out.extend_from_slice(&self.zS.to_bytes());
        out
    }

    /// Decodes a proof with `spends` inputs for `params`.
    ///
    /// The input must be exactly [`Parameters::spend_proof_size`] bytes.
    #[allow(non_snake_case)]
    pub fn from_bytes(
        params: &Parameters,
        spends: usize,
        bytes: &[u8],
    ) -> Result<Self, ProofError> {
        params.check_spend_count(spends)?;
        let expected = params.spend_proof_size(spends);
        if bytes.len() != expected {
            return Err(ProofError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let m = params.m();
        let mut reader = Reader::new(bytes);
        let J = reader.points(spends)?;
        let A = reader.point()?;
        let B = reader.point()?;
        let C = reader.point()?;
        let D = reader.point()?;
        let X = reader.points(m)?;
        let Y = reader.points(m)?;
        let Z = reader.points(m)?;
        let f = (0..spends)
            .map(|_| reader.scalar_matrix(m, params.n() - 1))
            .collect::<Result<_, _>>()?;
        let zA = reader.scalar()?;
        let zC = reader.scalar()?;
        let zR = reader.scalars(spends)?;
        let zS = reader.scalar()?;

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
}
