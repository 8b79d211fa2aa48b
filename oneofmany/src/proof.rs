//! Proof structure, its canonical byte encoding, and hidden-data types.

use edwards::{HashInput, Projective, ScalarField, hash_to_scalar};
use serde::{Deserialize, Serialize};

use crate::constants::{
    HIDDEN_DOMAIN, POINT_SIZE, SCALAR_SIZE, SEED_LABEL_A, SEED_LABEL_B, SEED_LABEL_C,
    SEED_LABEL_D,
};
use crate::errors::ProofError;
use crate::parameters::Parameters;

/// A one-of-many commitment-to-zero proof.
///
/// Every field is public. `f` holds the revealed coefficients `f[j][1..n]`;
/// the `i = 0` column is implied by the challenge and never transmitted.
#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub(crate) J: Projective,
    pub(crate) K: Projective,
    pub(crate) A: Projective,
    pub(crate) B: Projective,
    pub(crate) C: Projective,
    pub(crate) D: Projective,
    pub(crate) X: Vec<Projective>,
    pub(crate) Y: Vec<Projective>,
    pub(crate) f: Vec<Vec<ScalarField>>,
    pub(crate) zA: ScalarField,
    pub(crate) zC: ScalarField,
    pub(crate) z: ScalarField,
}

impl Proof {
    /// Linking tag `J`. Two valid proofs with the same tag used the same
    /// signing key.
    pub fn linking_tag(&self) -> Projective {
        self.J
    }

    /// Commitment-blinder tag `K = s * J`.
    pub fn commitment_tag(&self) -> Projective {
        self.K
    }

    /// Whether `self` and `other` were produced with the same signing key.
    pub fn linked(&self, other: &Proof) -> bool {
        self.J == other.J
    }

    /// Every group element in the proof, in encoding order.
    pub(crate) fn points(&self) -> impl Iterator<Item = &Projective> {
        [&self.J, &self.K, &self.A, &self.B, &self.C, &self.D]
            .into_iter()
            .chain(&self.X)
            .chain(&self.Y)
    }

    /// Checks vector lengths against `params`.
    pub(crate) fn check_shape(&self, params: &Parameters) -> Result<(), ProofError> {
        let m = params.m();
        for len in [self.X.len(), self.Y.len(), self.f.len()] {
            if len != m {
                return Err(ProofError::SizeMismatch {
                    expected: m,
                    actual: len,
                });
            }
        }
        for row in &self.f {
            if row.len() != params.n() - 1 {
                return Err(ProofError::SizeMismatch {
                    expected: params.n() - 1,
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Ordered concatenation `J K A B C D X Y f zA zC z`, no padding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let points = 6 + self.X.len() + self.Y.len();
        let scalars = 3 + self.f.iter().map(Vec::len).sum::<usize>();
        let mut out = Vec::with_capacity(points * POINT_SIZE + scalars * SCALAR_SIZE);

        for point in self.points() {
            out.extend_from_slice(&point.to_bytes());
        }
        for scalar in self.f.iter().flatten() {
            out.extend_from_slice(&scalar.to_bytes());
        }
        for scalar in [&self.zA, &self.zC, &self.z] {
            out.extend_from_slice(&scalar.to_bytes());
        }
        out
    }

    /// Decodes a proof for `params`.
    ///
    /// The input must be exactly [`Parameters::proof_size`] bytes and every
    /// element must be canonically encoded.
    #[allow(non_snake_case)]
    pub fn from_bytes(params: &Parameters, bytes: &[u8]) -> Result<Self, ProofError> {
        if bytes.len() != params.proof_size() {
            return Err(ProofError::SizeMismatch {
                expected: params.proof_size(),
                actual: bytes.len(),
            });
        }

        let m = params.m();
        let mut reader = Reader::new(bytes);
        let J = reader.point()?;
        let K = reader.point()?;
        let A = reader.point()?;
        let B = reader.point()?;
        let C = reader.point()?;
        let D = reader.point()?;
        let X = reader.points(m)?;
        let Y = reader.points(m)?;
        let f = reader.scalar_matrix(m, params.n() - 1)?;
        let zA = reader.scalar()?;
        let zC = reader.scalar()?;
        let z = reader.scalar()?;

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
}

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// The caller checks the total length up front.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self) -> [u8; 32] {
        let mut chunk = [0u8; 32];
        chunk.copy_from_slice(&self.bytes[self.offset..self.offset + 32]);
        self.offset += 32;
        chunk
    }

    pub(crate) fn point(&mut self) -> Result<Projective, ProofError> {
        Ok(Projective::from_bytes(&self.take())?)
    }

    pub(crate) fn points(&mut self, count: usize) -> Result<Vec<Projective>, ProofError> {
        (0..count).map(|_| self.point()).collect()
    }

    pub(crate) fn scalar(&mut self) -> Result<ScalarField, ProofError> {
        Ok(ScalarField::from_bytes(&self.take())?)
    }

    pub(crate) fn scalars(&mut self, count: usize) -> Result<Vec<ScalarField>, ProofError> {
        (0..count).map(|_| self.scalar()).collect()
    }

    pub(crate) fn scalar_matrix(
        &mut self,
        rows: usize,
        columns: usize,
    ) -> Result<Vec<Vec<ScalarField>>, ProofError> {
        (0..rows).map(|_| self.scalars(columns)).collect()
    }
}

/// Two scalars carried inside a proof for holders of its seed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxData {
    pub first: ScalarField,
    pub second: ScalarField,
}

/// The `A`..`D` blinders a seed derives for a statement, before the payload
/// is added to the first and last.
pub(crate) fn hidden_blinders(
    seed: &ScalarField,
    statement: &[&dyn HashInput],
) -> Result<[ScalarField; 4], ProofError> {
    let derive = |label: &str| {
        let mut items: Vec<&dyn HashInput> = Vec::with_capacity(statement.len() + 2);
        items.push(seed);
        items.extend_from_slice(statement);
        items.push(&label);
        hash_to_scalar(HIDDEN_DOMAIN, &items)
    };
    Ok([
        derive(SEED_LABEL_A)?,
        derive(SEED_LABEL_B)?,
        derive(SEED_LABEL_C)?,
        derive(SEED_LABEL_D)?,
    ])
}

/// Strips the seed-derived blinders from the closing scalars `zA` and `zC`.
pub(crate) fn recover_aux(
    blinders: [ScalarField; 4],
    x: ScalarField,
    z_a: ScalarField,
    z_c: ScalarField,
) -> AuxData {
    let [r_a, r_b, r_c, r_d] = blinders;
    AuxData {
        first: z_a - (r_b * x + r_a),
        second: z_c - (r_c * x + r_d),
    }
}

/// Seed and payload for embedding [`AuxData`] in a proof.
///
/// With a seed, the `A` and `D` blinders are derived from it and offset by
/// the payload; a verifier holding the same seed can strip the derived part
/// from `zA` and `zC` to read the payload back. Everyone else sees blinders
/// that look uniformly random.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HiddenData {
    pub seed: ScalarField,
    pub aux: AuxData,
}

impl HiddenData {
    pub fn new(seed: ScalarField, aux: AuxData) -> Self {
        Self { seed, aux }
    }

    /// A seed with an all-zero payload.
    pub fn seed_only(seed: ScalarField) -> Self {
        Self {
            seed,
            aux: AuxData::default(),
        }
    }
}
