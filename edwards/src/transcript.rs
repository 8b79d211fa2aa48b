//! Fiat-Shamir transcript.
//!
//! The state is a single scalar. Updates fold a value into it by hashing;
//! drawing a challenge returns the state and then re-hashes it, so two
//! consecutive challenges never coincide.

use crate::errors::CurveError;
use crate::hash::{hash_parts_to_scalar, HashInput};
use crate::ScalarField;

const TRANSCRIPT_DOMAIN: &str = "transcript";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    state: ScalarField,
}

impl Transcript {
    /// Starts a transcript bound to `protocol`.
    pub fn new(protocol: &str) -> Self {
        Self {
            state: hash_parts_to_scalar(TRANSCRIPT_DOMAIN, &[protocol.as_bytes().to_vec()]),
        }
    }

    /// Folds `value` into the state.
    ///
    /// On error the state is left untouched.
    pub fn update<T: HashInput + ?Sized>(&mut self, value: &T) -> Result<(), CurveError> {
        let mut bytes = Vec::new();
        value.write_hash_input(&mut bytes)?;
        self.state =
            hash_parts_to_scalar(TRANSCRIPT_DOMAIN, &[self.state.to_bytes().to_vec(), bytes]);
        Ok(())
    }

    pub fn challenge(&mut self) -> ScalarField {
        let challenge = self.state;
        self.state = hash_parts_to_scalar(TRANSCRIPT_DOMAIN, &[self.state.to_bytes().to_vec()]);
        challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_to_scalar;
    use crate::Projective;

    #[test]
    fn test_same_inputs_same_challenges() {
        let mut a = Transcript::new("proto");
        let mut b = Transcript::new("proto");
        for t in [&mut a, &mut b] {
            t.update(&Projective::generator()).expect("update");
            t.update(&[1u64, 2, 3]).expect("update");
        }
        assert_eq!(a.challenge(), b.challenge());
        assert_eq!(a.challenge(), b.challenge());
    }

    #[test]
    fn test_extra_update_changes_challenge() {
        let mut a = Transcript::new("proto");
        let mut b = Transcript::new("proto");
        a.update(&1u64).expect("update");
        b.update(&1u64).expect("update");
        b.update(&2u64).expect("update");
        assert_ne!(a.challenge(), b.challenge());
    }

    #[test]
    fn test_protocol_name_separates() {
        assert_ne!(Transcript::new("a").challenge(), Transcript::new("b").challenge());
    }

    #[test]
    fn test_consecutive_challenges_differ() {
        let mut t = Transcript::new("proto");
        let first = t.challenge();
        let second = t.challenge();
        assert_ne!(first, second);
    }

    #[test]
    fn test_matches_hash_to_scalar() {
        let mut t = Transcript::new("proto");
        let start = hash_to_scalar(TRANSCRIPT_DOMAIN, &[&"proto"]).expect("hash");
        t.update(&ScalarField::ONE).expect("update");
        let expected = hash_to_scalar(TRANSCRIPT_DOMAIN, &[&start, &ScalarField::ONE]).expect("hash");
        assert_eq!(t.challenge(), expected);
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let mut t = Transcript::new("proto");
        let before = t.clone();
        let absent: Option<u64> = None;
        assert_eq!(t.update(&absent), Err(CurveError::MissingHashInput));
        assert_eq!(t, before);
    }
}
