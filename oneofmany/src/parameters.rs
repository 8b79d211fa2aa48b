//! Ring shape: decomposition base `n` and digit count `m`.

use crate::constants::{MAX_RING_SIZE, POINT_SIZE, SCALAR_SIZE};
use crate::errors::ProofError;

/// Validated proof parameters for a ring of `n^m` members.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameters {
    n: usize,
    m: usize,
    ring_size: usize,
}

impl Parameters {
    /// Requires `n >= 2`, `m >= 1` and `n^m <= MAX_RING_SIZE`.
    ///
    /// A ring of a single member is rejected.
    pub fn new(n: usize, m: usize) -> Result<Self, ProofError> {
        let invalid = ProofError::InvalidParameters { n, m };
        if n < 2 || m < 1 {
            return Err(invalid);
        }
        let ring_size = u32::try_from(m)
            .ok()
            .and_then(|exp| n.checked_pow(exp))
            .filter(|size| *size <= MAX_RING_SIZE)
            .ok_or(invalid)?;
        Ok(Self { n, m, ring_size })
    }

    /// Decomposition base.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of base-`n` digits.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// `n^m`.
    #[inline]
    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    /// Base-`n` digits of `index`, least significant first.
    ///
    /// Digits beyond `m` are dropped, so callers check `index < ring_size()`.
    pub fn decompose(&self, index: usize) -> Vec<usize> {
        let mut digits = Vec::with_capacity(self.m);
        let mut rest = index;
        for _ in 0..self.m {
            digits.push(rest % self.n);
            rest /= self.n;
        }
        digits
    }

    /// Encoded proof length in bytes.
    pub fn proof_size(&self) -> usize {
        POINT_SIZE * (6 + 2 * self.m) + SCALAR_SIZE * (self.m * (self.n - 1) + 3)
    }

    /// Encoded length of a multi-input spend proof with `spends` inputs.
    pub fn spend_proof_size(&self, spends: usize) -> usize {
        POINT_SIZE * (spends + 4 + 3 * self.m)
            + SCALAR_SIZE * (spends * self.m * (self.n - 1) + spends + 3)
    }

    /// A spend must consume at least one and at most every ring member.
    pub(crate) fn check_spend_count(&self, spends: usize) -> Result<(), ProofError> {
        if spends == 0 || spends > self.ring_size {
            return Err(ProofError::InvalidSpendCount {
                spends,
                ring_size: self.ring_size,
            });
        }
        Ok(())
    }

    pub(crate) fn check_ring_len(&self, len: usize) -> Result<(), ProofError> {
        if len != self.ring_size {
            return Err(ProofError::SizeMismatch {
                expected: self.ring_size,
                actual: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        let params = Parameters::new(2, 3).expect("valid");
        assert_eq!(params.ring_size(), 8);
        let params = Parameters::new(4, 2).expect("valid");
        assert_eq!(params.ring_size(), 16);
        assert_eq!(params.n(), 4);
        assert_eq!(params.m(), 2);
    }

    #[test]
    fn test_invalid_parameters() {
        for (n, m) in [(1, 3), (0, 2), (2, 0), (2, 21), (usize::MAX, 2)] {
            assert_eq!(
                Parameters::new(n, m),
                Err(ProofError::InvalidParameters { n, m })
            );
        }
    }

    #[test]
    fn test_decompose() {
        let params = Parameters::new(3, 3).expect("valid");
        assert_eq!(params.decompose(0), vec![0, 0, 0]);
        assert_eq!(params.decompose(5), vec![2, 1, 0]);
        assert_eq!(params.decompose(26), vec![2, 2, 2]);
    }

    #[test]
    fn test_proof_size() {
        let params = Parameters::new(2, 2).expect("valid");
        // J K A B C D, two X, two Y, two f, zA zC z
        assert_eq!(params.proof_size(), 32 * 10 + 32 * 5);
    }

    #[test]
    fn test_spend_proof_size() {
        let params = Parameters::new(2, 2).expect("valid");
        // two J, A B C D, two each of X Y Z; two spends of two f, zA zC, two zR, zS
        assert_eq!(params.spend_proof_size(2), 32 * 12 + 32 * 9);
    }

    #[test]
    fn test_spend_count_check() {
        let params = Parameters::new(2, 1).expect("valid");
        assert!(params.check_spend_count(1).is_ok());
        assert!(params.check_spend_count(2).is_ok());
        for spends in [0, 3] {
            assert_eq!(
                params.check_spend_count(spends),
                Err(ProofError::InvalidSpendCount {
                    spends,
                    ring_size: 2
                })
            );
        }
    }

    #[test]
    fn test_ring_len_check() {
        let params = Parameters::new(2, 2).expect("valid");
        assert!(params.check_ring_len(4).is_ok());
        assert_eq!(
            params.check_ring_len(3),
            Err(ProofError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
