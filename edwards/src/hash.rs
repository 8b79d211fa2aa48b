//! Domain-separated hashing to scalars and points.
//!
//! Every input is serialized to bytes and digested on its own with SHA-256.
//! The domain digest and the item digests are then concatenated and hashed
//! once more to seed a rejection loop that re-hashes until the digest
//! decodes to an acceptable value.

use sha2::{Digest, Sha256};

use crate::errors::CurveError;
use crate::{Affine, Projective, ScalarField};

/// Values that can be fed into [`hash_to_scalar`] and [`hash_to_point`].
pub trait HashInput {
    /// Appends the canonical byte form of `self` to `out`.
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError>;
}

impl HashInput for ScalarField {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        out.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

impl HashInput for Affine {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        out.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

impl HashInput for Projective {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        out.extend_from_slice(&self.to_bytes());
        Ok(())
    }
}

impl HashInput for str {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl HashInput for String {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.as_str().write_hash_input(out)
    }
}

impl HashInput for u64 {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        out.extend_from_slice(&self.to_le_bytes());
        Ok(())
    }
}

impl HashInput for usize {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        (*self as u64).write_hash_input(out)
    }
}

impl<T: HashInput> HashInput for Option<T> {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        match self {
            Some(value) => value.write_hash_input(out),
            None => Err(CurveError::MissingHashInput),
        }
    }
}

// Sequences carry their length so that adjacent items cannot be regrouped.
impl<T: HashInput> HashInput for [T] {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.len().write_hash_input(out)?;
        for item in self {
            item.write_hash_input(out)?;
        }
        Ok(())
    }
}

impl<T: HashInput> HashInput for Vec<T> {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.as_slice().write_hash_input(out)
    }
}

impl<T: HashInput, const N: usize> HashInput for [T; N] {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        self.as_slice().write_hash_input(out)
    }
}

impl<T: HashInput + ?Sized> HashInput for &T {
    fn write_hash_input(&self, out: &mut Vec<u8>) -> Result<(), CurveError> {
        (**self).write_hash_input(out)
    }
}

fn serialize_items(items: &[&dyn HashInput]) -> Result<Vec<Vec<u8>>, CurveError> {
    items
        .iter()
        .map(|item| {
            let mut bytes = Vec::new();
            item.write_hash_input(&mut bytes)?;
            Ok(bytes)
        })
        .collect()
}

fn seed_digest(domain: &str, parts: &[Vec<u8>]) -> [u8; 32] {
    let mut buffer = Vec::with_capacity(32 * (parts.len() + 1));
    buffer.extend_from_slice(&Sha256::digest(domain.as_bytes()));
    for part in parts {
        buffer.extend_from_slice(&Sha256::digest(part));
    }
    Sha256::digest(&buffer).into()
}

pub(crate) fn hash_parts_to_scalar(domain: &str, parts: &[Vec<u8>]) -> ScalarField {
    let mut digest = seed_digest(domain, parts);
    loop {
        if let Ok(scalar) = ScalarField::from_bytes(&digest) {
            return scalar;
        }
        digest = Sha256::digest(digest).into();
    }
}

pub(crate) fn hash_parts_to_point(domain: &str, parts: &[Vec<u8>]) -> Projective {
    let mut digest = seed_digest(domain, parts);
    loop {
        if let Ok(point) = Affine::from_bytes(&digest) {
            let point = Projective::from(point).mul_by_cofactor();
            if !point.is_identity() {
                return point;
            }
        }
        digest = Sha256::digest(digest).into();
    }
}

/// Hashes `items` under `domain` to a uniformly distributed scalar.
///
/// Fails with [`CurveError::MissingHashInput`] if any item holds an absent
/// value.
pub fn hash_to_scalar(domain: &str, items: &[&dyn HashInput]) -> Result<ScalarField, CurveError> {
    let parts = serialize_items(items)?;
    Ok(hash_parts_to_scalar(domain, &parts))
}

/// Hashes `items` under `domain` to a point in the prime-order subgroup
/// whose discrete log is unknown.
pub fn hash_to_point(domain: &str, items: &[&dyn HashInput]) -> Result<Projective, CurveError> {
    let parts = serialize_items(items)?;
    Ok(hash_parts_to_point(domain, &parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    #[test]
    fn test_scalar_deterministic() {
        let a = hash_to_scalar("test", &[&1u64, &"x"]).expect("hash");
        let b = hash_to_scalar("test", &[&1u64, &"x"]).expect("hash");
        assert_eq!(a, b);
    }

    #[test]
    fn test_domain_separation() {
        let a = hash_to_scalar("one", &[&7u64]).expect("hash");
        let b = hash_to_scalar("two", &[&7u64]).expect("hash");
        assert_ne!(a, b);
        assert_ne!(
            hash_to_point("one", &[]).expect("hash"),
            hash_to_point("two", &[]).expect("hash")
        );
    }

    #[test]
    fn test_item_boundaries_matter() {
        let a = hash_to_scalar("d", &[&"ab", &"c"]).expect("hash");
        let b = hash_to_scalar("d", &[&"a", &"bc"]).expect("hash");
        assert_ne!(a, b);

        let nested = hash_to_scalar("d", &[&vec![1u64, 2]]).expect("hash");
        let flat = hash_to_scalar("d", &[&1u64, &2u64]).expect("hash");
        assert_ne!(nested, flat);
    }

    #[test]
    fn test_point_in_prime_subgroup() {
        let p = hash_to_point("H", &[]).expect("hash");
        assert!(!p.is_identity());
        // l * P = (l - 1) * P + P
        assert!((p * (-ScalarField::ONE) + p).is_identity());
    }

    #[test]
    fn test_representations_hash_alike() {
        let g = Projective::generator();
        let a = hash_to_scalar("d", &[&g]).expect("hash");
        let b = hash_to_scalar("d", &[&g.to_affine()]).expect("hash");
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_input_fails() {
        let absent: Option<ScalarField> = None;
        assert_eq!(
            hash_to_scalar("d", &[&absent]),
            Err(CurveError::MissingHashInput)
        );
        assert_eq!(
            hash_to_point("d", &[&vec![Some(1u64), None]]),
            Err(CurveError::MissingHashInput)
        );
        assert!(hash_to_scalar("d", &[&Some(ScalarField::ONE)]).is_ok());
    }
}
