//! Four-limb multi-precision helpers shared by both Montgomery-form fields.
//!
//! Limbs are little-endian `u64`s. Every `*_mod` helper expects its inputs to
//! be reduced below the supplied modulus, and the modulus must be below 2^255.

use num_bigint::BigUint;

pub(crate) type Limbs = [u64; 4];

/// Carrying addition.
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Borrowing subtraction.
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// `a < b` as 256-bit integers.
#[inline]
pub(crate) const fn lt(a: Limbs, b: Limbs) -> bool {
    let (_, borrow) = a[0].overflowing_sub(b[0]);
    let (_, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (_, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (_, borrow) = borrowing_sub(a[3], b[3], borrow);
    borrow
}

#[inline]
pub(crate) const fn is_zero(a: Limbs) -> bool {
    a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0
}

/// `(a + b) mod modulus`.
#[inline]
pub(crate) const fn add_mod(a: Limbs, b: Limbs, modulus: Limbs) -> Limbs {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);

    let (s0, borrow) = r0.overflowing_sub(modulus[0]);
    let (s1, borrow) = borrowing_sub(r1, modulus[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, modulus[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, modulus[3], borrow);

    if carry || !borrow {
        [s0, s1, s2, s3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// `(a - b) mod modulus`.
#[inline]
pub(crate) const fn sub_mod(a: Limbs, b: Limbs, modulus: Limbs) -> Limbs {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(modulus[0]);
        let (r1, carry) = carrying_add(r1, modulus[1], carry);
        let (r2, carry) = carrying_add(r2, modulus[2], carry);
        let (r3, _) = carrying_add(r3, modulus[3], carry);
        [r0, r1, r2, r3]
    } else {
        [r0, r1, r2, r3]
    }
}

#[inline]
pub(crate) const fn neg_mod(a: Limbs, modulus: Limbs) -> Limbs {
    if is_zero(a) {
        return [0, 0, 0, 0];
    }
    sub_mod(modulus, a, modulus)
}

/// Montgomery multiplication: `a * b * 2^-256 mod modulus`.
///
/// `mu` is `-modulus^-1 mod 2^64`. The result is fully reduced as long as
/// `a * b < 2^256 * modulus`, which lets callers reduce arbitrary 256-bit
/// values by multiplying with `R^2`.
#[inline]
pub(crate) fn montgomery_mul(a: Limbs, b: Limbs, modulus: Limbs, mu: u64) -> Limbs {
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in 0..4 {
        let k = t[i].wrapping_mul(mu);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (modulus[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in 4..8 - i {
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    let result = [t[4], t[5], t[6], t[7]];
    if lt(result, modulus) {
        result
    } else {
        sub_mod(result, modulus, modulus)
    }
}

pub(crate) fn limbs_from_le_bytes(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    limbs
}

pub(crate) fn limbs_to_le_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

pub(crate) fn limbs_to_biguint(limbs: &Limbs) -> BigUint {
    BigUint::from_bytes_le(&limbs_to_le_bytes(limbs))
}

/// Reduces `value` modulo `modulus` and returns the canonical limbs.
pub(crate) fn biguint_to_limbs(value: &BigUint, modulus: &Limbs) -> Limbs {
    let reduced = value % limbs_to_biguint(modulus);
    let mut bytes = [0u8; 32];
    let le = reduced.to_bytes_le();
    bytes[..le.len()].copy_from_slice(&le);
    limbs_from_le_bytes(&bytes)
}

/// Number of significant bits in `limbs`.
#[inline]
pub(crate) fn bit_length(limbs: &Limbs) -> usize {
    for (i, limb) in limbs.iter().enumerate().rev() {
        if *limb != 0 {
            return i * 64 + (64 - limb.leading_zeros() as usize);
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: Limbs = [97, 0, 0, 0];

    #[test]
    fn test_add_sub_wrap() {
        let a = [90, 0, 0, 0];
        let b = [10, 0, 0, 0];
        assert_eq!(add_mod(a, b, SMALL), [3, 0, 0, 0]);
        assert_eq!(sub_mod(b, a, SMALL), [17, 0, 0, 0]);
        assert_eq!(neg_mod([0, 0, 0, 0], SMALL), [0, 0, 0, 0]);
        assert_eq!(neg_mod(b, SMALL), [87, 0, 0, 0]);
    }

    #[test]
    fn test_lt_across_limbs() {
        assert!(lt([u64::MAX, 0, 0, 0], [0, 1, 0, 0]));
        assert!(!lt([0, 0, 0, 1], [u64::MAX, u64::MAX, u64::MAX, 0]));
        assert!(!lt([5, 0, 0, 0], [5, 0, 0, 0]));
    }

    #[test]
    fn test_byte_round_trip() {
        let limbs = [0x0102030405060708, 0x1112131415161718, 0, 0xff00000000000001];
        let bytes = limbs_to_le_bytes(&limbs);
        assert_eq!(bytes[0], 0x08);
        assert_eq!(bytes[31], 0xff);
        assert_eq!(limbs_from_le_bytes(&bytes), limbs);
        assert_eq!(biguint_to_limbs(&limbs_to_biguint(&limbs), &[0, 0, 0, u64::MAX]), limbs);
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(&[0, 0, 0, 0]), 0);
        assert_eq!(bit_length(&[1, 0, 0, 0]), 1);
        assert_eq!(bit_length(&[0, 0, 1, 0]), 129);
        assert_eq!(bit_length(&[0, 0, 0, 1 << 60]), 253);
    }
}
