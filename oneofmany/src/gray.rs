//! Reflected base-`n` Gray code over `m` digits.
//!
//! Consecutive codewords differ in exactly one digit, by exactly one step,
//! which lets per-index products be updated with one multiplication and one
//! division instead of being rebuilt.

/// The digit change between two consecutive codewords.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DigitChange {
    pub position: usize,
    pub old: usize,
    pub new: usize,
}

/// Iterator over the `n^m - 1` changes that walk every codeword, starting
/// from all zeros.
#[derive(Clone, Debug)]
pub struct GrayCode {
    n: usize,
    digits: Vec<usize>,
    // true while a digit is counting up
    directions: Vec<bool>,
    remaining: usize,
}

impl GrayCode {
    pub fn new(n: usize, m: usize) -> Self {
        let total = u32::try_from(m)
            .ok()
            .and_then(|exp| n.checked_pow(exp))
            .unwrap_or(0);
        Self {
            n,
            // one spare digit keeps the carry search in bounds
            digits: vec![0; m + 1],
            directions: vec![true; m + 1],
            remaining: total.saturating_sub(1),
        }
    }

    /// The current codeword, least significant digit first.
    pub fn digits(&self) -> &[usize] {
        &self.digits[..self.digits.len() - 1]
    }
}

impl Iterator for GrayCode {
    type Item = DigitChange;

    fn next(&mut self) -> Option<DigitChange> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut position = 0;
        loop {
            let digit = self.digits[position];
            if self.directions[position] && digit + 1 < self.n {
                break;
            }
            if !self.directions[position] && digit > 0 {
                break;
            }
            self.directions[position] = !self.directions[position];
            position += 1;
        }

        let old = self.digits[position];
        let new = if self.directions[position] { old + 1 } else { old - 1 };
        self.digits[position] = new;
        Some(DigitChange { position, old, new })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GrayCode {}
