//! Precomputed basepoint multiples and the labeled generator cache.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::trace;

use crate::group::ScalarBits;
use crate::hash::hash_parts_to_point;
use crate::{Group, Projective, ScalarField};

const WINDOW_BITS: usize = 4;
const WINDOW_SIZE: usize = 1 << WINDOW_BITS;
const WINDOWS: usize = 256 / WINDOW_BITS;

type BasepointTable = Vec<[Projective; WINDOW_SIZE]>;

static BASEPOINT_TABLE: OnceLock<BasepointTable> = OnceLock::new();

/// Row `i` holds `k * 16^i * G` for `k` in `0..16`.
fn basepoint_table() -> &'static BasepointTable {
    BASEPOINT_TABLE.get_or_init(|| {
        let mut rows = Vec::with_capacity(WINDOWS);
        let mut base = Projective::generator();
        for _ in 0..WINDOWS {
            let mut row = [Projective::IDENTITY; WINDOW_SIZE];
            for k in 1..WINDOW_SIZE {
                row[k] = row[k - 1] + base;
            }
            base = row[WINDOW_SIZE - 1] + base;
            rows.push(row);
        }
        rows
    })
}

/// Fixed-base scalar multiplication, one table lookup per 4-bit window.
pub(crate) fn mul_generator_projective(scalar: &ScalarField) -> Projective {
    let table = basepoint_table();
    let limbs = scalar.to_u64_limbs();
    let mut result = Projective::IDENTITY;

    for (i, row) in table.iter().enumerate() {
        let bit = i * WINDOW_BITS;
        let nibble = ((limbs[bit / 64] >> (bit % 64)) & 0xF) as usize;
        if nibble != 0 {
            result += row[nibble];
        }
    }

    result
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GeneratorLabel {
    name: String,
    indices: Vec<u64>,
}

/// Append-only cache of independent generators, each derived as
/// `hash_to_point(name, indices...)` so nobody knows its discrete log.
///
/// Concurrent first lookups of the same label may both compute it; the first
/// insert wins and later ones are dropped, which is harmless because the
/// derivation is deterministic.
#[derive(Debug, Default)]
pub struct GeneratorTable {
    entries: RwLock<HashMap<GeneratorLabel, Projective>>,
}

static GLOBAL_TABLE: OnceLock<GeneratorTable> = OnceLock::new();

impl GeneratorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide table, created on first use.
    pub fn global() -> &'static GeneratorTable {
        GLOBAL_TABLE.get_or_init(GeneratorTable::new)
    }

    /// Generator for `name` and `indices`, computing it on first request.
    pub fn get(&self, name: &str, indices: &[u64]) -> Projective {
        let label = GeneratorLabel {
            name: name.to_string(),
            indices: indices.to_vec(),
        };

        if let Some(point) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&label)
        {
            return *point;
        }

        let parts: Vec<Vec<u8>> = indices.iter().map(|i| i.to_le_bytes().to_vec()).collect();
        let point = hash_parts_to_point(name, &parts);
        trace!(name, ?indices, "populated generator");

        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(label)
            .or_insert(point)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shorthand for [`GeneratorTable::global`] lookups.
pub fn generator(name: &str, indices: &[u64]) -> Projective {
    GeneratorTable::global().get(name, indices)
}
