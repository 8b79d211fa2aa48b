//! Prime-order group arithmetic over the ed25519 curve.
//!
//! This crate provides the scalar and base fields, affine and extended
//! (projective) curve points, vectors over both, domain-separated hashing
//! to scalars and points, a labeled generator table, a Pippenger
//! multiexponentiation engine and a Fiat-Shamir transcript.
//!
//! Points encode to the standard 32-byte compressed form and scalars to
//! 32 bytes little-endian.

mod affine;
mod arithmetic;
mod basefield;
mod errors;
mod generator_table;
mod group;
mod hash;
mod msm;
mod projective;
mod random;
mod scalarfield;
mod transcript;
mod vector;

pub use affine::Affine;
pub use basefield::BaseField;
pub use errors::CurveError;
pub use generator_table::{generator, GeneratorTable};
pub use group::{Group, ScalarBits};
pub use hash::{hash_to_point, hash_to_scalar, HashInput};
pub use msm::{multiexp, multiexp_with_window, MAX_WINDOW, PARALLEL_THRESHOLD};
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::ScalarField;
pub use transcript::Transcript;
pub use vector::{PointVector, ScalarVector};
