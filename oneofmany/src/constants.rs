//! Constants used by the one-of-many argument.

/// Size of a serialized scalar in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Size of a serialized curve point in bytes.
///
/// Points use the 32-byte compressed encoding: the y coordinate with the
/// parity of x in the top bit.
pub const POINT_SIZE: usize = 32;

/// Largest supported ring size `n^m`.
pub const MAX_RING_SIZE: usize = 1 << 20;

/// Protocol name the transcript is seeded with.
pub(crate) const PROTOCOL_NAME: &str = "Triptych dual-base one-of-many";

/// Protocol name for multi-input spend proofs.
pub(crate) const SPEND_PROTOCOL_NAME: &str = "Arcturus multi-input one-of-many";

/// Generator label for the Pedersen value base `H`.
pub(crate) const H_LABEL: &str = "H";

/// Generator label for the linking base `U`.
pub(crate) const U_LABEL: &str = "U";

/// Generator label for the matrix commitment bases `Gi[j][i]`, and for the
/// tensor bases `Gi[u][j][i]` of spend proofs.
pub(crate) const MATRIX_LABEL: &str = "Gi";

/// Hash domain for deriving blinders from a hidden-data seed.
pub(crate) const HIDDEN_DOMAIN: &str = "oneofmany hidden data";

pub(crate) const SEED_LABEL_A: &str = "rA";
pub(crate) const SEED_LABEL_B: &str = "rB";
pub(crate) const SEED_LABEL_C: &str = "rC";
pub(crate) const SEED_LABEL_D: &str = "rD";
