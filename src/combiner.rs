//! Secret combiner (v1)
//!
//!   shared_secret = SHA-256(classical_ss || lattice_ss)
//!
//! Classical first, lattice second. Both sides must agree on the order; it
//! is pinned by [`COMBINER_VERSION`](crate::wire::COMBINER_VERSION). The two
//! inputs are streamed into the hash, so no concatenation buffer exists.

use core::fmt;

use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::wire::SHARED_SECRET_SIZE;

/// The 32-byte secret both parties converge on. Wiped on drop; compared in
/// constant time.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }
}

impl From<[u8; SHARED_SECRET_SIZE]> for SharedSecret {
    fn from(bytes: [u8; SHARED_SECRET_SIZE]) -> Self {
        Self(bytes)
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Merge the classical and lattice component secrets.
pub fn combine(classical: &[u8], lattice: &[u8]) -> SharedSecret {
    let mut hasher = Sha256::new();
    hasher.update(classical);
    hasher.update(lattice);

    let mut digest: [u8; SHARED_SECRET_SIZE] = hasher.finalize().into();
    let secret = SharedSecret(digest);
    digest.zeroize();
    secret
}
