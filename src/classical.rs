//! Classical Diffie-Hellman capability.
//!
//! The hybrid protocol only needs two operations over fixed 32-byte keys:
//! base-point multiplication and shared-point multiplication. Private
//! scalars are taken as raw bytes; the implementation clamps as its curve
//! requires.

use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::wire::X25519_KEY_SIZE;

/// A Diffie-Hellman group with 32-byte keys and 32-byte shared outputs.
pub trait ClassicalDh {
    /// Human-readable name for logs and diagnostics.
    const NAME: &'static str;

    /// Derive the public key for `private` (base-point multiplication).
    fn public_from_private(private: &[u8; X25519_KEY_SIZE]) -> [u8; X25519_KEY_SIZE];

    /// Shared-point multiplication of `private` with a peer's `public`.
    fn diffie_hellman(
        private: &[u8; X25519_KEY_SIZE],
        public: &[u8; X25519_KEY_SIZE],
    ) -> Zeroizing<[u8; X25519_KEY_SIZE]>;
}

/// X25519 (RFC 7748) via `x25519-dalek`.
#[derive(Debug, Clone, Copy, Default)]
pub struct X25519;

impl ClassicalDh for X25519 {
    const NAME: &'static str = "X25519";

    fn public_from_private(private: &[u8; X25519_KEY_SIZE]) -> [u8; X25519_KEY_SIZE] {
        // StaticSecret zeroizes its copy on drop
        let secret = StaticSecret::from(*private);
        PublicKey::from(&secret).to_bytes()
    }

    fn diffie_hellman(
        private: &[u8; X25519_KEY_SIZE],
        public: &[u8; X25519_KEY_SIZE],
    ) -> Zeroizing<[u8; X25519_KEY_SIZE]> {
        let secret = StaticSecret::from(*private);
        let shared = secret.diffie_hellman(&PublicKey::from(*public));
        Zeroizing::new(shared.to_bytes())
    }
}
