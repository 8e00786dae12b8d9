//! # hybrid-pqc
//!
//! Hybrid post-quantum key encapsulation: X25519 + ML-KEM-768, combined with
//! SHA-256, plus an XChaCha20-Poly1305 payload cipher keyed by the result.
//!
//! ## Quick Start
//!
//! ```rust
//! use hybrid_pqc::{decrypt_payload, encrypt_payload, generate_keypair};
//!
//! // Recipient
//! let keypair = generate_keypair().unwrap();
//! let public = keypair.public_key();
//!
//! // Sender
//! let (ciphertext, secret) = public.encapsulate().unwrap();
//! let payload = encrypt_payload(&secret, b"secret").unwrap();
//!
//! // Recipient
//! let secret = keypair.decapsulate(ciphertext.as_bytes()).unwrap();
//! let plaintext = decrypt_payload(&secret, &payload).unwrap();
//!
//! assert_eq!(plaintext, b"secret");
//! ```
//!
//! ## Security Properties
//!
//! - **Hybrid KEM**: the shared secret stays confidential while either
//!   X25519 or ML-KEM-768 holds
//! - **Uniform payload errors**: every decryption failure is the same
//!   [`Error::DecryptionFailed`]
//! - **Stable wire format**: fixed-length concatenations, see [`wire`]
//! - **Zeroization**: private keys and shared secrets are wiped on drop
//!
//! ## What's NOT Provided
//!
//! - Key management or storage
//! - Sender authentication
//! - Associated data on payloads
//! - Streaming encryption

#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/hybrid-pqc/0.1.0")]

mod aead;
mod classical;
mod combiner;
mod entropy;
mod error;
mod kem;
mod lattice;

pub mod wire;

pub use aead::{decrypt_payload, encrypt_payload};
pub use classical::{ClassicalDh, X25519};
pub use combiner::{combine, SharedSecret};
pub use error::{Error, Result};
pub use kem::{HybridCiphertext, HybridKem, HybridKeyPair, HybridPublicKey};
pub use lattice::{LatticeKem, MlKem768, MlKem768PrivateKey};

/// The default suite: X25519 + ML-KEM-768.
pub type X25519MlKem768 = HybridKem<X25519, MlKem768>;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate a key pair for the default suite.
pub fn generate_keypair() -> Result<HybridKeyPair> {
    X25519MlKem768::new().generate_keypair()
}

/// Encapsulate to `recipient` under the default suite.
pub fn encapsulate(recipient: &HybridPublicKey) -> Result<(HybridCiphertext, SharedSecret)> {
    X25519MlKem768::new().encapsulate(recipient)
}

/// Decapsulate `ciphertext` with `keypair` under the default suite.
pub fn decapsulate(keypair: &HybridKeyPair, ciphertext: &[u8]) -> Result<SharedSecret> {
    keypair.decapsulate(ciphertext)
}

/// Parse a marshalled public key.
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<HybridPublicKey> {
    HybridPublicKey::from_bytes(bytes)
}

/// Restore a persisted key pair.
pub fn unmarshal_keypair(bytes: &[u8]) -> Result<HybridKeyPair> {
    HybridKeyPair::from_bytes(bytes)
}
