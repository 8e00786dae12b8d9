//! Wire format constants (protocol v1)
//!
//! All artifacts are plain fixed-length concatenations:
//!
//!   PublicKey      = x25519_pk[32] || mlkem_ek[1184]            (1216 bytes)
//!   KeyPair        = x25519_sk[32] || mlkem_dk[2400]            (2432 bytes)
//!   Ciphertext     = x25519_ephemeral_pk[32] || mlkem_ct[1088]  (1120 bytes)
//!   SharedSecret   = SHA-256(x25519_dh[32] || mlkem_ss[32])     (32 bytes)
//!   Payload        = nonce[24] || xchacha20poly1305(pt)[len+16]
//!
//! Changing any value here breaks wire compatibility. Bump
//! [`COMBINER_VERSION`] / [`SUITE_ID`] together with the change.

/// Stable name of the default suite.
pub const SUITE_ID: &str = "X25519-MLKEM768-SHA256/XChaCha20Poly1305";

/// Secret combiner revision.
///
/// v1: `SHA-256(classical_shared || lattice_shared)`, classical first, no
/// label, no length prefixes.
pub const COMBINER_VERSION: u8 = 0x01;

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

/// X25519 public/private key and DH output size
pub const X25519_KEY_SIZE: usize = 32;

/// ML-KEM-768 component sizes (FIPS 203)
pub const MLKEM768_PUBLIC_KEY_SIZE: usize = 1184;
pub const MLKEM768_PRIVATE_KEY_SIZE: usize = 2400;
pub const MLKEM768_CIPHERTEXT_SIZE: usize = 1088;
pub const MLKEM768_SHARED_SECRET_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Hybrid aggregate sizes
// ---------------------------------------------------------------------------

pub const HYBRID_PUBLIC_KEY_SIZE: usize = X25519_KEY_SIZE + MLKEM768_PUBLIC_KEY_SIZE; // 1216

pub const HYBRID_SECRET_KEY_SIZE: usize = X25519_KEY_SIZE + MLKEM768_PRIVATE_KEY_SIZE; // 2432

pub const HYBRID_CIPHERTEXT_SIZE: usize = X25519_KEY_SIZE + MLKEM768_CIPHERTEXT_SIZE; // 1120

/// Combiner output (SHA-256 digest)
pub const SHARED_SECRET_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Payload AEAD (XChaCha20-Poly1305)
// ---------------------------------------------------------------------------

pub const NONCE_SIZE: usize = 24;
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed payload ciphertext (empty plaintext).
pub const MIN_PAYLOAD_SIZE: usize = NONCE_SIZE + TAG_SIZE; // 40

/// Size of a sealed payload for a plaintext of `plaintext_len` bytes.
pub const fn payload_size(plaintext_len: usize) -> usize {
    MIN_PAYLOAD_SIZE + plaintext_len
}
