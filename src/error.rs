//! Error taxonomy for the hybrid KEM and payload cipher.
//!
//! Structural checks (sizes) fail before any cryptographic work. Payload
//! decryption collapses every cause into [`Error::DecryptionFailed`].

use thiserror::Error;

/// Errors returned by every operation in this crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The system entropy source could not supply bytes.
    #[error("randomness source failure")]
    RandomnessFailure,

    /// A marshalled public key had the wrong length.
    #[error("invalid public key size: expected {expected} bytes, got {actual}")]
    InvalidPublicKeySize { expected: usize, actual: usize },

    /// A hybrid ciphertext had the wrong length.
    #[error("invalid ciphertext size: expected {expected} bytes, got {actual}")]
    InvalidCiphertextSize { expected: usize, actual: usize },

    /// Persisted key pair data is too short to hold the classical private key.
    #[error("invalid secret key data")]
    InvalidSecretKeyData,

    /// The lattice public key decoder rejected the encoding.
    #[error("invalid key encoding")]
    InvalidKey,

    /// The lattice scheme rejected an input or failed internally.
    #[error("lattice scheme failure")]
    LatticeSchemeFailure,

    /// The payload cipher refused to seal the input.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Payload authentication or structure check failed. Deliberately carries
    /// no cause.
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Self {
        Error::RandomnessFailure
    }
}

impl From<getrandom::Error> for Error {
    fn from(_: getrandom::Error) -> Self {
        Error::RandomnessFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decryption_failure_message_is_generic() {
        assert_eq!(Error::DecryptionFailed.to_string(), "decryption failed");
    }

    #[test]
    fn size_errors_report_public_lengths() {
        let e = Error::InvalidCiphertextSize {
            expected: 1120,
            actual: 3,
        };
        assert_eq!(
            e.to_string(),
            "invalid ciphertext size: expected 1120 bytes, got 3"
        );
    }

    #[test]
    fn entropy_failures_map_to_randomness_failure() {
        assert_eq!(Error::from(getrandom::Error::UNSUPPORTED), Error::RandomnessFailure);
        let code = core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
        assert_eq!(Error::from(rand_core::Error::from(code)), Error::RandomnessFailure);
    }
}
