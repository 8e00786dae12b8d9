//! Payload AEAD: XChaCha20-Poly1305 keyed by the hybrid shared secret.
//!
//!   payload = nonce[24] || ciphertext || tag[16]
//!
//! The nonce is drawn fresh from system entropy on every call; at 192 bits
//! random nonces are safe for any realistic number of messages per key.
//! No associated data is bound.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};

use crate::combiner::SharedSecret;
use crate::entropy;
use crate::error::{Error, Result};
use crate::wire::NONCE_SIZE;

/// Seal `plaintext` under `secret`. Output: `nonce || sealed`.
pub fn encrypt_payload(secret: &SharedSecret, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_SIZE];
    entropy::fill(&mut nonce)?;
    seal_payload_with_nonce(secret, &nonce, plaintext)
}

/// Seal with an explicit nonce. Callers must never repeat a nonce under the
/// same secret.
pub(crate) fn seal_payload_with_nonce(
    secret: &SharedSecret,
    nonce: &[u8; NONCE_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher =
        XChaCha20Poly1305::new_from_slice(secret.as_bytes()).map_err(|_| Error::EncryptionFailed)?;
    let sealed = cipher
        .encrypt(XNonce::from_slice(nonce), plaintext)
        .map_err(|_| Error::EncryptionFailed)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Open a payload produced by [`encrypt_payload`].
///
/// Every failure (short input, wrong key, any tampering) is reported as the
/// same [`Error::DecryptionFailed`].
pub fn decrypt_payload(secret: &SharedSecret, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() < NONCE_SIZE {
        tracing::trace!("payload rejected");
        return Err(Error::DecryptionFailed);
    }

    let (nonce, sealed) = payload.split_at(NONCE_SIZE);
    let cipher =
        XChaCha20Poly1305::new_from_slice(secret.as_bytes()).map_err(|_| Error::DecryptionFailed)?;

    cipher.decrypt(XNonce::from_slice(nonce), sealed).map_err(|_| {
        tracing::trace!("payload rejected");
        Error::DecryptionFailed
    })
}
