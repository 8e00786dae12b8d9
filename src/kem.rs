//! Hybrid KEM: classical DH + lattice KEM
//!
//! Security holds if *either* component remains secure (defense-in-depth).
//!
//! Key serialization:
//!   PublicKey  = dh_pk[32] || lattice_pk[L::PUBLIC_KEY_SIZE]
//!   KeyPair    = dh_sk[32] || lattice_sk[L::PRIVATE_KEY_SIZE]   (public halves rederived)
//!
//! KEM ciphertext:
//!   dh_ephemeral_pk[32] || lattice_ct[L::CIPHERTEXT_SIZE]
//!
//! Shared secret: see [`combiner`](crate::combiner).

use core::fmt;
use core::marker::PhantomData;

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::classical::{ClassicalDh, X25519};
use crate::combiner::{self, SharedSecret};
use crate::entropy;
use crate::error::{Error, Result};
use crate::lattice::{LatticeKem, MlKem768};
use crate::wire::X25519_KEY_SIZE;

// ---------------------------------------------------------------------------
// Public key (hybrid)
// ---------------------------------------------------------------------------

/// Recipient's published key: classical public key + lattice public key.
pub struct HybridPublicKey<D: ClassicalDh = X25519, L: LatticeKem = MlKem768> {
    x25519_public: [u8; X25519_KEY_SIZE],
    lattice_public: L::PublicKey,
    _dh: PhantomData<fn() -> D>,
}

impl<D: ClassicalDh, L: LatticeKem> HybridPublicKey<D, L> {
    /// Serialize: dh_pk[32] || lattice_pk
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HybridKem::<D, L>::PUBLIC_KEY_SIZE);
        out.extend_from_slice(&self.x25519_public);
        out.extend_from_slice(&L::encode_public(&self.lattice_public));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let expected = HybridKem::<D, L>::PUBLIC_KEY_SIZE;
        if bytes.len() != expected {
            tracing::debug!(expected, actual = bytes.len(), "rejected public key: bad length");
            return Err(Error::InvalidPublicKeySize {
                expected,
                actual: bytes.len(),
            });
        }

        let (x25519_bytes, lattice_bytes) = bytes.split_at(X25519_KEY_SIZE);
        let x25519_public: [u8; X25519_KEY_SIZE] =
            x25519_bytes.try_into().map_err(|_| Error::InvalidKey)?;

        let lattice_public = L::decode_public(lattice_bytes).map_err(|e| {
            tracing::debug!(lattice = L::NAME, error = %e, "rejected public key: lattice encoding");
            e
        })?;

        Ok(Self {
            x25519_public,
            lattice_public,
            _dh: PhantomData,
        })
    }

    /// Encapsulate to this key with fresh system randomness.
    pub fn encapsulate(&self) -> Result<(HybridCiphertext, SharedSecret)> {
        HybridKem::<D, L>::new().encapsulate(self)
    }

    pub fn x25519_public(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.x25519_public
    }

    pub fn lattice_public(&self) -> &L::PublicKey {
        &self.lattice_public
    }
}

impl<D: ClassicalDh, L: LatticeKem> Clone for HybridPublicKey<D, L> {
    fn clone(&self) -> Self {
        Self {
            x25519_public: self.x25519_public,
            lattice_public: self.lattice_public.clone(),
            _dh: PhantomData,
        }
    }
}

impl<D: ClassicalDh, L: LatticeKem> PartialEq for HybridPublicKey<D, L> {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl<D: ClassicalDh, L: LatticeKem> Eq for HybridPublicKey<D, L> {}

impl<D: ClassicalDh, L: LatticeKem> fmt::Debug for HybridPublicKey<D, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridPublicKey")
            .field("dh", &D::NAME)
            .field("lattice", &L::NAME)
            .field("x25519_public", &self.x25519_public)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Key pair (hybrid)
// ---------------------------------------------------------------------------

/// Full key material held by the recipient. Private halves are wiped on drop.
pub struct HybridKeyPair<D: ClassicalDh = X25519, L: LatticeKem = MlKem768> {
    x25519_public: [u8; X25519_KEY_SIZE],
    x25519_private: Zeroizing<[u8; X25519_KEY_SIZE]>,
    lattice_public: L::PublicKey,
    lattice_private: L::PrivateKey,
    _dh: PhantomData<fn() -> D>,
}

impl<D: ClassicalDh, L: LatticeKem> HybridKeyPair<D, L> {
    /// Public projection, safe to publish.
    pub fn public_key(&self) -> HybridPublicKey<D, L> {
        HybridPublicKey {
            x25519_public: self.x25519_public,
            lattice_public: self.lattice_public.clone(),
            _dh: PhantomData,
        }
    }

    /// Recover the sender's shared secret from a hybrid ciphertext.
    ///
    /// The length is checked before any cryptographic work.
    pub fn decapsulate(&self, ciphertext: &[u8]) -> Result<SharedSecret> {
        let expected = HybridKem::<D, L>::CIPHERTEXT_SIZE;
        if ciphertext.len() != expected {
            tracing::debug!(expected, actual = ciphertext.len(), "rejected ciphertext: bad length");
            return Err(Error::InvalidCiphertextSize {
                expected,
                actual: ciphertext.len(),
            });
        }

        let (ephemeral_bytes, lattice_ct) = ciphertext.split_at(X25519_KEY_SIZE);
        let ephemeral_public: [u8; X25519_KEY_SIZE] =
            ephemeral_bytes
                .try_into()
                .map_err(|_| Error::InvalidCiphertextSize {
                    expected,
                    actual: ciphertext.len(),
                })?;

        let classical_ss = D::diffie_hellman(&self.x25519_private, &ephemeral_public);

        let lattice_ss = L::decapsulate(&self.lattice_private, lattice_ct).map_err(|e| {
            tracing::debug!(lattice = L::NAME, error = %e, "lattice decapsulation rejected");
            e
        })?;

        tracing::debug!(dh = D::NAME, lattice = L::NAME, "decapsulated");
        Ok(combiner::combine(&classical_ss[..], &lattice_ss))
    }

    /// Persist: dh_sk[32] || lattice_sk
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let lattice_private = L::encode_private(&self.lattice_private);
        let mut out = Zeroizing::new(Vec::with_capacity(X25519_KEY_SIZE + lattice_private.len()));
        out.extend_from_slice(&self.x25519_private[..]);
        out.extend_from_slice(&lattice_private);
        out
    }

    /// Restore a persisted key pair, rederiving both public halves.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < X25519_KEY_SIZE {
            tracing::debug!(actual = bytes.len(), "rejected key pair: too short");
            return Err(Error::InvalidSecretKeyData);
        }

        let (x25519_bytes, lattice_bytes) = bytes.split_at(X25519_KEY_SIZE);
        let mut x25519_private = Zeroizing::new([0u8; X25519_KEY_SIZE]);
        x25519_private.copy_from_slice(x25519_bytes);
        let x25519_public = D::public_from_private(&x25519_private);

        let lattice_private = L::decode_private(lattice_bytes).map_err(|e| {
            tracing::debug!(lattice = L::NAME, error = %e, "rejected key pair: lattice encoding");
            Error::LatticeSchemeFailure
        })?;
        let lattice_public = L::public_from_private(&lattice_private);

        Ok(Self {
            x25519_public,
            x25519_private,
            lattice_public,
            lattice_private,
            _dh: PhantomData,
        })
    }

    pub fn x25519_public(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.x25519_public
    }

    pub fn lattice_public(&self) -> &L::PublicKey {
        &self.lattice_public
    }
}

impl<D: ClassicalDh, L: LatticeKem> fmt::Debug for HybridKeyPair<D, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridKeyPair")
            .field("dh", &D::NAME)
            .field("lattice", &L::NAME)
            .field("x25519_public", &self.x25519_public)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Ciphertext
// ---------------------------------------------------------------------------

/// Encapsulation output: dh_ephemeral_pk[32] || lattice_ct.
#[derive(Clone, PartialEq, Eq)]
pub struct HybridCiphertext {
    bytes: Vec<u8>,
}

impl HybridCiphertext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn ephemeral_public(&self) -> &[u8] {
        &self.bytes[..X25519_KEY_SIZE]
    }

    pub fn lattice_ciphertext(&self) -> &[u8] {
        &self.bytes[X25519_KEY_SIZE..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for HybridCiphertext {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for HybridCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HybridCiphertext({} bytes)", self.bytes.len())
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Hybrid KEM engine for a classical group `D` and lattice KEM `L`.
///
/// Zero-sized and stateless; every call draws its own randomness, so one
/// instance can be shared freely across threads.
pub struct HybridKem<D: ClassicalDh = X25519, L: LatticeKem = MlKem768> {
    _marker: PhantomData<fn() -> (D, L)>,
}

impl<D: ClassicalDh, L: LatticeKem> HybridKem<D, L> {
    /// Marshalled public key size.
    pub const PUBLIC_KEY_SIZE: usize = X25519_KEY_SIZE + L::PUBLIC_KEY_SIZE;
    /// Persisted key pair size.
    pub const SECRET_KEY_SIZE: usize = X25519_KEY_SIZE + L::PRIVATE_KEY_SIZE;
    /// Hybrid ciphertext size.
    pub const CIPHERTEXT_SIZE: usize = X25519_KEY_SIZE + L::CIPHERTEXT_SIZE;

    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Generate a key pair from system randomness.
    pub fn generate_keypair(&self) -> Result<HybridKeyPair<D, L>> {
        self.generate_keypair_with_rng(&mut entropy::system_rng())
    }

    /// Generate a key pair from a caller-supplied RNG.
    ///
    /// Deterministic for a seeded RNG; intended for known-answer tests.
    pub fn generate_keypair_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
    ) -> Result<HybridKeyPair<D, L>> {
        let x25519_private: Zeroizing<[u8; X25519_KEY_SIZE]> = entropy::secret_bytes(rng)?;
        let x25519_public = D::public_from_private(&x25519_private);

        let (lattice_private, lattice_public) = L::generate(rng).map_err(|e| {
            tracing::debug!(lattice = L::NAME, error = %e, "lattice key generation failed");
            e
        })?;

        tracing::debug!(dh = D::NAME, lattice = L::NAME, "generated hybrid key pair");
        Ok(HybridKeyPair {
            x25519_public,
            x25519_private,
            lattice_public,
            lattice_private,
            _dh: PhantomData,
        })
    }

    /// Sender side: fresh ephemeral DH + lattice encapsulation, combined.
    pub fn encapsulate(
        &self,
        recipient: &HybridPublicKey<D, L>,
    ) -> Result<(HybridCiphertext, SharedSecret)> {
        self.encapsulate_with_rng(recipient, &mut entropy::system_rng())
    }

    /// [`encapsulate`](Self::encapsulate) with a caller-supplied RNG.
    ///
    /// The ephemeral scalar is drawn first, then the lattice encapsulation
    /// consumes the same RNG. Never reuse a seeded RNG outside tests.
    pub fn encapsulate_with_rng(
        &self,
        recipient: &HybridPublicKey<D, L>,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(HybridCiphertext, SharedSecret)> {
        let ephemeral_private: Zeroizing<[u8; X25519_KEY_SIZE]> = entropy::secret_bytes(rng)?;
        let ephemeral_public = D::public_from_private(&ephemeral_private);
        let classical_ss = D::diffie_hellman(&ephemeral_private, &recipient.x25519_public);

        let (lattice_ct, lattice_ss) = L::encapsulate(&recipient.lattice_public, rng)?;
        if lattice_ct.len() != L::CIPHERTEXT_SIZE {
            return Err(Error::LatticeSchemeFailure);
        }

        let shared_secret = combiner::combine(&classical_ss[..], &lattice_ss);

        let mut bytes = Vec::with_capacity(Self::CIPHERTEXT_SIZE);
        bytes.extend_from_slice(&ephemeral_public);
        bytes.extend_from_slice(&lattice_ct);

        tracing::debug!(
            dh = D::NAME,
            lattice = L::NAME,
            ciphertext_len = bytes.len(),
            "encapsulated"
        );
        Ok((HybridCiphertext { bytes }, shared_secret))
    }

    /// Recipient side; same as [`HybridKeyPair::decapsulate`].
    pub fn decapsulate(
        &self,
        keypair: &HybridKeyPair<D, L>,
        ciphertext: &[u8],
    ) -> Result<SharedSecret> {
        keypair.decapsulate(ciphertext)
    }
}

impl<D: ClassicalDh, L: LatticeKem> Default for HybridKem<D, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ClassicalDh, L: LatticeKem> Clone for HybridKem<D, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ClassicalDh, L: LatticeKem> Copy for HybridKem<D, L> {}

impl<D: ClassicalDh, L: LatticeKem> fmt::Debug for HybridKem<D, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridKem")
            .field("dh", &D::NAME)
            .field("lattice", &L::NAME)
            .finish()
    }
}
