//! Lattice KEM capability.
//!
//! [`LatticeKem`] is the seam between the hybrid protocol and a certified
//! post-quantum KEM. The protocol only relies on the operations and size
//! constants below; any implementation honouring them can be swapped in
//! without touching the combiner or the wire layout.
//!
//! [`MlKem768`] backs it with the `ml-kem` crate (FIPS 203) and adds the
//! standard's input checks on decoded keys:
//!   - encapsulation key: every 12-bit coefficient of `t_hat` is below q
//!   - decapsulation key: embedded `H(ek)` equals `SHA3-256(ek)`

use ml_kem::kem::Decapsulate;
use ml_kem::{
    Ciphertext, EncapsulateDeterministic, EncodedSizeUser, KemCore, MlKem768Params, B32,
};
use rand_core::CryptoRngCore;
use sha3::{Digest, Sha3_256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::entropy;
use crate::error::{Error, Result};
use crate::wire::{
    MLKEM768_CIPHERTEXT_SIZE, MLKEM768_PRIVATE_KEY_SIZE, MLKEM768_PUBLIC_KEY_SIZE,
    MLKEM768_SHARED_SECRET_SIZE,
};

/// A key encapsulation mechanism with fixed-size canonical encodings.
pub trait LatticeKem {
    /// Human-readable name for logs and diagnostics.
    const NAME: &'static str;

    const PUBLIC_KEY_SIZE: usize;
    const PRIVATE_KEY_SIZE: usize;
    const CIPHERTEXT_SIZE: usize;
    const SHARED_SECRET_SIZE: usize;

    type PublicKey: Clone;
    /// Must wipe its secret material on drop.
    type PrivateKey;

    /// Returns `(private, public)`.
    fn generate(rng: &mut impl CryptoRngCore) -> Result<(Self::PrivateKey, Self::PublicKey)>;

    /// Returns `(ciphertext, shared_secret)`.
    fn encapsulate(
        public: &Self::PublicKey,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)>;

    fn decapsulate(private: &Self::PrivateKey, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>;

    fn public_from_private(private: &Self::PrivateKey) -> Self::PublicKey;

    fn encode_public(public: &Self::PublicKey) -> Vec<u8>;

    /// Fails with [`Error::InvalidKey`] on a malformed encoding.
    fn decode_public(bytes: &[u8]) -> Result<Self::PublicKey>;

    fn encode_private(private: &Self::PrivateKey) -> Zeroizing<Vec<u8>>;

    /// Fails with [`Error::LatticeSchemeFailure`] on a malformed encoding.
    fn decode_private(bytes: &[u8]) -> Result<Self::PrivateKey>;
}

// ---------------------------------------------------------------------------
// ML-KEM-768
// ---------------------------------------------------------------------------

type Ek = ml_kem::kem::EncapsulationKey<MlKem768Params>;
type Dk = ml_kem::kem::DecapsulationKey<MlKem768Params>;
type MlKemCt = Ciphertext<ml_kem::MlKem768>;

/// Modulus of the ML-KEM ring.
const Q: u16 = 3329;

/// `ByteEncode_12(t_hat)`: k = 3 polynomials of 384 bytes.
const POLY_VECTOR_BYTES: usize = 3 * 384;

/// Offsets inside the FIPS 203 decapsulation key:
/// `dk_pke[1152] || ek[1184] || H(ek)[32] || z[32]`
const DK_EK_START: usize = POLY_VECTOR_BYTES;
const DK_EK_END: usize = DK_EK_START + MLKEM768_PUBLIC_KEY_SIZE;
const DK_HASH_END: usize = DK_EK_END + 32;

/// 32-byte ML-KEM seed (`d`, `z` or `m`), wiped on drop.
struct Seed(B32);

impl Seed {
    fn draw(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let bytes: Zeroizing<[u8; 32]> = entropy::secret_bytes(rng)?;
        let mut seed = Seed(B32::default());
        seed.0.copy_from_slice(&bytes[..]);
        Ok(seed)
    }

    fn wipe(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.wipe();
    }
}

/// ML-KEM-768 (FIPS 203) via the `ml-kem` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlKem768;

/// ML-KEM-768 private key. The encapsulation key is kept alongside so the
/// public half can be rederived without re-encoding.
pub struct MlKem768PrivateKey {
    dk: Dk,
    ek: Ek,
}

impl LatticeKem for MlKem768 {
    const NAME: &'static str = "ML-KEM-768";

    const PUBLIC_KEY_SIZE: usize = MLKEM768_PUBLIC_KEY_SIZE;
    const PRIVATE_KEY_SIZE: usize = MLKEM768_PRIVATE_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = MLKEM768_CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = MLKEM768_SHARED_SECRET_SIZE;

    type PublicKey = Ek;
    type PrivateKey = MlKem768PrivateKey;

    fn generate(rng: &mut impl CryptoRngCore) -> Result<(Self::PrivateKey, Self::PublicKey)> {
        let d = Seed::draw(rng)?;
        let z = Seed::draw(rng)?;
        let (dk, ek) = ml_kem::MlKem768::generate_deterministic(&d.0, &z.0);
        Ok((
            MlKem768PrivateKey {
                dk,
                ek: ek.clone(),
            },
            ek,
        ))
    }

    fn encapsulate(
        public: &Self::PublicKey,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        let m = Seed::draw(rng)?;
        let (ct, mut ss) = public
            .encapsulate_deterministic(&m.0)
            .map_err(|_| Error::LatticeSchemeFailure)?;

        let shared = Zeroizing::new(ss.as_slice().to_vec());
        ss.as_mut_slice().zeroize();

        Ok((ct.as_slice().to_vec(), shared))
    }

    fn decapsulate(private: &Self::PrivateKey, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let ct = MlKemCt::try_from(ciphertext).map_err(|_| Error::LatticeSchemeFailure)?;

        let mut ss = private
            .dk
            .decapsulate(&ct)
            .map_err(|_| Error::LatticeSchemeFailure)?;

        let shared = Zeroizing::new(ss.as_slice().to_vec());
        ss.as_mut_slice().zeroize();

        Ok(shared)
    }

    fn public_from_private(private: &Self::PrivateKey) -> Self::PublicKey {
        private.ek.clone()
    }

    fn encode_public(public: &Self::PublicKey) -> Vec<u8> {
        public.as_bytes().as_slice().to_vec()
    }

    fn decode_public(bytes: &[u8]) -> Result<Self::PublicKey> {
        if bytes.len() != MLKEM768_PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKey);
        }
        if !coefficients_reduced(&bytes[..POLY_VECTOR_BYTES]) {
            return Err(Error::InvalidKey);
        }

        let encoded: [u8; MLKEM768_PUBLIC_KEY_SIZE] =
            bytes.try_into().map_err(|_| Error::InvalidKey)?;
        Ok(Ek::from_bytes(&encoded.into()))
    }

    fn encode_private(private: &Self::PrivateKey) -> Zeroizing<Vec<u8>> {
        let mut encoded = private.dk.as_bytes();
        let out = Zeroizing::new(encoded.as_slice().to_vec());
        encoded.as_mut_slice().zeroize();
        out
    }

    fn decode_private(bytes: &[u8]) -> Result<Self::PrivateKey> {
        if bytes.len() != MLKEM768_PRIVATE_KEY_SIZE {
            return Err(Error::LatticeSchemeFailure);
        }

        let ek_bytes = &bytes[DK_EK_START..DK_EK_END];
        let stored_hash = &bytes[DK_EK_END..DK_HASH_END];

        if !coefficients_reduced(&ek_bytes[..POLY_VECTOR_BYTES]) {
            return Err(Error::LatticeSchemeFailure);
        }
        let computed_hash = Sha3_256::digest(ek_bytes);
        if !bool::from(computed_hash.as_slice().ct_eq(stored_hash)) {
            return Err(Error::LatticeSchemeFailure);
        }

        let dk_encoded: Zeroizing<[u8; MLKEM768_PRIVATE_KEY_SIZE]> = Zeroizing::new(
            bytes.try_into().map_err(|_| Error::LatticeSchemeFailure)?,
        );
        let mut dk_array = (*dk_encoded).into();
        let dk = Dk::from_bytes(&dk_array);
        dk_array.as_mut_slice().zeroize();

        let ek_encoded: [u8; MLKEM768_PUBLIC_KEY_SIZE] =
            ek_bytes.try_into().map_err(|_| Error::LatticeSchemeFailure)?;
        let ek = Ek::from_bytes(&ek_encoded.into());

        Ok(MlKem768PrivateKey { dk, ek })
    }
}

/// FIPS 203 modulus check: `ByteDecode_12` of `encoded` must already be
/// reduced mod q. Operates on public data only.
fn coefficients_reduced(encoded: &[u8]) -> bool {
    encoded.chunks_exact(3).all(|c| {
        let lo = u16::from(c[0]) | (u16::from(c[1] & 0x0f) << 8);
        let hi = (u16::from(c[1]) >> 4) | (u16::from(c[2]) << 4);
        lo < Q && hi < Q
    })
}
