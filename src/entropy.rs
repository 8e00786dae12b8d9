//! System entropy.
//!
//! Every random draw in the default API reads the operating system directly,
//! so an entropy failure always surfaces as [`Error::RandomnessFailure`]
//! instead of a panic inside a primitive crate. Secret draws land in
//! buffers that are wiped on drop; no seed-derived RNG state is kept.

use rand_core::{CryptoRngCore, OsRng};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Fill `buf` from the operating system.
pub(crate) fn fill(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf).map_err(|e| {
        tracing::warn!(error = %e, "system entropy source failed");
        Error::from(e)
    })
}

/// Stateless handle on the operating system's entropy source.
pub(crate) fn system_rng() -> OsRng {
    OsRng
}

/// Draw a fixed-size secret from `rng` into a buffer wiped on drop.
pub(crate) fn secret_bytes<const N: usize>(
    rng: &mut impl CryptoRngCore,
) -> Result<Zeroizing<[u8; N]>> {
    let mut out = Zeroizing::new([0u8; N]);
    rng.try_fill_bytes(&mut out[..]).map_err(|e| {
        tracing::warn!(error = %e, "entropy source failed");
        Error::from(e)
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn system_rng_holds_no_state() {
        assert_eq!(core::mem::size_of_val(&system_rng()), 0);
    }

    #[test]
    fn system_draws_are_independent() {
        let mut rng = system_rng();
        let a: Zeroizing<[u8; 32]> = secret_bytes(&mut rng).unwrap();
        let b: Zeroizing<[u8; 32]> = secret_bytes(&mut rng).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn secret_bytes_is_deterministic_for_seeded_rng() {
        let mut a = ChaCha20Rng::from_seed([7u8; 32]);
        let mut b = ChaCha20Rng::from_seed([7u8; 32]);
        let x: Zeroizing<[u8; 32]> = secret_bytes(&mut a).unwrap();
        let y: Zeroizing<[u8; 32]> = secret_bytes(&mut b).unwrap();
        assert_eq!(*x, *y);
    }
}
