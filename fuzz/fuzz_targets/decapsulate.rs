#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static KEYPAIR: Lazy<hybrid_pqc::HybridKeyPair> =
    Lazy::new(|| hybrid_pqc::generate_keypair().unwrap());

fuzz_target!(|data: &[u8]| {
    let result = KEYPAIR.decapsulate(data);
    if data.len() == hybrid_pqc::wire::HYBRID_CIPHERTEXT_SIZE {
        assert!(result.is_ok());
    } else {
        assert!(result.is_err());
    }
});
