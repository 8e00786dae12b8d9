#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(pk) = hybrid_pqc::unmarshal_public_key(data) {
        assert_eq!(pk.to_bytes(), data);
    }

    if let Ok(kp) = hybrid_pqc::unmarshal_keypair(data) {
        let pk = kp.public_key().to_bytes();
        assert_eq!(pk.len(), hybrid_pqc::wire::HYBRID_PUBLIC_KEY_SIZE);
        assert_eq!(&pk[..32], kp.x25519_public());
    }
});
