#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static SECRET: Lazy<hybrid_pqc::SharedSecret> = Lazy::new(|| {
    let kp = hybrid_pqc::generate_keypair().unwrap();
    let (_, ss) = kp.public_key().encapsulate().unwrap();
    ss
});

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte selects the mode: raw garbage, or a valid payload with one
    // flipped bit taken from the rest of the input.
    match data[0] & 1 {
        0 => {
            let _ = hybrid_pqc::decrypt_payload(&SECRET, &data[1..]);
        }
        _ => {
            let body = &data[1..];
            let mut ct = hybrid_pqc::encrypt_payload(&SECRET, body).unwrap();
            let pos = body.first().map(|b| *b as usize).unwrap_or(0) % ct.len();
            ct[pos] ^= 0x01;
            assert!(hybrid_pqc::decrypt_payload(&SECRET, &ct).is_err());
        }
    }
});
