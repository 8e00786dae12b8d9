//! Known-answer and determinism tests (v1 wire format)

use hybrid_pqc::wire::{
    self, COMBINER_VERSION, HYBRID_CIPHERTEXT_SIZE, HYBRID_PUBLIC_KEY_SIZE, HYBRID_SECRET_KEY_SIZE,
    MIN_PAYLOAD_SIZE, MLKEM768_CIPHERTEXT_SIZE, MLKEM768_PRIVATE_KEY_SIZE, MLKEM768_PUBLIC_KEY_SIZE,
    NONCE_SIZE, SHARED_SECRET_SIZE, SUITE_ID, TAG_SIZE, X25519_KEY_SIZE,
};
use hybrid_pqc::{combine, ClassicalDh, LatticeKem, MlKem768, X25519MlKem768, X25519};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use sha2::{Digest, Sha256};

fn seeded(byte: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([byte; 32])
}

#[test]
fn test_wire_constants() {
    assert_eq!(X25519_KEY_SIZE, 32);
    assert_eq!(MLKEM768_PUBLIC_KEY_SIZE, 1184);
    assert_eq!(MLKEM768_PRIVATE_KEY_SIZE, 2400);
    assert_eq!(MLKEM768_CIPHERTEXT_SIZE, 1088);
    assert_eq!(HYBRID_PUBLIC_KEY_SIZE, 1216);
    assert_eq!(HYBRID_SECRET_KEY_SIZE, 2432);
    assert_eq!(HYBRID_CIPHERTEXT_SIZE, 1120);
    assert_eq!(SHARED_SECRET_SIZE, 32);
    assert_eq!(NONCE_SIZE, 24);
    assert_eq!(TAG_SIZE, 16);
    assert_eq!(MIN_PAYLOAD_SIZE, 40);
    assert_eq!(wire::payload_size(100), 140);
}

#[test]
fn test_suite_identity() {
    assert_eq!(SUITE_ID, "X25519-MLKEM768-SHA256/XChaCha20Poly1305");
    assert_eq!(COMBINER_VERSION, 1);
}

#[test]
fn test_engine_sizes() {
    assert_eq!(X25519MlKem768::PUBLIC_KEY_SIZE, HYBRID_PUBLIC_KEY_SIZE);
    assert_eq!(X25519MlKem768::SECRET_KEY_SIZE, HYBRID_SECRET_KEY_SIZE);
    assert_eq!(X25519MlKem768::CIPHERTEXT_SIZE, HYBRID_CIPHERTEXT_SIZE);
}

#[test]
fn test_combiner_known_answer() {
    // RFC 7748 section 6.1 shared secret as the classical half
    let classical =
        hex::decode("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742").unwrap();
    let lattice = [0u8; 32];

    let mut h = Sha256::new();
    h.update(&classical);
    h.update(lattice);
    let expected: [u8; 32] = h.finalize().into();

    assert_eq!(combine(&classical, &lattice).as_bytes(), &expected);
}

#[test]
fn test_combiner_empty_known_answer() {
    assert_eq!(
        hex::encode(combine(&[], &[]).as_bytes()),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_keygen_deterministic_from_seed() {
    let kem = X25519MlKem768::new();
    let a = kem.generate_keypair_with_rng(&mut seeded(1)).unwrap();
    let b = kem.generate_keypair_with_rng(&mut seeded(1)).unwrap();
    let c = kem.generate_keypair_with_rng(&mut seeded(2)).unwrap();

    assert_eq!(*a.to_bytes(), *b.to_bytes());
    assert_eq!(a.public_key(), b.public_key());
    assert_ne!(a.public_key(), c.public_key());
}

#[test]
fn test_keygen_draws_classical_key_first() {
    use rand_core::RngCore;

    let kem = X25519MlKem768::new();
    let kp = kem.generate_keypair_with_rng(&mut seeded(3)).unwrap();

    let mut first = [0u8; 32];
    seeded(3).fill_bytes(&mut first);
    assert_eq!(&kp.to_bytes()[..X25519_KEY_SIZE], &first);
    assert_eq!(X25519::public_from_private(&first), *kp.x25519_public());
}

#[test]
fn test_encapsulation_deterministic_from_seed() {
    let kem = X25519MlKem768::new();
    let kp = kem.generate_keypair_with_rng(&mut seeded(4)).unwrap();
    let pk = kp.public_key();

    let (ct1, ss1) = kem.encapsulate_with_rng(&pk, &mut seeded(5)).unwrap();
    let (ct2, ss2) = kem.encapsulate_with_rng(&pk, &mut seeded(5)).unwrap();
    let (ct3, _) = kem.encapsulate_with_rng(&pk, &mut seeded(6)).unwrap();

    assert_eq!(ct1, ct2);
    assert_eq!(ss1, ss2);
    assert_ne!(ct1, ct3);
    assert_eq!(kp.decapsulate(ct1.as_bytes()).unwrap(), ss1);
}

#[test]
fn test_shared_secret_is_sha256_of_components() {
    let kem = X25519MlKem768::new();
    let kp = kem.generate_keypair_with_rng(&mut seeded(7)).unwrap();
    let (ct, ss) = kem.encapsulate_with_rng(&kp.public_key(), &mut seeded(8)).unwrap();

    let persisted = kp.to_bytes();
    let (classical_sk, lattice_sk) = persisted.split_at(X25519_KEY_SIZE);
    let classical_sk: [u8; 32] = classical_sk.try_into().unwrap();
    let eph: [u8; 32] = ct.ephemeral_public().try_into().unwrap();
    let classical = X25519::diffie_hellman(&classical_sk, &eph);

    let lattice_sk = MlKem768::decode_private(lattice_sk).unwrap();
    let lattice = MlKem768::decapsulate(&lattice_sk, ct.lattice_ciphertext()).unwrap();

    let mut h = Sha256::new();
    h.update(&classical[..]);
    h.update(&lattice[..]);
    let expected: [u8; 32] = h.finalize().into();

    assert_eq!(ss.as_bytes(), &expected);
    assert_ne!(combine(&lattice, &classical[..]), ss);
}

#[test]
fn test_ciphertext_layout() {
    let kem = X25519MlKem768::new();
    let kp = kem.generate_keypair_with_rng(&mut seeded(9)).unwrap();
    let (ct, _) = kem.encapsulate_with_rng(&kp.public_key(), &mut seeded(10)).unwrap();

    let mut eph_private = [0u8; 32];
    rand_core::RngCore::fill_bytes(&mut seeded(10), &mut eph_private);

    assert_eq!(ct.ephemeral_public(), &X25519::public_from_private(&eph_private));
    assert_eq!(ct.lattice_ciphertext().len(), MLKEM768_CIPHERTEXT_SIZE);
    assert_eq!(&ct.as_bytes()[..X25519_KEY_SIZE], ct.ephemeral_public());
}

#[test]
fn test_public_key_layout() {
    let kem = X25519MlKem768::new();
    let kp = kem.generate_keypair_with_rng(&mut seeded(11)).unwrap();
    let pk = kp.public_key().to_bytes();
    let sk = kp.to_bytes();

    assert_eq!(&pk[..X25519_KEY_SIZE], kp.x25519_public());
    // lattice public key is embedded in the lattice private key at offset 1152
    let embedded = &sk[X25519_KEY_SIZE + 1152..X25519_KEY_SIZE + 1152 + MLKEM768_PUBLIC_KEY_SIZE];
    assert_eq!(&pk[X25519_KEY_SIZE..], embedded);
}
