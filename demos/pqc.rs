//! End-to-end walk-through: recipient key pair, sender encapsulation,
//! payload encryption, and recovery on the recipient side.
//!
//!   RUST_LOG=hybrid_pqc=debug cargo run --example pqc

use hybrid_pqc::wire::SUITE_ID;
use hybrid_pqc::{
    decrypt_payload, encrypt_payload, generate_keypair, unmarshal_keypair, unmarshal_public_key,
    Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("suite: {}", SUITE_ID);

    // Recipient: generate once, publish the public key, persist the key pair
    let keypair = generate_keypair()?;
    let published = keypair.public_key().to_bytes();
    let persisted = keypair.to_bytes();
    println!("public key:  {} bytes", published.len());
    println!("key pair:    {} bytes", persisted.len());

    // Sender: parse the published key, encapsulate, encrypt
    let recipient = unmarshal_public_key(&published)?;
    let (ciphertext, secret) = recipient.encapsulate()?;
    let message = b"hybrid post-quantum hello";
    let payload = encrypt_payload(&secret, message)?;
    println!("ciphertext:  {} bytes", ciphertext.len());
    println!("payload:     {} bytes", payload.len());

    // Recipient: restore the key pair, decapsulate, decrypt
    let restored = unmarshal_keypair(&persisted)?;
    let secret = restored.decapsulate(ciphertext.as_bytes())?;
    let plaintext = decrypt_payload(&secret, &payload)?;

    println!("recovered:   {}", String::from_utf8_lossy(&plaintext));
    assert_eq!(plaintext, message);

    // Any tampering with the payload is rejected
    let mut tampered = payload.clone();
    tampered[0] ^= 0x01;
    match decrypt_payload(&secret, &tampered) {
        Ok(_) => println!("tampered:    accepted (unexpected)"),
        Err(e) => println!("tampered:    {}", e),
    }

    Ok(())
}
