use ed25519_dalek::SigningKey;
use stellar_strkey::ed25519::{PrivateKey, PublicKey};

/// Derive the public account address (G...) of a secret seed (S...).
///
/// Returns `None` when `secret` is not a well-formed secret seed: wrong
/// version byte, bad length or a failed checksum.
pub fn public_key_from_secret(secret: &str) -> Option<String> {
    let seed = PrivateKey::from_string(secret.trim()).ok()?;
    let verifying = SigningKey::from_bytes(&seed.0).verifying_key();
    Some(PublicKey(verifying.to_bytes()).to_string())
}
