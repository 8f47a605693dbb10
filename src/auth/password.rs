//! Password hashing and verification.
//!
//! Stored hashes are ASCII strings of the form `<key hex>.<salt hex>`: a
//! 64-byte scrypt-derived key and a 16-byte random salt, both hex encoded and
//! joined by a single `.`. The salt's hex text (not its raw bytes) is what
//! the KDF consumes, so hashes verify across every writer of this format.

use anyhow::{anyhow, Context, Result};
use rand::{rngs::OsRng, RngCore};
use scrypt::Params;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

// Work factor N = 2^14, r = 8, p = 1. Shared between hashing and
// verification; changing any of these invalidates every stored hash.
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Well-formed hash that matches no password, used to keep the
/// missing-account path as expensive as a real verification.
pub(crate) const PLACEHOLDER_HASH: &str = concat!(
    "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    ".",
    "00000000000000000000000000000000"
);

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Fails only if the entropy source or the KDF itself fails; never on the
/// password value.
pub fn hash(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .context("failed to generate password salt")?;

    let salt_hex = hex::encode(salt);
    let key = derive_key(password.as_bytes(), salt_hex.as_bytes())?;

    Ok(format!("{}.{salt_hex}", hex::encode(key)))
}

/// Verify a password against a stored hash.
///
/// Malformed input (missing separator, bad hex, wrong key length) returns
/// `false` rather than an error: the encoded value may come from a hostile
/// caller and must never panic or leak why it failed. The key comparison is
/// constant time.
#[must_use]
pub fn verify(password: &str, encoded: &str) -> bool {
    let Some((key_hex, salt_hex)) = encoded.split_once('.') else {
        return false;
    };

    let Ok(stored_key) = hex::decode(key_hex) else {
        return false;
    };

    if stored_key.len() != KEY_LEN || hex::decode(salt_hex).is_err() {
        return false;
    }

    let Ok(derived) = derive_key(password.as_bytes(), salt_hex.as_bytes()) else {
        return false;
    };

    derived.ct_eq(stored_key.as_slice()).into()
}

fn derive_key(password: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|err| anyhow!("invalid scrypt parameters: {err}"))?;

    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(password, salt, &params, &mut key)
        .map_err(|err| anyhow!("scrypt derivation failed: {err}"))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let encoded = hash("abc12").expect("hash");
        assert!(verify("abc12", &encoded));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let encoded = hash("correct horse").expect("hash");
        assert!(!verify("battery staple", &encoded));
    }

    #[test]
    fn hashing_twice_yields_distinct_salts() {
        let first = hash("abc12").expect("hash");
        let second = hash("abc12").expect("hash");
        assert_ne!(first, second);
        assert!(verify("abc12", &first));
        assert!(verify("abc12", &second));
    }

    #[test]
    fn encoded_form_is_key_dot_salt() {
        let encoded = hash("abc12").expect("hash");
        let (key_hex, salt_hex) = encoded.split_once('.').expect("separator");
        assert_eq!(key_hex.len(), KEY_LEN * 2);
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
        assert!(key_hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(salt_hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_rejects_malformed_input() {
        assert!(!verify("abc12", ""));
        assert!(!verify("abc12", "no-separator"));
        assert!(!verify("abc12", "deadbeef.cafe"));
        assert!(!verify("abc12", "zzzz.0123456789abcdef0123456789abcdef"));

        // Well-formed halves but a truncated key.
        let short = format!("{}.{}", "ab".repeat(16), "cd".repeat(16));
        assert!(!verify("abc12", &short));
    }

    #[test]
    fn placeholder_hash_is_well_formed_and_matches_nothing() {
        let (key_hex, salt_hex) = PLACEHOLDER_HASH.split_once('.').expect("separator");
        assert_eq!(key_hex.len(), KEY_LEN * 2);
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
        assert!(!verify("abc12", PLACEHOLDER_HASH));
        assert!(!verify("", PLACEHOLDER_HASH));
    }
}
