//! Session token helpers.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Create a new random session token.
///
/// The raw value is only returned to set the cookie; the database stores a
/// hash.
pub(crate) fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Hash a session token so raw values never touch the database.
/// The hash is used for lookups when the cookie is presented.
pub(crate) fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
