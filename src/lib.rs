//! # Kleidi (Credential Authentication & Role Authorization)
//!
//! `kleidi` is the authentication and authorization authority for a
//! publishing site: it stores and verifies password credentials, issues the
//! session claim a browser carries, and answers every "may this caller do
//! that" question through one gate.
//!
//! ## Credentials
//!
//! Passwords are stored as scrypt-derived keys (`<key hex>.<salt hex>`,
//! fresh 16-byte salt per hash) and verified with a constant-time
//! comparison. Login failures are indistinguishable by shape and by cost:
//! an unknown email still pays for a full key derivation against a
//! placeholder hash.
//!
//! ## Sessions & Authorization
//!
//! A successful login issues a `SessionClaim { id, username, role_id }`
//! carried server-side: the browser holds a random token, the database holds
//! its hash next to the claim. Role ordinals are strict supersets
//! (1 user < 2 author < 3 admin); the authoring dashboard requires role 2.
//! The claim's `role_id` is fixed at issuance and only changes through a
//! fresh login.
//!
//! There is deliberately no rate limiting, lockout, MFA, or password reset
//! here; deploy those concerns in front of the service.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
