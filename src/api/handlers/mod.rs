//! API handlers and shared validation for Kleidi.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod me;
pub mod users;

use regex::Regex;

/// Maximum username length, in characters.
pub const USERNAME_MAX_CHARS: usize = 35;

/// Lightweight email sanity check used before any store or KDF work.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Usernames are Greek or Latin letters and spaces, at most 35 characters.
pub fn valid_username(username: &str) -> bool {
    if username.chars().count() > USERNAME_MAX_CHARS {
        return false;
    }
    Regex::new(r"^[\u{0370}-\u{03ff}\u{1f00}-\u{1fff} a-zA-Z]+$")
        .is_ok_and(|re| re.is_match(username))
}

/// Passwords need at least 5 characters, one letter and one digit.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 5
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_alphabetic())
}
