//! Session and CSRF token generation

use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;

/// Number of random bytes in a CSRF token
pub const CSRF_TOKEN_BYTES: usize = 16;

/// Opaque bearer token handed to the client at login
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Random hex CSRF token bound to one session
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Compare two tokens without short-circuiting on the first differing byte
pub fn tokens_match(expected: &str, submitted: &str) -> bool {
    let (a, b) = (expected.as_bytes(), submitted.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
