//! Rotating auth token
//!
//! `token = sha1_hex(username + sha1_hex(password) + hour)` where `hour` is
//! the two-digit reference hour at the moment the request is built. A token
//! built just before the hour changes may be refused by the service; tokens
//! are therefore computed per request and never cached.

use sha1::{Digest, Sha1};

use super::ports::Clock;

/// Lowercase hex SHA-1 digest of the UTF-8 bytes of `input`.
pub fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Auth token for an explicit hour string.
pub fn compute_auth_for_hour(username: &str, password: &str, hour: &str) -> String {
    let password_hash = sha1_hex(password);
    sha1_hex(&format!("{username}{password_hash}{hour}"))
}

/// Auth token for the clock's current reference hour.
pub fn compute_auth(username: &str, password: &str, clock: &dyn Clock) -> String {
    compute_auth_for_hour(username, password, &clock.reference_hour())
}
