/// Check a supplied password against the stored one.
///
/// Passwords are stored as plaintext, so this is a byte-for-byte equality
/// check (done in constant time). Swap this function for a salted hash
/// verification to harden login; handlers only call through here.
pub fn verify_password(stored: &str, supplied: &str) -> bool {
    stored.len() == supplied.len()
        && stored
            .as_bytes()
            .iter()
            .zip(supplied.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
