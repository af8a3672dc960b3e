//! Short code generation.
//!
//! Codes are drawn uniformly from lowercase ASCII letters and digits. The
//! default length is 5; [`code_length_for_attempt`] grows it as collisions
//! accumulate so a crowded keyspace does not exhaust the allocator.

use rand::Rng;

/// Alphabet for generated codes.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a code on the first allocation attempt.
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Number of collisions after which the code length grows by one.
pub const COLLISIONS_PER_LENGTH_STEP: usize = 3;

/// Generates a random short code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(5);
/// assert_eq!(code.len(), 5);
/// assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Code length to use on a zero-based allocation attempt.
pub fn code_length_for_attempt(attempt: usize) -> usize {
    DEFAULT_CODE_LENGTH + attempt / COLLISIONS_PER_LENGTH_STEP
}
