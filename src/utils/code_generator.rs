//! Short code generation.

use rand::Rng;

/// The 62-symbol alphabet codes are drawn from.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 3;
/// Longest code length accepted by configuration.
pub const MAX_CODE_LENGTH: usize = 20;

/// Generates a random short code of exactly `length` characters.
///
/// Characters are drawn uniformly from [`ALPHABET`]. The generator performs
/// no existence check against any store; collision handling is the
/// orchestrator's concern. `length` is validated upstream by configuration
/// to lie within [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
