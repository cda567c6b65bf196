//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG so that issued codes
//! cannot be predicted or enumerated from earlier ones.

use crate::error::AppError;

/// Alphabet of generated short codes.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length used when the requested length is zero.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that collide with top-level routes and so can never redirect.
const RESERVED_CODES: &[&str] = &["health", "api"];

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are rejected so every character stays equally likely.
const REJECTION_BOUND: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generates a random short code of `length` characters.
///
/// A `length` of zero falls back to [`DEFAULT_CODE_LENGTH`].
///
/// # Errors
///
/// Returns [`AppError::RandomSource`] if the system random number generator
/// fails. The failure is not retried here.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, AppError> {
    let length = if length == 0 {
        DEFAULT_CODE_LENGTH
    } else {
        length
    };

    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; 32];

    while code.len() < length {
        getrandom::fill(&mut buffer).map_err(|e| AppError::RandomSource(e.to_string()))?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_BOUND) {
            if code.len() == length {
                break;
            }
            code.push(ALPHABET[(byte as usize) % ALPHABET.len()] as char);
        }
    }

    Ok(code)
}

/// Returns `true` if `code` would be shadowed by a system route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
