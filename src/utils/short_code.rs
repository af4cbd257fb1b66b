//! Short code encoding, random generation, and custom alias validation.
//!
//! Generated codes are base62 renderings of a few cryptographically random
//! bytes. Custom aliases are chosen by an operator and only need to be
//! URL-path safe.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Symbols in ascending digit order: `0-9`, then `A-Z`, then `a-z`.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of random bytes drawn for each generated code.
pub const CODE_BYTES: usize = 5;

static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_.]+$").expect("alias pattern is valid"));

/// Encodes `bytes`, read as a big-endian unsigned integer, in base62.
///
/// The most significant digit comes first. Leading zero bytes carry no
/// value, and an empty or all-zero input encodes to `"0"`.
///
/// ```
/// use site_edge::utils::short_code::encode;
///
/// assert_eq!(encode(&[]), "0");
/// assert_eq!(encode(&[62]), "10");
/// assert_eq!(encode(&[1, 0]), "48");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    // Little-endian base62 digits of the value accumulated so far.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 2);

    for &byte in bytes {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            let value = u32::from(*digit) * 256 + carry;
            *digit = (value % 62) as u8;
            carry = value / 62;
        }
        while carry > 0 {
            digits.push((carry % 62) as u8);
            carry /= 62;
        }
    }

    if digits.is_empty() {
        return (ALPHABET[0] as char).to_string();
    }

    digits
        .iter()
        .rev()
        .map(|&d| ALPHABET[usize::from(d)] as char)
        .collect()
}

/// Draws [`CODE_BYTES`] bytes from the operating system RNG and encodes them.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(encode(&buffer))
}

/// Validates an operator-supplied custom alias.
///
/// Allowed characters are ASCII letters, digits, `-`, `_` and `.`; the alias
/// must not be empty.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with message `Invalid custom slug: <alias>`.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if !CUSTOM_ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            format!("Invalid custom slug: {alias}"),
            json!({ "alias": alias, "allowed": "A-Z a-z 0-9 - _ ." }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_empty_and_zero() {
        assert_eq!(encode(&[]), "0");
        assert_eq!(encode(&[0]), "0");
        assert_eq!(encode(&[0, 0, 0, 0, 0]), "0");
    }

    #[test]
    fn test_encode_single_digits() {
        assert_eq!(encode(&[1]), "1");
        assert_eq!(encode(&[9]), "9");
        assert_eq!(encode(&[10]), "A");
        assert_eq!(encode(&[35]), "Z");
        assert_eq!(encode(&[36]), "a");
        assert_eq!(encode(&[61]), "z");
    }

    #[test]
    fn test_encode_carries_into_next_digit() {
        assert_eq!(encode(&[62]), "10");
        assert_eq!(encode(&[255]), "47");
        assert_eq!(encode(&[1, 0]), "48");
    }

    #[test]
    fn test_encode_is_big_endian() {
        assert_ne!(encode(&[1, 2]), encode(&[2, 1]));
        // 0x0102 = 258 = 4 * 62 + 10
        assert_eq!(encode(&[1, 2]), "4A");
    }

    #[test]
    fn test_encode_ignores_leading_zero_bytes() {
        assert_eq!(encode(&[0, 0, 1, 0]), encode(&[1, 0]));
    }

    #[test]
    fn test_encode_max_five_bytes() {
        // 2^40 - 1 = 1099511627775
        assert_eq!(encode(&[0xFF; 5]), "JMAIjoV");
    }

    #[test]
    fn test_encode_matches_integer_division() {
        for value in [0u64, 1, 61, 62, 3843, 3844, 238_327, 1 << 39, (1 << 40) - 1] {
            let bytes = value.to_be_bytes();
            let mut expected = Vec::new();
            let mut n = value;
            loop {
                expected.push(ALPHABET[(n % 62) as usize]);
                n /= 62;
                if n == 0 {
                    break;
                }
            }
            expected.reverse();
            assert_eq!(encode(&bytes), String::from_utf8(expected).unwrap());
        }
    }

    #[test]
    fn test_encode_is_deterministic_and_in_alphabet() {
        let inputs: [&[u8]; 4] = [b"hello", &[0xde, 0xad, 0xbe, 0xef], &[7; 32], &[0, 255, 0]];
        for input in inputs {
            let first = encode(input);
            assert_eq!(first, encode(input));
            assert!(first.bytes().all(|b| ALPHABET.contains(&b)));
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn test_generate_code_shape() {
        let code = generate_code().unwrap();
        assert!(!code.is_empty());
        assert!(code.len() <= 7);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_varies() {
        let codes: HashSet<String> = (0..200).map(|_| generate_code().unwrap()).collect();
        assert!(codes.len() > 190);
    }

    #[test]
    fn test_validate_custom_alias_accepts_allowed_characters() {
        for alias in ["custom1", "My-Link", "under_score", "v1.2.3", "A", "-._"] {
            assert!(validate_custom_alias(alias).is_ok(), "{alias} should be valid");
        }
    }

    #[test]
    fn test_validate_custom_alias_rejects_space() {
        let err = validate_custom_alias("bad slug").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Invalid custom slug: bad slug");
    }

    #[test]
    fn test_validate_custom_alias_rejects_other_characters() {
        for alias in ["a/b", "a?b", "ümlaut", "emoji🙂", "percent%20", ""] {
            assert!(validate_custom_alias(alias).is_err(), "{alias} should be invalid");
        }
    }
}
