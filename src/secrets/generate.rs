//! Generation of replacement sign-in credentials.

use rand::rngs::OsRng;
use rand::Rng;
use secrecy::SecretString;

/// Shortest credential the generator will produce.
pub const MIN_CREDENTIAL_LENGTH: usize = 20;

/// Length used when nothing else is configured.
pub const DEFAULT_CREDENTIAL_LENGTH: usize = 24;

/// Characters credentials are sampled from.
///
/// Spans upper case, lower case, digits and punctuation so a sample is very
/// likely to satisfy directory complexity rules. A single sample is not
/// guaranteed to contain every class.
pub const CREDENTIAL_POOL: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{};:,.<>?";

/// Generate a random credential of at least [`MIN_CREDENTIAL_LENGTH`] characters.
///
/// Characters are drawn uniformly from [`CREDENTIAL_POOL`] with the OS RNG.
/// Shorter requested lengths are raised to the minimum.
pub fn generate_credential(length: usize) -> SecretString {
    let length = length.max(MIN_CREDENTIAL_LENGTH);
    let mut rng = OsRng;
    let value: String = (0..length)
        .map(|_| CREDENTIAL_POOL[rng.gen_range(0..CREDENTIAL_POOL.len())] as char)
        .collect();
    SecretString::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn pool_spans_all_four_classes() {
        let pool = std::str::from_utf8(CREDENTIAL_POOL).unwrap();
        assert!(pool.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pool.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pool.chars().any(|c| c.is_ascii_digit()));
        assert!(pool.chars().any(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn pool_contains_full_alphanumeric_ranges() {
        for c in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            assert!(CREDENTIAL_POOL.contains(&(c as u8)), "missing {}", c);
        }
    }

    #[test]
    fn pool_is_printable_ascii_without_whitespace_or_quotes() {
        for &b in CREDENTIAL_POOL {
            assert!(b.is_ascii_graphic(), "non-graphic byte {}", b);
            assert!(!matches!(b, b'"' | b'\'' | b'\\' | b'`'));
        }
    }

    #[test]
    fn default_length_is_at_least_minimum() {
        let credential = generate_credential(DEFAULT_CREDENTIAL_LENGTH);
        assert_eq!(credential.expose_secret().len(), DEFAULT_CREDENTIAL_LENGTH);
        assert!(DEFAULT_CREDENTIAL_LENGTH >= MIN_CREDENTIAL_LENGTH);
    }

    #[test]
    fn short_lengths_are_raised_to_minimum() {
        for requested in [0, 1, 8, 19] {
            let credential = generate_credential(requested);
            assert_eq!(credential.expose_secret().len(), MIN_CREDENTIAL_LENGTH);
        }
    }

    #[test]
    fn longer_lengths_are_honored() {
        let credential = generate_credential(64);
        assert_eq!(credential.expose_secret().len(), 64);
    }

    #[test]
    fn every_character_comes_from_pool() {
        let credential = generate_credential(200);
        assert!(credential
            .expose_secret()
            .bytes()
            .all(|b| CREDENTIAL_POOL.contains(&b)));
    }

    #[test]
    fn successive_credentials_differ() {
        let a = generate_credential(DEFAULT_CREDENTIAL_LENGTH);
        let b = generate_credential(DEFAULT_CREDENTIAL_LENGTH);
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn debug_output_does_not_reveal_value() {
        let credential = generate_credential(DEFAULT_CREDENTIAL_LENGTH);
        let debug = format!("{:?}", credential);
        assert!(!debug.contains(credential.expose_secret()));
    }
}
