//! Master password generation
//!
//! Redshift requires a master password at create time; when the config omits
//! one we generate it from the OS secure random source. Letters and digits
//! only, so the value never needs URL-escaping in the connection string.

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;

/// Default length used when the config omits `master_password`
pub const DEFAULT_LENGTH: usize = 16;

/// Generate a random alphanumeric password of exactly `len` characters
pub fn generate(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_length() {
        for len in [0, 1, 16, 64] {
            assert_eq!(generate(len).len(), len);
        }
    }

    #[test]
    fn letters_and_digits_only() {
        let password = generate(256);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn two_draws_differ() {
        // 62^16 possibilities; a collision here means the source is broken
        assert_ne!(generate(DEFAULT_LENGTH), generate(DEFAULT_LENGTH));
    }
}
