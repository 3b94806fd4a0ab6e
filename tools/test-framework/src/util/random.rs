/*!
   Utilities for random value generation.
*/

use rand::Rng;

/// Generates a random `u32` value.
pub fn random_u32() -> u32 {
    let mut rng = rand::thread_rng();
    rng.gen()
}

/// Generates a random `u64` value.
pub fn random_u64() -> u64 {
    let mut rng = rand::thread_rng();
    rng.gen()
}

/// Generates a random string value, in the form of `u64` hex for simplicity.
pub fn random_string() -> String {
    format!("{:x}", random_u64())
}

/**
   Turn an arbitrary name into something usable as a docker resource
   name or keyring key name.
*/
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_test_paths() {
        assert_eq!(
            sanitize_name("tests::interchain_accounts::Test/1"),
            "tests--interchain_accounts--test-1"
        );
    }

    #[test]
    fn random_strings_are_hex() {
        let s = random_string();
        assert!(!s.is_empty());
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
