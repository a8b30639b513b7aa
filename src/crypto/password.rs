use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_BYTES: usize = 16;

/// Never matches a real password; login compares against it when the email is unknown.
pub const DUMMY_HASH: &str =
    "00000000000000000000000000000000:0000000000000000000000000000000000000000000000000000000000000000";

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password as `salt:sha256(password ++ salt)` with a fresh salt.
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    format!("{}:{}", salt, digest(password, &salt))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match stored_hash.split_once(':') {
        Some((salt, expected)) => digest(password, salt)
            .as_bytes()
            .ct_eq(expected.as_bytes())
            .into(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify() {
        let hash = hash_password("pw123");
        assert!(verify_password("pw123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_salt_is_fresh() {
        let first = hash_password("pw123");
        let second = hash_password("pw123");
        assert_ne!(first, second);
        assert!(verify_password("pw123", &first));
        assert!(verify_password("pw123", &second));
    }

    #[test]
    fn test_hash_format() {
        let hash = hash_password("pw123");
        let (salt, digest) = hash.split_once(':').unwrap();
        assert_eq!(SALT_BYTES * 2, salt.len());
        assert_eq!(64, digest.len());
        assert!(hash.chars().all(|c| c == ':' || c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verifies_existing_hash() {
        let stored = "5f2b8c1e9a7d4036b1c2d3e4f5a6b7c8:8d2d923149eaa604fc4ec8c509ac3b0408f43cc8d17cbd5fac50c747f0984acf";
        assert!(verify_password("pw123", stored));
        assert!(!verify_password("pw1234", stored));
    }

    #[rstest::rstest]
    #[case("")]
    #[case("no-separator")]
    #[case("salt:")]
    #[case(DUMMY_HASH)]
    #[case("5f2b8c1e9a7d4036b1c2d3e4f5a6b7c8:8d2d923149eaa604")]
    #[case("5f2b8c1e9a7d4036b1c2d3e4f5a6b7c8:8d2d923149eaa604fc4ec8c509ac3b0408f43cc8d17cbd5fac50c747f0984acf00")]
    fn test_rejects_unusable_hash(#[case] stored: &str) {
        assert!(!verify_password("pw123", stored));
        assert!(!verify_password("", stored));
    }
}
