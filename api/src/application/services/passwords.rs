use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

/// Argon2id PHC string with default parameters that matches no password.
/// Verified against when the account does not exist so both login failures cost the same.
pub const UNMATCHABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$q9RVbvPskQltWS2T9F4MtQ$CKMc9CZ2ApxuL2qnaPJSoa0Ygv0pAk/1myp0c+kc9Z8";

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// A stored hash that does not parse never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn unmatchable_hash_runs_a_real_verify() {
        let parsed = PasswordHash::new(UNMATCHABLE_HASH).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(!verify_password("correct horse", UNMATCHABLE_HASH));
        assert!(!verify_password("", UNMATCHABLE_HASH));
    }

    #[test]
    fn garbage_hash_is_rejected() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }
}
