use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{distributions::Alphanumeric, rngs::OsRng, thread_rng, Rng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(password_hash)
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hashed)?;
    let ok = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(ok)
}

/// Random alphanumeric token for verification and reset links.
pub fn generate_one_time_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Hex SHA-256 digest; one-time tokens are stored only in this form.
pub fn digest_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub fn token_matches(token: &str, stored_digest: &str) -> bool {
    let digest = digest_token(token);
    digest.as_bytes().ct_eq(stored_digest.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hashed = hash_password("s3cret!pw").unwrap();
        assert!(verify_password("s3cret!pw", &hashed).unwrap());
        assert!(!verify_password("other!pw1", &hashed).unwrap());
    }

    #[test]
    fn token_digest_comparison() {
        let stored = digest_token("abc123");
        assert!(token_matches("abc123", &stored));
        assert!(!token_matches("abc124", &stored));
    }
}
