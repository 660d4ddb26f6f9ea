use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260_000;
const KEY_LENGTH: usize = 32;

/// Hash a password with PBKDF2-HMAC-SHA256 and a random 16-byte salt.
/// Stored as `pbkdf2:sha256:iterations$salt$hash` (base64 URL-safe, no pad).
pub fn hash_password(password: &str) -> Result<String, String> {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|e| format!("PBKDF2 failure: {e}"))?;

    Ok(format!(
        "pbkdf2:sha256:{ITERATIONS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Verify a password against a stored `pbkdf2:sha256:…` hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 3 {
        return Err("Invalid hash format".to_string());
    }

    let header: Vec<&str> = parts[0].split(':').collect();
    if header.len() != 3 || header[0] != "pbkdf2" || header[1] != "sha256" {
        return Err("Invalid hash header".to_string());
    }
    let iterations: u32 = header[2]
        .parse()
        .map_err(|_| "Invalid iteration count".to_string())?;

    let salt = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| format!("Invalid salt encoding: {e}"))?;
    let expected = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|e| format!("Invalid hash encoding: {e}"))?;

    let mut computed = vec![0u8; expected.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| format!("PBKDF2 failure: {e}"))?;

    Ok(computed.ct_eq(&expected).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("s3cret-passphrase").unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:"));
        assert!(verify_password("s3cret-passphrase", &hash).unwrap());
        assert!(!verify_password("wrong-passphrase", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        assert!(verify_password("whatever", "not-a-hash").is_err());
    }
}
