//! AES-256-GCM encryption of stored session payloads.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use wanderlust_core::error::AppError;

const NONCE_LEN: usize = 12;

/// Encrypts payloads as `base64(nonce || ciphertext)`.
///
/// The key is the SHA-256 digest of the configured session secret.
pub struct PayloadCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher").finish_non_exhaustive()
    }
}

impl PayloadCipher {
    pub fn new(secret: &str) -> Result<Self, AppError> {
        let key = Sha256::digest(secret.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| AppError::crypto(format!("Invalid session key: {e}")))?;
        Ok(Self { cipher })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::crypto(format!("Encryption failed: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>, AppError> {
        let sealed = STANDARD
            .decode(encoded)
            .map_err(|e| AppError::crypto(format!("Invalid payload encoding: {e}")))?;

        if sealed.len() < NONCE_LEN {
            return Err(AppError::crypto("Payload shorter than nonce"));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);

        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| AppError::crypto(format!("Decryption failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ciphertext_is_opaque_and_randomized() {
        let cipher = PayloadCipher::new("a-session-secret-of-enough-length!!").unwrap();
        let a = cipher.encrypt(br#"{"user":"42"}"#).unwrap();
        let b = cipher.encrypt(br#"{"user":"42"}"#).unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("user"));
        assert_eq!(cipher.decrypt(&a).unwrap(), br#"{"user":"42"}"#);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let sealed = PayloadCipher::new("first-secret-first-secret-first-secret")
            .unwrap()
            .encrypt(b"payload")
            .unwrap();
        let other = PayloadCipher::new("second-secret-second-secret-second-sec").unwrap();
        assert!(other.decrypt(&sealed).is_err());
        assert!(other.decrypt("%%%").is_err());
        assert!(other.decrypt("AAAA").is_err());
    }
}
