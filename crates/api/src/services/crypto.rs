//! Symmetric encryption of short text values.
//!
//! Key and IV are derived once from the configured secret with
//! PBKDF2-HMAC-SHA1 over a fixed salt, then reused for every call, so equal
//! plaintexts always yield equal ciphertexts under the same secret. Plaintext
//! is treated as UTF-16LE code units; ciphertext is AES-256-CBC with PKCS#7
//! padding, carried as standard base64 text.

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Key-derivation salt. Fixed and shared by all operations; ciphertexts do
/// not carry their own salt.
const KEY_SALT: [u8; 13] = [
    0x49, 0x76, 0x61, 0x6e, 0x20, 0x4d, 0x65, 0x64, 0x76, 0x65, 0x64, 0x65, 0x76,
];

const PBKDF2_ROUNDS: u32 = 1_000;

/// Errors that can occur when decrypting.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Input is not valid base64.
    #[error("ciphertext is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Padding check failed: the ciphertext is corrupt or was produced with
    /// a different secret.
    #[error("ciphertext is corrupt or keyed differently")]
    BadCiphertext,

    /// Decrypted bytes are not a valid UTF-16 sequence.
    #[error("decrypted bytes are not valid UTF-16")]
    BadUtf16,
}

/// Encrypts and decrypts short text values with a key derived from the
/// configured secret.
#[derive(Clone)]
pub struct EncryptionService {
    key: [u8; 32],
    iv: [u8; 16],
}

impl std::fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionService")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

impl EncryptionService {
    /// Derive the AES key and IV from the configured secret.
    ///
    /// One 48-byte PBKDF2 derivation: the first 32 bytes become the AES-256
    /// key, the remaining 16 the CBC IV.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut derived = [0u8; 48];
        pbkdf2_hmac::<Sha1>(
            secret.expose_secret().as_bytes(),
            &KEY_SALT,
            PBKDF2_ROUNDS,
            &mut derived,
        );

        let (key_bytes, iv_bytes) = derived.split_at(32);
        let mut key = [0u8; 32];
        let mut iv = [0u8; 16];
        key.copy_from_slice(key_bytes);
        iv.copy_from_slice(iv_bytes);

        Self { key, iv }
    }

    /// Encrypt a text value, returning base64 ciphertext.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> String {
        let clear: Vec<u8> = plaintext.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let cipher = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(&clear);
        BASE64.encode(cipher)
    }

    /// Decrypt base64 ciphertext produced by [`EncryptionService::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError`] when the input is not base64, the padding
    /// check fails, or the decrypted bytes are not UTF-16. No partial
    /// results are produced.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = BASE64.decode(ciphertext)?;
        let clear = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .map_err(|_| CryptoError::BadCiphertext)?;

        if clear.len() % 2 != 0 {
            return Err(CryptoError::BadUtf16);
        }
        let units: Vec<u16> = clear
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        String::from_utf16(&units).map_err(|_| CryptoError::BadUtf16)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(secret: &str) -> EncryptionService {
        EncryptionService::new(&SecretString::from(secret.to_owned()))
    }

    #[test]
    fn test_roundtrip() {
        let crypto = service("correct horse battery staple");
        for value in ["", "hello", "a longer value with spaces", "0899136868"] {
            let cipher = crypto.encrypt(value);
            assert_eq!(crypto.decrypt(&cipher).unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_non_ascii() {
        let crypto = service("correct horse battery staple");
        let value = "Phạm Ngũ Lão — 日本語 ✓";
        let cipher = crypto.encrypt(value);
        assert_eq!(crypto.decrypt(&cipher).unwrap(), value);
    }

    #[test]
    fn test_deterministic_for_same_secret() {
        let crypto = service("correct horse battery staple");
        assert_eq!(crypto.encrypt("value"), crypto.encrypt("value"));
    }

    #[test]
    fn test_different_secret_does_not_recover_plaintext() {
        let cipher = service("secret one with some length").encrypt("sensitive value");
        match service("secret two with some length").decrypt(&cipher) {
            Ok(recovered) => assert_ne!(recovered, "sensitive value"),
            Err(_) => {} // padding check usually rejects it outright
        }
    }

    #[test]
    fn test_rejects_malformed_base64() {
        let crypto = service("correct horse battery staple");
        assert!(matches!(
            crypto.decrypt("not//valid==base64!!"),
            Err(CryptoError::Base64(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_ciphertext() {
        let crypto = service("correct horse battery staple");
        let cipher = crypto.encrypt("some value");
        let truncated = BASE64.encode(&BASE64.decode(&cipher).unwrap()[..8]);
        assert!(crypto.decrypt(&truncated).is_err());
    }
}
