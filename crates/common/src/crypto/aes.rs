use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand_core::{CryptoRngCore, OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::envelope::{decode_config_key, encode_config_key};
use super::error::{CipherError, KeyError};

/// Size of an AES-256 key in bytes
pub const AES_KEY_SIZE: usize = 32;
/// Size of the GCM nonce prefixed to every ciphertext
pub const AES_NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag
pub const AES_TAG_SIZE: usize = 16;

/// Encrypt `plaintext` under a 32-byte key
///
/// Output is `nonce(12) || ciphertext || tag(16)`, with a fresh nonce from
///  the OS random source.
///
/// # Errors
///
/// Returns an error if:
/// - The key is not exactly `AES_KEY_SIZE` bytes
/// - The random source fails to produce a nonce
pub fn aes256_encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    aes256_encrypt_with_rng(key, plaintext, &mut OsRng)
}

/// Same as [`aes256_encrypt`] with an explicit nonce source
pub fn aes256_encrypt_with_rng<R>(
    key: &[u8],
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, CipherError>
where
    R: CryptoRngCore + ?Sized,
{
    let cipher = cipher(key)?;

    let mut nonce = [0u8; AES_NONCE_SIZE];
    rng.try_fill_bytes(&mut nonce)
        .map_err(|e| CipherError::RandomSourceExhausted(e.to_string()))?;

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CipherError::EncryptionFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypt a `nonce(12) || ciphertext || tag(16)` message
///
/// # Errors
///
/// Returns an error if:
/// - The key is not exactly `AES_KEY_SIZE` bytes
/// - The input is shorter than the nonce
/// - Authentication fails
pub fn aes256_decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = cipher(key)?;

    if ciphertext.len() < AES_NONCE_SIZE {
        return Err(CipherError::CiphertextTooShort {
            expected: AES_NONCE_SIZE,
            got: ciphertext.len(),
        });
    }
    let (nonce, sealed) = ciphertext.split_at(AES_NONCE_SIZE);

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CipherError::DecryptionFailed)
}

fn cipher(key: &[u8]) -> Result<Aes256Gcm, CipherError> {
    if key.len() != AES_KEY_SIZE {
        return Err(CipherError::InvalidKeyLength {
            expected: AES_KEY_SIZE,
            got: key.len(),
        });
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength {
        expected: AES_KEY_SIZE,
        got: key.len(),
    })
}

/// A 256-bit symmetric key
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; AES_KEY_SIZE]);

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

impl SymmetricKey {
    /// Draw 32 fresh random bytes
    pub fn generate<R>(rng: &mut R) -> Result<Self, KeyError>
    where
        R: CryptoRngCore + ?Sized,
    {
        let mut key = [0u8; AES_KEY_SIZE];
        rng.try_fill_bytes(&mut key)
            .map_err(|e| KeyError::RandomSourceExhausted(e.to_string()))?;
        let out = Self(key);
        key.zeroize();
        Ok(out)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, KeyError> {
        data.try_into()
            .map(Self)
            .map_err(|_| KeyError::InvalidKeyLength {
                expected: AES_KEY_SIZE,
                got: data.len(),
            })
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_SIZE] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        encode_config_key(&self.0)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_slice(&decode_config_key(encoded)?)
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        aes256_encrypt(&self.0, plaintext)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        aes256_decrypt(&self.0, ciphertext)
    }
}
