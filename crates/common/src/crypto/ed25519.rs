use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use super::envelope::KeyEnvelope;
use super::error::KeyError;
use super::key::{Key, KeyType, PrivKey, PubKey};

/// Size of an Ed25519 seed in bytes
pub const SEED_SIZE: usize = ed25519_dalek::SECRET_KEY_LENGTH;
/// Size of Ed25519 private key material in bytes (seed || public key)
pub const PRIVATE_KEY_SIZE: usize = ed25519_dalek::KEYPAIR_LENGTH;
/// Size of Ed25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Ed25519 private key
///
/// Raw form is the 64-byte concatenation `seed || public_key`. Equality is
///  constant-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PrivateKey(SigningKey);

/// Ed25519 public key
///
/// Any 32 bytes are accepted. The point is only decompressed when verifying,
///  and bytes that are not a curve point never verify anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; PUBLIC_KEY_SIZE]);

impl Ed25519PrivateKey {
    /// Generate a new keypair from a cryptographically secure random source
    pub fn generate<R>(rng: &mut R) -> Result<(Self, Ed25519PublicKey), KeyError>
    where
        R: CryptoRngCore + ?Sized,
    {
        let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
        rng.try_fill_bytes(&mut seed[..])
            .map_err(|e| KeyError::RandomSourceExhausted(e.to_string()))?;

        let private = Self(SigningKey::from_bytes(&seed));
        let public = private.public();
        Ok((private, public))
    }

    /// Build a private key from its raw 64-byte `seed || public_key` form
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The slice is not exactly `PRIVATE_KEY_SIZE` bytes
    /// - The public half does not belong to the seed
    pub fn from_raw(data: &[u8]) -> Result<Self, KeyError> {
        let bytes: &[u8; PRIVATE_KEY_SIZE] =
            data.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                got: data.len(),
            })?;
        SigningKey::from_keypair_bytes(bytes)
            .map(Self)
            .map_err(|_| KeyError::InvalidKeyBytes)
    }

    /// Build a private key from a serialized key envelope
    ///
    /// Unlike the registry path this refuses envelopes tagged for any other
    ///  algorithm.
    pub fn from_envelope(bytes: &[u8]) -> Result<Self, KeyError> {
        let envelope = KeyEnvelope::from_bytes(bytes)?;
        match envelope.key_type()? {
            KeyType::Ed25519 => Self::from_raw(envelope.data()),
        }
    }

    /// The 32-byte seed
    pub fn seed(&self) -> Zeroizing<[u8; SEED_SIZE]> {
        Zeroizing::new(self.0.to_bytes())
    }
}

impl Key for Ed25519PrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Vec<u8> {
        self.0.to_keypair_bytes().to_vec()
    }
}

impl PrivKey for Ed25519PrivateKey {
    type Public = Ed25519PublicKey;

    fn sign(&self, msg: &[u8]) -> Vec<u8> {
        self.0.sign(msg).to_bytes().to_vec()
    }

    fn public(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key().to_bytes())
    }
}

impl Ed25519PublicKey {
    /// Build a public key from exactly `PUBLIC_KEY_SIZE` raw bytes
    pub fn from_raw(data: &[u8]) -> Result<Self, KeyError> {
        let bytes: &[u8; PUBLIC_KEY_SIZE] =
            data.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                got: data.len(),
            })?;
        Ok(Self(*bytes))
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }
}

impl TryFrom<&[u8]> for Ed25519PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_raw(bytes)
    }
}

impl Key for Ed25519PublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl PubKey for Ed25519PublicKey {
    fn verify(&self, data: &[u8], sig: &[u8]) -> Result<bool, KeyError> {
        let signature =
            Signature::from_slice(sig).map_err(|_| KeyError::InvalidSignatureLength {
                expected: SIGNATURE_SIZE,
                got: sig.len(),
            })?;
        // Non-strict: small-order components are accepted
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return Ok(false);
        };
        Ok(key.verify(data, &signature).is_ok())
    }
}
