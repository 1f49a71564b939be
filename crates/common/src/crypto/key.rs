//! Capability traits shared by every key algorithm
//!
//! Two independent families live here:
//!
//! - **Signing keys**: [`Key`] + [`PrivKey`] (sign, derive public) and
//!   [`PubKey`] (verify). These are tagged with a [`KeyType`] and travel
//!   inside a [`KeyEnvelope`](super::KeyEnvelope).
//! - **Encryption keys**: [`EncryptionKey`] + [`PrivCKey`] (encrypt, decrypt).
//!   These are always 32 raw bytes and carry no tag on the wire.
//!
//! [`PrivateKey`] and [`PublicKey`] are the tagged variants callers hold when
//!  they do not care which signing algorithm sits underneath.

use std::fmt;

use rand_core::CryptoRngCore;

use super::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
use super::envelope::{decode_config_key, encode_config_key, KeyEnvelope, KeyRegistry};
use super::error::{CipherError, KeyError};

/// Size of every encryption key (private or public) in bytes
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Algorithm tag carried by a key envelope
///
/// The discriminant is the on-wire tag and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum KeyType {
    Ed25519 = 0,
}

impl KeyType {
    /// Every algorithm this build knows about
    pub const ALL: [KeyType; 1] = [KeyType::Ed25519];

    /// The numeric tag written into envelopes
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for KeyType {
    type Error = KeyError;
    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.tag() == tag)
            .ok_or(KeyError::UnsupportedKeyType(tag))
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Ed25519 => write!(f, "Ed25519"),
        }
    }
}

/// A signing key that can be tagged, compared and serialized
pub trait Key {
    /// The algorithm tag of this key
    fn key_type(&self) -> KeyType;

    /// Raw key bytes, not wrapped in an envelope
    ///
    /// This is the inverse of the constructor registered for
    ///  [`Key::key_type`] in the [`KeyRegistry`].
    fn raw(&self) -> Vec<u8>;

    /// Serialize the key into a tagged binary envelope
    fn to_envelope(&self) -> Result<Vec<u8>, KeyError> {
        KeyEnvelope::new(self.key_type(), self.raw()).to_bytes()
    }

    /// Envelope wrapped in standard base64, as stored in config files
    fn to_base64(&self) -> Result<String, KeyError> {
        Ok(encode_config_key(&self.to_envelope()?))
    }
}

/// A private signing key
pub trait PrivKey: Key {
    type Public: PubKey;

    /// Sign the full message
    fn sign(&self, msg: &[u8]) -> Vec<u8>;

    /// The public key paired with this private key
    fn public(&self) -> Self::Public;
}

/// A public signing key
pub trait PubKey: Key {
    /// Check `sig` against `data`
    ///
    /// A mismatch is `Ok(false)`. An error means the signature could not
    ///  even be parsed for this algorithm.
    fn verify(&self, data: &[u8], sig: &[u8]) -> Result<bool, KeyError>;
}

/// A 32-byte encryption key (either half of a box keypair)
pub trait EncryptionKey {
    fn raw(&self) -> [u8; ENCRYPTION_KEY_SIZE];

    fn to_base64(&self) -> String {
        encode_config_key(&self.raw())
    }
}

/// A private encryption key able to seal and open messages with a peer
pub trait PrivCKey: EncryptionKey {
    type Public: EncryptionKey;

    /// Seal `plaintext` for `recipient`
    fn encrypt(&self, recipient: &Self::Public, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Open a message sealed by `sender`
    fn decrypt(&self, sender: &Self::Public, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// Private signing key of any supported algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Ed25519(Ed25519PrivateKey),
}

/// Public signing key of any supported algorithm
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
}

impl From<Ed25519PrivateKey> for PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        PrivateKey::Ed25519(key)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        PublicKey::Ed25519(key)
    }
}

impl Key for PrivateKey {
    fn key_type(&self) -> KeyType {
        match self {
            PrivateKey::Ed25519(key) => key.key_type(),
        }
    }

    fn raw(&self) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.raw(),
        }
    }
}

impl PrivKey for PrivateKey {
    type Public = PublicKey;

    fn sign(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            PrivateKey::Ed25519(key) => key.sign(msg),
        }
    }

    fn public(&self) -> PublicKey {
        match self {
            PrivateKey::Ed25519(key) => key.public().into(),
        }
    }
}

impl Key for PublicKey {
    fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Ed25519(key) => key.key_type(),
        }
    }

    fn raw(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(key) => key.raw(),
        }
    }
}

impl PubKey for PublicKey {
    fn verify(&self, data: &[u8], sig: &[u8]) -> Result<bool, KeyError> {
        match self {
            PublicKey::Ed25519(key) => key.verify(data, sig),
        }
    }
}

impl PrivateKey {
    /// Decode an envelope using the process-wide registry
    pub fn from_envelope(bytes: &[u8]) -> Result<Self, KeyError> {
        KeyRegistry::global().unmarshal_private_key(bytes)
    }

    /// Decode a base64 envelope, as stored in config files
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_envelope(&decode_config_key(encoded)?)
    }
}

impl PublicKey {
    /// Decode an envelope using the process-wide registry
    pub fn from_envelope(bytes: &[u8]) -> Result<Self, KeyError> {
        KeyRegistry::global().unmarshal_public_key(bytes)
    }

    /// Decode a base64 envelope, as stored in config files
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_envelope(&decode_config_key(encoded)?)
    }
}

/// Generate a signing keypair for the given algorithm
///
/// Use `KeyType::try_from(tag)` first when the algorithm arrives as a
///  raw numeric tag.
pub fn generate_key_pair<R>(
    key_type: KeyType,
    rng: &mut R,
) -> Result<(PrivateKey, PublicKey), KeyError>
where
    R: CryptoRngCore + ?Sized,
{
    match key_type {
        KeyType::Ed25519 => {
            let (private, public) = Ed25519PrivateKey::generate(rng)?;
            Ok((private.into(), public.into()))
        }
    }
}

/// Compare two keys of possibly different concrete types through their
///  envelope encoding
pub fn key_equal(a: &dyn Key, b: &dyn Key) -> bool {
    match (a.to_envelope(), b.to_envelope()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
