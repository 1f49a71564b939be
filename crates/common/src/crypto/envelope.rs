//! Tagged binary envelopes and the algorithm registry
//!
//! Every signing key is persisted as a [`KeyEnvelope`]:
//!
//! ```text
//! [ key_type: u32 LE ][ data_len: u64 LE ][ data: data_len bytes ]
//! ```
//!
//! (bincode encoding of `{ key_type, data }`). The tag is resolved through a
//!  [`KeyRegistry`], which is the single place new algorithms are plugged in.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
use super::error::KeyError;
use super::key::{KeyType, PrivateKey, PublicKey};

/// Builds a private key from raw key bytes
pub type PrivKeyUnmarshaller = fn(&[u8]) -> Result<PrivateKey, KeyError>;
/// Builds a public key from raw key bytes
pub type PubKeyUnmarshaller = fn(&[u8]) -> Result<PublicKey, KeyError>;

/// Tagged serialized key
///
/// The tag is kept as a raw `u32` so that envelopes written by a build that
///  knows more algorithms still parse, and fail later with a precise
///  `UnsupportedKeyType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyEnvelope {
    key_type: u32,
    data: Vec<u8>,
}

impl KeyEnvelope {
    pub fn new(key_type: KeyType, data: Vec<u8>) -> Self {
        Self {
            key_type: key_type.tag(),
            data,
        }
    }

    /// Resolve the tag to a known algorithm
    pub fn key_type(&self) -> Result<KeyType, KeyError> {
        KeyType::try_from(self.key_type)
    }

    /// The raw tag as found on the wire
    pub fn tag(&self) -> u32 {
        self.key_type
    }

    /// Raw key bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Maps algorithm tags to key constructors
///
/// A registry is immutable once built: [`KeyRegistry::register`] consumes
///  and returns the registry, so construction happens up front. The
///  process-wide instance from [`KeyRegistry::global`] is built on first use
///  and only ever read afterwards.
#[derive(Clone, Default)]
pub struct KeyRegistry {
    private: HashMap<KeyType, PrivKeyUnmarshaller>,
    public: HashMap<KeyType, PubKeyUnmarshaller>,
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut private: Vec<_> = self.private.keys().collect();
        let mut public: Vec<_> = self.public.keys().collect();
        private.sort();
        public.sort();
        f.debug_struct("KeyRegistry")
            .field("private", &private)
            .field("public", &public)
            .finish()
    }
}

impl KeyRegistry {
    /// A registry with every algorithm this build supports
    pub fn with_defaults() -> Self {
        Self::default().register(
            KeyType::Ed25519,
            |data| Ed25519PrivateKey::from_raw(data).map(PrivateKey::from),
            |data| Ed25519PublicKey::from_raw(data).map(PublicKey::from),
        )
    }

    /// The shared, read-only registry
    pub fn global() -> &'static KeyRegistry {
        static REGISTRY: OnceLock<KeyRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::with_defaults)
    }

    /// Add (or replace) the constructors for an algorithm
    pub fn register(
        mut self,
        key_type: KeyType,
        private: PrivKeyUnmarshaller,
        public: PubKeyUnmarshaller,
    ) -> Self {
        self.private.insert(key_type, private);
        self.public.insert(key_type, public);
        self
    }

    pub fn supports(&self, key_type: KeyType) -> bool {
        self.private.contains_key(&key_type) && self.public.contains_key(&key_type)
    }

    /// Parse an envelope and build the private key it carries
    pub fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<PrivateKey, KeyError> {
        let envelope = KeyEnvelope::from_bytes(bytes)?;
        let unmarshal = envelope
            .key_type()
            .ok()
            .and_then(|key_type| self.private.get(&key_type))
            .ok_or(KeyError::UnsupportedKeyType(envelope.tag()))?;
        unmarshal(envelope.data())
    }

    /// Parse an envelope and build the public key it carries
    pub fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<PublicKey, KeyError> {
        let envelope = KeyEnvelope::from_bytes(bytes)?;
        let unmarshal = envelope
            .key_type()
            .ok()
            .and_then(|key_type| self.public.get(&key_type))
            .ok_or(KeyError::UnsupportedKeyType(envelope.tag()))?;
        unmarshal(envelope.data())
    }
}

/// Decode a private key envelope with the global registry
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<PrivateKey, KeyError> {
    KeyRegistry::global().unmarshal_private_key(bytes)
}

/// Decode a public key envelope with the global registry
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    KeyRegistry::global().unmarshal_public_key(bytes)
}

/// Encode bytes as standard base64 for config files
pub fn encode_config_key(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64 from a config file
pub fn decode_config_key(encoded: &str) -> Result<Vec<u8>, KeyError> {
    Ok(BASE64.decode(encoded)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::key::{Key, PrivKey};
    use rand_core::OsRng;

    #[test]
    fn test_marshal_roundtrip() {
        let (private, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();

        let private_bytes = private.to_envelope().unwrap();
        let recovered = unmarshal_private_key(&private_bytes).unwrap();
        assert_eq!(recovered, PrivateKey::from(private.clone()));

        let public_bytes = public.to_envelope().unwrap();
        let recovered = unmarshal_public_key(&public_bytes).unwrap();
        assert_eq!(recovered, PublicKey::from(public));
        assert_eq!(recovered, PrivateKey::from(private).public());
    }

    #[test]
    fn test_envelope_layout() {
        let envelope = KeyEnvelope::new(KeyType::Ed25519, vec![0xAA; 3]);
        let bytes = envelope.to_bytes().unwrap();
        // tag (u32) + length (u64) + data
        assert_eq!(bytes.len(), 4 + 8 + 3);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..12], &3u64.to_le_bytes());
        assert_eq!(&bytes[12..], &[0xAA; 3]);
        assert_eq!(KeyEnvelope::from_bytes(&bytes).unwrap(), envelope);
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let bytes = bincode::serialize(&KeyEnvelope {
            key_type: 42,
            data: vec![0u8; 32],
        })
        .unwrap();
        assert!(matches!(
            unmarshal_public_key(&bytes),
            Err(KeyError::UnsupportedKeyType(42))
        ));
        assert!(matches!(
            unmarshal_private_key(&bytes),
            Err(KeyError::UnsupportedKeyType(42))
        ));
    }

    #[test]
    fn test_unregistered_type_is_unsupported() {
        let (_, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();
        let bytes = public.to_envelope().unwrap();

        let registry = KeyRegistry::default();
        assert!(!registry.supports(KeyType::Ed25519));
        assert!(matches!(
            registry.unmarshal_public_key(&bytes),
            Err(KeyError::UnsupportedKeyType(0))
        ));
    }

    #[test]
    fn test_wrong_data_size_is_rejected() {
        let envelope = KeyEnvelope::new(KeyType::Ed25519, vec![1u8; 16]);
        let bytes = envelope.to_bytes().unwrap();
        assert!(matches!(
            unmarshal_public_key(&bytes),
            Err(KeyError::InvalidKeyLength {
                expected: 32,
                got: 16
            })
        ));
        assert!(matches!(
            unmarshal_private_key(&bytes),
            Err(KeyError::InvalidKeyLength {
                expected: 64,
                got: 16
            })
        ));
    }

    #[test]
    fn test_truncated_envelope_is_malformed() {
        let (_, public) = Ed25519PrivateKey::generate(&mut OsRng).unwrap();
        let bytes = public.to_envelope().unwrap();
        assert!(matches!(
            unmarshal_public_key(&bytes[..bytes.len() - 1]),
            Err(KeyError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_global_registry_defaults() {
        let registry = KeyRegistry::global();
        for key_type in KeyType::ALL {
            assert!(registry.supports(key_type));
        }
        assert!(format!("{:?}", registry).contains("Ed25519"));
    }

    #[test]
    fn test_config_key_encoding() {
        let bytes = [0u8, 1, 2, 254, 255];
        let encoded = encode_config_key(&bytes);
        assert_eq!(decode_config_key(&encoded).unwrap(), bytes);
        assert!(matches!(
            decode_config_key("%%%"),
            Err(KeyError::InvalidEncoding(_))
        ));
    }
}
