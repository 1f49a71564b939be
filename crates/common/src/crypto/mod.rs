//! Cryptographic primitives for sigil
//!
//! This module provides the key capability model and the algorithm adapters
//!  that sit behind it:
//!
//! - **Signing**: Ed25519 keypairs, behind the [`PrivKey`] / [`PubKey`] traits
//! - **Two-party encryption**: Curve25519 box (X25519 + XSalsa20-Poly1305),
//!   behind [`PrivCKey`]
//! - **Symmetric encryption**: AES-256-GCM with a random 12-byte nonce
//! - **Hashing**: BLAKE2Xb expansion to 256 bytes, and `0x` address checks
//!
//! # Serialized forms
//!
//! ## Signing keys
//! Signing keys travel as a tagged [`KeyEnvelope`] (bincode of
//!  `{ key_type: u32, data: bytes }`). The [`KeyRegistry`] maps the tag back to
//!  a constructor. Private data is `seed || public_key` (64 bytes), public data
//!  is the 32-byte point.
//!
//! ## Encryption keys
//! Box keys are exactly 32 raw bytes with no tag.
//!
//! ## Ciphertexts
//! - Box: `nonce(24) || sealed`
//! - AES-256-GCM: `nonce(12) || ciphertext || tag(16)`
//!
//! Nonces are always drawn from the random source, never supplied by the
//!  caller.

mod aes;
mod curve25519;
mod ed25519;
mod envelope;
mod error;
mod hash;
mod key;
#[cfg(test)]
mod test_rng;

pub use aes::{
    aes256_decrypt, aes256_encrypt, aes256_encrypt_with_rng, SymmetricKey, AES_KEY_SIZE,
    AES_NONCE_SIZE, AES_TAG_SIZE,
};
pub use curve25519::{Curve25519PrivateKey, Curve25519PublicKey, BOX_NONCE_SIZE};
pub use ed25519::{
    Ed25519PrivateKey, Ed25519PublicKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE,
    SIGNATURE_SIZE,
};
pub use envelope::{
    decode_config_key, encode_config_key, unmarshal_private_key, unmarshal_public_key,
    KeyEnvelope, KeyRegistry, PrivKeyUnmarshaller, PubKeyUnmarshaller,
};
pub use error::{CipherError, KeyError};
pub use hash::{
    derive_address, hash_blake2x, validate_address, HashError, BLAKE2X_MAX_KEY_SIZE,
    BLAKE2X_OUTPUT_SIZE,
};
pub use key::{
    generate_key_pair, key_equal, EncryptionKey, Key, KeyType, PrivCKey, PrivKey, PrivateKey,
    PubKey, PublicKey, ENCRYPTION_KEY_SIZE,
};
