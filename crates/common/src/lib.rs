/**
 * Domain key bundles: generation, persistence
 *  through a pluggable store, validation
 *  and decoding into usable keys.
 */
pub mod bundle;
/**
 * Hierarchical record identifiers with a
 *  url-safe text form.
 */
pub mod composite_key;
/**
 * Cryptographic types and operations.
 *  - Capability traits over signing and encryption keys
 *  - Ed25519, Curve25519 box, AES-256-GCM and BLAKE2X adapters
 *  - Tagged key envelopes and the algorithm registry
 */
pub mod crypto;
/**
 * Sign and verify handshake contracts with
 *  base64-encoded keys.
 */
pub mod handshake;
/**
 * Application-facing view of one domain's keys.
 */
pub mod keyring;

pub mod prelude {
    pub use crate::bundle::{BundleError, BundleStore, FileBundleStore, KeyBundle};
    pub use crate::composite_key::{CompositeKey, CompositeKeyError};
    pub use crate::crypto::{
        Curve25519PrivateKey, Curve25519PublicKey, EncryptionKey, Key, KeyError, KeyType,
        PrivCKey, PrivKey, PrivateKey, PubKey, PublicKey,
    };
    pub use crate::handshake::{sign_handshake, verify_handshake};
    pub use crate::keyring::{KeyRing, KeyRingError};
}
