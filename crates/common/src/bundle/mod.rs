//! Domain key bundles
//!
//! A [`KeyBundle`] is the persisted key material of one named domain: an
//!  Ed25519 signing keypair (base64 envelopes) and a Curve25519 box keypair
//!  (raw base64), plus an optional AES key. It moves through
//!
//! ```text
//! generate -> persist -> load -> validate -> apply
//! ```
//!
//! where `apply` decodes everything into [`DomainKeys`]. Persistence goes
//!  through a [`BundleStore`], so the lifecycle does not care whether the
//!  bundle lives in a file or in memory.

use std::fmt;

use rand_core::{CryptoRngCore, OsRng};
use serde::{Deserialize, Serialize};

use crate::crypto::{
    generate_key_pair, Curve25519PrivateKey, Curve25519PublicKey, EncryptionKey, Key, KeyError,
    KeyType, PrivKey, PrivateKey, PublicKey, SymmetricKey,
};

mod file;
mod memory;
mod store;

pub use file::{FileBundleStore, FileBundleStoreError};
pub use memory::{MemoryBundleStore, MemoryBundleStoreError};
pub use store::BundleStore;

#[derive(thiserror::Error, Debug)]
pub enum BundleError<T> {
    #[error("unhandled bundle store error: {0}")]
    Store(T),
    /// The store already holds a bundle
    #[error("key bundle already exists")]
    AlreadyExists,
    /// The store holds nothing yet
    #[error("key bundle not found")]
    NotFound,
    /// A required field is empty, named by its JSON key
    #[error("key bundle is missing field `{0}`")]
    MissingField(&'static str),
    #[error("malformed key bundle: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid key in bundle: {0}")]
    Key(#[from] KeyError),
}

/// Persisted key material for one domain
///
/// Every string field deserializes to empty when absent, so an incomplete
///  bundle parses and is then rejected by [`KeyBundle::validate`].
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyBundle {
    #[serde(default)]
    pub domain: String,
    /// Ed25519 public key, base64 envelope
    #[serde(rename = "pub", default)]
    pub signing_public: String,
    /// Ed25519 private key, base64 envelope
    #[serde(rename = "priv", default)]
    pub signing_private: String,
    /// Curve25519 public key, raw base64
    #[serde(rename = "pubC", default)]
    pub encryption_public: String,
    /// Curve25519 private key, raw base64
    #[serde(rename = "privC", default)]
    pub encryption_private: String,
    /// Optional AES-256 key, raw base64
    #[serde(rename = "secretKey", default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl fmt::Debug for KeyBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBundle")
            .field("domain", &self.domain)
            .field("pub", &self.signing_public)
            .field("pubC", &self.encryption_public)
            .field("priv", &"[REDACTED]")
            .field("privC", &"[REDACTED]")
            .field("secretKey", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Decoded keys of a validated bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainKeys {
    pub signing_private: PrivateKey,
    pub signing_public: PublicKey,
    pub encryption_private: Curve25519PrivateKey,
    pub encryption_public: Curve25519PublicKey,
}

impl KeyBundle {
    /// Generate fresh signing and encryption keypairs for `domain`
    pub fn generate<R>(domain: impl Into<String>, rng: &mut R) -> Result<Self, KeyError>
    where
        R: CryptoRngCore + ?Sized,
    {
        let (signing_private, signing_public) = generate_key_pair(KeyType::Ed25519, rng)?;
        let (encryption_private, encryption_public) = Curve25519PrivateKey::generate(rng)?;

        Ok(Self {
            domain: domain.into(),
            signing_public: signing_public.to_base64()?,
            signing_private: signing_private.to_base64()?,
            encryption_public: encryption_public.to_base64(),
            encryption_private: encryption_private.to_base64(),
            secret_key: None,
        })
    }

    pub fn with_secret_key(mut self, key: &SymmetricKey) -> Self {
        self.secret_key = Some(key.to_base64());
        self
    }

    /// Generate a bundle for `domain` and persist it into an empty store
    ///
    /// # Errors
    ///
    /// Returns `BundleError::AlreadyExists` if the store is already populated.
    pub fn create<S: BundleStore>(
        domain: impl Into<String>,
        store: &S,
    ) -> Result<Self, BundleError<S::Error>> {
        Self::create_with_rng(domain, store, &mut OsRng)
    }

    /// Same as [`KeyBundle::create`] with an explicit random source
    pub fn create_with_rng<S, R>(
        domain: impl Into<String>,
        store: &S,
        rng: &mut R,
    ) -> Result<Self, BundleError<S::Error>>
    where
        S: BundleStore,
        R: CryptoRngCore + ?Sized,
    {
        if store.exists()? {
            return Err(BundleError::AlreadyExists);
        }
        let bundle = Self::generate(domain, rng)?;
        bundle.persist(store)?;
        Ok(bundle)
    }

    /// Write this bundle into an empty store
    pub fn persist<S: BundleStore>(&self, store: &S) -> Result<(), BundleError<S::Error>> {
        if store.exists()? {
            return Err(BundleError::AlreadyExists);
        }
        let contents = serde_json::to_string_pretty(self)?;
        store.write_new(&contents)?;
        tracing::info!(domain = %self.domain, "persisted key bundle");
        Ok(())
    }

    /// Read the bundle held by `store`
    ///
    /// This only parses; call [`KeyBundle::validate`] or [`KeyBundle::apply`]
    ///  before trusting the contents.
    pub fn load<S: BundleStore>(store: &S) -> Result<Self, BundleError<S::Error>> {
        let contents = store.read()?.ok_or(BundleError::NotFound)?;
        let bundle: Self = serde_json::from_str(&contents)?;
        tracing::debug!(domain = %bundle.domain, "loaded key bundle");
        Ok(bundle)
    }

    /// Check that every required field is populated
    ///
    /// Fields are checked in the order domain, pub, priv, pubC, privC and the
    ///  first empty one is reported.
    pub fn validate<T>(&self) -> Result<(), BundleError<T>> {
        let fields = [
            ("domain", &self.domain),
            ("pub", &self.signing_public),
            ("priv", &self.signing_private),
            ("pubC", &self.encryption_public),
            ("privC", &self.encryption_private),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(BundleError::MissingField(*name)),
            None => Ok(()),
        }
    }

    /// Validate and decode all four keys
    ///
    /// Nothing is returned unless every key decodes.
    pub fn apply<T>(&self) -> Result<DomainKeys, BundleError<T>> {
        self.validate::<T>()?;

        let keys = DomainKeys {
            signing_private: PrivateKey::from_base64(&self.signing_private)?,
            signing_public: PublicKey::from_base64(&self.signing_public)?,
            encryption_private: Curve25519PrivateKey::from_base64(&self.encryption_private)?,
            encryption_public: Curve25519PublicKey::from_base64(&self.encryption_public)?,
        };
        tracing::debug!(
            domain = %self.domain,
            key_type = %keys.signing_private.key_type(),
            "applied key bundle"
        );
        Ok(keys)
    }

    /// The optional AES key; an empty string counts as absent
    pub fn symmetric_key(&self) -> Result<Option<SymmetricKey>, KeyError> {
        match self.secret_key.as_deref() {
            None | Some("") => Ok(None),
            Some(encoded) => SymmetricKey::from_base64(encoded).map(Some),
        }
    }
}

impl DomainKeys {
    /// Whether both halves of each keypair belong together
    pub fn is_consistent(&self) -> bool {
        self.signing_private.public() == self.signing_public
            && self.encryption_private.public() == self.encryption_public
    }
}
