use crate::bundle::{BundleError, BundleStore, DomainKeys, KeyBundle};
use crate::crypto::{
    derive_address, CipherError, Curve25519PublicKey, Key, KeyError, PrivCKey, PrivKey, PubKey,
};
use crate::handshake;

#[derive(Debug, thiserror::Error)]
pub enum KeyRingError {
    /// The bundle carries no `secretKey`
    #[error("key bundle has no secret key")]
    MissingSecret,
    #[error("key error: {0}")]
    Key(#[from] KeyError),
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

/// A loaded, validated domain bundle with its decoded keys
///
/// This is what an application holds to sign and verify handshakes and to
///  exchange encrypted messages with other domains.
#[derive(Debug, Clone)]
pub struct KeyRing {
    bundle: KeyBundle,
    keys: DomainKeys,
}

impl KeyRing {
    /// Load, validate and apply the bundle held by `store`
    pub fn open<S: BundleStore>(store: &S) -> Result<Self, BundleError<S::Error>> {
        let bundle = KeyBundle::load(store)?;
        Self::from_bundle(bundle)
    }

    /// Validate and apply an in-memory bundle
    pub fn from_bundle<T>(bundle: KeyBundle) -> Result<Self, BundleError<T>> {
        let keys = bundle.apply::<T>()?;
        tracing::info!(domain = %bundle.domain, "opened key ring");
        Ok(Self { bundle, keys })
    }

    /// Create a bundle for `domain` in an empty store, then open it
    pub fn generate<S: BundleStore>(
        domain: impl Into<String>,
        store: &S,
    ) -> Result<Self, BundleError<S::Error>> {
        KeyBundle::create(domain, store)?;
        Self::open(store)
    }

    pub fn domain(&self) -> &str {
        &self.bundle.domain
    }

    pub fn bundle(&self) -> &KeyBundle {
        &self.bundle
    }

    pub fn keys(&self) -> &DomainKeys {
        &self.keys
    }

    /// Our signing public key, as a base64 envelope
    pub fn public_key(&self) -> &str {
        &self.bundle.signing_public
    }

    /// Our encryption public key
    pub fn encryption_public(&self) -> &Curve25519PublicKey {
        &self.keys.encryption_public
    }

    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.keys.signing_private.sign(data)
    }

    /// Verify a signature made by our own signing key
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        self.keys.signing_public.verify(data, signature)
    }

    /// Sign a contract with this domain's signing key
    pub fn sign_handshake(&self, contract: &str) -> Result<String, KeyError> {
        handshake::sign_handshake(&self.bundle.signing_private, contract)
    }

    /// Verify a contract signed by any domain
    pub fn verify_handshake(
        public_encoded: &str,
        signature_b64: &str,
        contract: &str,
    ) -> Result<bool, KeyError> {
        handshake::verify_handshake(public_encoded, signature_b64, contract)
    }

    /// Seal a message for another domain's encryption key
    pub fn encrypt_for(
        &self,
        recipient: &Curve25519PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.keys.encryption_private.encrypt(recipient, plaintext)
    }

    /// Open a message sealed for us by `sender`
    pub fn decrypt_from(
        &self,
        sender: &Curve25519PublicKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.keys.encryption_private.decrypt(sender, ciphertext)
    }

    /// Encrypt with the bundle's AES key
    pub fn encrypt_secret(&self, plaintext: &[u8]) -> Result<Vec<u8>, KeyRingError> {
        let key = self
            .bundle
            .symmetric_key()?
            .ok_or(KeyRingError::MissingSecret)?;
        Ok(key.encrypt(plaintext)?)
    }

    /// Decrypt with the bundle's AES key
    pub fn decrypt_secret(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KeyRingError> {
        let key = self
            .bundle
            .symmetric_key()?
            .ok_or(KeyRingError::MissingSecret)?;
        Ok(key.decrypt(ciphertext)?)
    }

    /// `0x` address of this domain's signing public key
    pub fn address(&self) -> String {
        derive_address(&self.keys.signing_public.raw())
    }
}
