use std::fmt;

use crypto_box::aead::Aead;
use crypto_box::SalsaBox;
use rand_core::{CryptoRngCore, OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::envelope::decode_config_key;
use super::error::{CipherError, KeyError};
use super::key::{EncryptionKey, PrivCKey, ENCRYPTION_KEY_SIZE};

/// Size of the nonce prefixed to every box ciphertext
pub const BOX_NONCE_SIZE: usize = 24;

/// Curve25519 private scalar used for two-party box encryption
///
/// Never serialized through a key envelope; the raw 32 bytes are stored
///  base64-encoded in the bundle.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Curve25519PrivateKey([u8; ENCRYPTION_KEY_SIZE]);

/// Curve25519 public point paired with a [`Curve25519PrivateKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Curve25519PublicKey([u8; ENCRYPTION_KEY_SIZE]);

impl fmt::Debug for Curve25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Curve25519PrivateKey([REDACTED])")
    }
}

impl PartialEq for Curve25519PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Curve25519PrivateKey {}

fn to_fixed(data: &[u8]) -> Result<[u8; ENCRYPTION_KEY_SIZE], KeyError> {
    data.try_into().map_err(|_| KeyError::InvalidKeyLength {
        expected: ENCRYPTION_KEY_SIZE,
        got: data.len(),
    })
}

impl Curve25519PrivateKey {
    /// Generate a new box keypair
    pub fn generate<R>(rng: &mut R) -> Result<(Self, Curve25519PublicKey), KeyError>
    where
        R: CryptoRngCore + ?Sized,
    {
        let mut bytes = [0u8; ENCRYPTION_KEY_SIZE];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| KeyError::RandomSourceExhausted(e.to_string()))?;
        let private = Self(bytes);
        bytes.zeroize();
        let public = private.public();
        Ok((private, public))
    }

    pub fn from_raw(data: &[u8]) -> Result<Self, KeyError> {
        to_fixed(data).map(Self)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_raw(&decode_config_key(encoded)?)
    }

    /// Derive the public point for this scalar
    pub fn public(&self) -> Curve25519PublicKey {
        let secret = self.secret();
        Curve25519PublicKey(*secret.public_key().as_bytes())
    }

    fn secret(&self) -> crypto_box::SecretKey {
        crypto_box::SecretKey::from(self.0)
    }

    fn salsa_box(&self, peer: &Curve25519PublicKey) -> SalsaBox {
        SalsaBox::new(&crypto_box::PublicKey::from(peer.0), &self.secret())
    }

    /// Seal `plaintext` for `recipient` with a nonce drawn from `rng`
    ///
    /// Output is `nonce(24) || sealed`.
    pub fn encrypt_with_rng<R>(
        &self,
        recipient: &Curve25519PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>, CipherError>
    where
        R: CryptoRngCore + ?Sized,
    {
        let mut nonce = [0u8; BOX_NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|e| CipherError::RandomSourceExhausted(e.to_string()))?;

        let sealed = self
            .salsa_box(recipient)
            .encrypt(&nonce.into(), plaintext)
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(BOX_NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Open a `nonce(24) || sealed` message from `sender`
    ///
    /// Every failure, including input shorter than the nonce, is
    ///  `CipherError::DecryptionFailed`.
    pub fn open(
        &self,
        sender: &Curve25519PublicKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        if ciphertext.len() < BOX_NONCE_SIZE {
            return Err(CipherError::DecryptionFailed);
        }
        let (nonce, sealed) = ciphertext.split_at(BOX_NONCE_SIZE);
        let nonce: [u8; BOX_NONCE_SIZE] =
            nonce.try_into().map_err(|_| CipherError::DecryptionFailed)?;

        self.salsa_box(sender)
            .decrypt(&nonce.into(), sealed)
            .map_err(|_| CipherError::DecryptionFailed)
    }
}

impl EncryptionKey for Curve25519PrivateKey {
    fn raw(&self) -> [u8; ENCRYPTION_KEY_SIZE] {
        self.0
    }
}

impl PrivCKey for Curve25519PrivateKey {
    type Public = Curve25519PublicKey;

    fn encrypt(
        &self,
        recipient: &Curve25519PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.encrypt_with_rng(recipient, plaintext, &mut OsRng)
    }

    fn decrypt(
        &self,
        sender: &Curve25519PublicKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.open(sender, ciphertext)
    }
}

impl Curve25519PublicKey {
    pub fn from_raw(data: &[u8]) -> Result<Self, KeyError> {
        to_fixed(data).map(Self)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        Self::from_raw(&decode_config_key(encoded)?)
    }

    pub fn as_bytes(&self) -> &[u8; ENCRYPTION_KEY_SIZE] {
        &self.0
    }
}

impl EncryptionKey for Curve25519PublicKey {
    fn raw(&self) -> [u8; ENCRYPTION_KEY_SIZE] {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::test_rng::{CountingRng, ExhaustedRng};

    #[test]
    fn test_box_roundtrip() {
        let (alice, alice_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let ciphertext = alice.encrypt(&bob_public, b"for bob only").unwrap();
        assert_eq!(ciphertext.len(), BOX_NONCE_SIZE + b"for bob only".len() + 16);

        let plaintext = bob.decrypt(&alice_public, &ciphertext).unwrap();
        assert_eq!(plaintext, b"for bob only");
    }

    #[test]
    fn test_box_nonce_is_fresh() {
        let (alice, _) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (_, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let first = alice.encrypt(&bob_public, b"same").unwrap();
        let second = alice.encrypt(&bob_public, b"same").unwrap();
        assert_ne!(first[..BOX_NONCE_SIZE], second[..BOX_NONCE_SIZE]);
    }

    #[test]
    fn test_box_wrong_sender_fails() {
        let (alice, _) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (_, mallory_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let ciphertext = alice.encrypt(&bob_public, b"secret").unwrap();
        assert_eq!(
            bob.decrypt(&mallory_public, &ciphertext),
            Err(CipherError::DecryptionFailed)
        );
    }

    #[test]
    fn test_box_tampered_and_truncated() {
        let (alice, alice_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();

        let mut ciphertext = alice.encrypt(&bob_public, b"secret").unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;
        assert_eq!(
            bob.decrypt(&alice_public, &ciphertext),
            Err(CipherError::DecryptionFailed)
        );

        assert_eq!(
            bob.decrypt(&alice_public, &[0u8; 10]),
            Err(CipherError::DecryptionFailed)
        );
        assert_eq!(
            bob.decrypt(&alice_public, &[]),
            Err(CipherError::DecryptionFailed)
        );
    }

    #[test]
    fn test_public_is_derived() {
        let (private, public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        assert_eq!(private.public(), public);

        let restored = Curve25519PrivateKey::from_raw(&private.raw()).unwrap();
        assert_eq!(restored.public(), public);
    }

    #[test]
    fn test_base64_roundtrip() {
        let (private, public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        assert_eq!(
            Curve25519PrivateKey::from_base64(&private.to_base64()).unwrap(),
            private
        );
        assert_eq!(
            Curve25519PublicKey::from_base64(&public.to_base64()).unwrap(),
            public
        );
    }

    #[test]
    fn test_key_length_validation() {
        assert!(matches!(
            Curve25519PublicKey::from_raw(&[0u8; 31]),
            Err(KeyError::InvalidKeyLength {
                expected: 32,
                got: 31
            })
        ));
        assert!(matches!(
            Curve25519PrivateKey::from_raw(&[0u8; 64]),
            Err(KeyError::InvalidKeyLength {
                expected: 32,
                got: 64
            })
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let (private, _) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let debug = format!("{:?}", private);
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_randomness_failures() {
        assert!(matches!(
            Curve25519PrivateKey::generate(&mut ExhaustedRng),
            Err(KeyError::RandomSourceExhausted(_))
        ));

        let (alice, _) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        let (_, bob_public) = Curve25519PrivateKey::generate(&mut OsRng).unwrap();
        assert!(matches!(
            alice.encrypt_with_rng(&bob_public, b"hi", &mut ExhaustedRng),
            Err(CipherError::RandomSourceExhausted(_))
        ));
    }

    #[test]
    fn test_injected_randomness() {
        let (alice, alice_public) = Curve25519PrivateKey::generate(&mut CountingRng(0)).unwrap();
        let (again, again_public) = Curve25519PrivateKey::generate(&mut CountingRng(0)).unwrap();
        assert_eq!(alice, again);
        assert_eq!(alice_public, again_public);

        let (bob, bob_public) = Curve25519PrivateKey::generate(&mut CountingRng(100)).unwrap();
        let sealed = alice
            .encrypt_with_rng(&bob_public, b"hi", &mut CountingRng(7))
            .unwrap();
        let expected_nonce: Vec<u8> = (7..7 + BOX_NONCE_SIZE as u8).collect();
        assert_eq!(&sealed[..BOX_NONCE_SIZE], expected_nonce.as_slice());
        assert_eq!(bob.decrypt(&alice_public, &sealed).unwrap(), b"hi");
    }
}
